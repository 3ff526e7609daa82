use crate::pipeline::{RunOptions, RunReport, new_run_id, process_run};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub enum ApiError {
    BadRequest(String),
    Upstream(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Upstream(m) => (StatusCode::BAD_GATEWAY, m),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let artifacts = ServeDir::new(state.config.artifact_root.clone());
    let public_base = state.config.public_base.clone();

    Router::new()
        .route("/health", get(health))
        .route("/api/infer", post(infer))
        .nest_service(&public_base, artifacts)
        // Raster uploads routinely exceed the 2MB default.
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Multipart upload (`image` required, `modelId` optional) → inference →
/// post-processing → stored artifacts → JSON report.
async fn infer(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RunReport>, ApiError> {
    let mut image: Option<Vec<u8>> = None;
    let mut model_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                image = Some(bytes.to_vec());
            }
            Some("modelId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                model_id = Some(text);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("image required".to_string()))?;
    let model_id = model_id
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.config.default_model.clone());

    let start = Instant::now();
    let run_id = new_run_id();
    tracing::info!(%run_id, %model_id, image_bytes = image.len(), "Upload received");

    let raw = {
        let client = state.client.clone();
        let image = image.clone();
        tokio::task::spawn_blocking(move || client.infer(&image, &model_id))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?
            .map_err(|e| ApiError::Upstream(e.to_string()))?
    };

    let report = {
        let annotator = state.annotator.clone();
        let store = state.store.clone();
        let options = RunOptions {
            nms_threshold: state.config.nms_threshold,
            annotate_overlay: state.config.annotate_overlay,
        };
        let run_id = run_id.clone();
        tokio::task::spawn_blocking(move || {
            process_run(&run_id, &image, &raw, &annotator, store.as_ref(), &options)
        })
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(ApiError::Internal)?
    };

    state.metrics.run_duration.record(start.elapsed().as_secs_f64(), &[]);
    state.metrics.runs.add(1, &[]);
    state.metrics.detections.add(report.boxes.len() as u64, &[]);
    state.metrics.rooms.add(report.counts.room as u64, &[]);

    Ok(Json(report))
}
