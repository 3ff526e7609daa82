use crate::config::Config;
use crate::inference::{HttpInferenceClient, InferenceClient};
use crate::store::{ArtifactStore, FsStore};
use annotate::Annotator;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram};
use std::sync::Arc;

pub struct Metrics {
    pub run_duration: Histogram<f64>,
    pub runs: Counter<u64>,
    pub detections: Counter<u64>,
    pub rooms: Counter<u64>,
}

impl Metrics {
    pub fn new() -> Self {
        let meter = global::meter("gateway");
        let latency_buckets = [0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];
        let run_duration: Histogram<f64> = meter
            .f64_histogram("infer_run_duration_seconds")
            .with_description("Time to process one upload (inference + post-processing + storage)")
            .with_unit("s")
            .with_boundaries(latency_buckets.to_vec())
            .build();
        let runs: Counter<u64> = meter
            .u64_counter("infer_runs_total")
            .with_description("Total uploads processed")
            .build();
        let detections: Counter<u64> = meter
            .u64_counter("infer_detections_total")
            .with_description("Total normalized detections")
            .build();
        let rooms: Counter<u64> = meter
            .u64_counter("infer_rooms_total")
            .with_description("Total deduplicated room detections")
            .build();

        Self {
            run_duration,
            runs,
            detections,
            rooms,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn InferenceClient>,
    pub store: Arc<dyn ArtifactStore>,
    pub annotator: Arc<Annotator>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire the default collaborators: HTTP inference and filesystem storage.
    pub fn build(config: Config, annotator: Annotator) -> Self {
        let client = Arc::new(HttpInferenceClient::new(
            config.inference_url.clone(),
            config.inference_api_key.clone(),
        ));
        let store = Arc::new(FsStore::new(
            config.artifact_root.clone(),
            config.public_base.clone(),
        ));
        Self {
            config: Arc::new(config),
            client,
            store,
            annotator: Arc::new(annotator),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
