use crate::store::ArtifactStore;
use annotate::Annotator;
use common::span;
use detection::palette::ROOM_LABEL;
use detection::{Detection, RawPrediction};
use rand::RngCore;
use serde::Serialize;

/// Per-run knobs, resolved from config and the upload form.
pub struct RunOptions {
    pub nms_threshold: f32,
    pub annotate_overlay: bool,
}

#[derive(Serialize)]
pub struct Counts {
    pub room: usize,
}

/// JSON report returned to the caller; field names match the public API.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub counts: Counts,
    pub boxes: Vec<Detection>,
    pub room_nms: Vec<Detection>,
    pub original_url: String,
    pub overlay_url: String,
    pub boxes_url: String,
    pub room_crop_urls: Vec<String>,
}

/// Workspace identifier used as the artifact key prefix. Random, but it names
/// storage keys only; pipeline output is fully determined by the input.
pub fn new_run_id() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Run the post-processing pipeline over one upload and persist its
/// artifacts.
///
/// raw records → normalize → `boxes` → room-only filter → greedy NMS →
/// `roomNms`; `boxes.png` annotates every normalized detection, the overlay
/// annotates the deduplicated rooms only when configured to, and each kept
/// room produces a clamped crop.
pub fn process_run(
    run_id: &str,
    image_bytes: &[u8],
    raw: &[RawPrediction],
    annotator: &Annotator,
    store: &dyn ArtifactStore,
    options: &RunOptions,
) -> anyhow::Result<RunReport> {
    let _s = span!("process_run");

    let boxes = detection::normalize(raw);
    let rooms: Vec<Detection> = boxes
        .iter()
        .filter(|d| d.has_label(ROOM_LABEL))
        .cloned()
        .collect();
    let room_nms = detection::suppress(&rooms, options.nms_threshold);

    let source = annotate::decode_image(image_bytes)?;

    let boxes_png = annotate::encode_png(&annotator.render(&source, &boxes))?;
    let overlay_png = if options.annotate_overlay {
        annotate::encode_png(&annotator.render(&source, &room_nms))?
    } else {
        annotate::encode_png(&source)?
    };

    let original_url = store.put(&format!("{run_id}/original.jpg"), image_bytes, "image/jpeg")?;
    let boxes_url = store.put(&format!("{run_id}/boxes.png"), &boxes_png, "image/png")?;
    let overlay_url = store.put(&format!("{run_id}/overlay.png"), &overlay_png, "image/png")?;

    let crops = annotate::extract_room_crops(&source, &room_nms)?;
    let mut room_crop_urls = Vec::with_capacity(crops.len());
    for crop in &crops {
        room_crop_urls.push(store.put(
            &format!("{run_id}/{}.png", crop.name),
            &crop.png,
            "image/png",
        )?);
    }

    tracing::info!(
        run_id,
        boxes = boxes.len(),
        rooms = room_nms.len(),
        crops = crops.len(),
        "Run processed"
    );

    Ok(RunReport {
        run_id: run_id.to_string(),
        counts: Counts {
            room: room_nms.len(),
        },
        boxes,
        room_nms,
        original_url,
        overlay_url,
        boxes_url,
        room_crop_urls,
    })
}
