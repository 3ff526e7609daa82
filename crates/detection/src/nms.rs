use crate::record::Detection;

/// Overlap at or above this fraction suppresses the lower-confidence box.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.5;

/// Greedy non-maximum suppression.
///
/// Candidates are visited in confidence-descending order (stable sort, so
/// equal confidences keep the input order and the result is deterministic for
/// a fixed input ordering). A candidate is kept iff its IoU against every
/// already-kept box is strictly below `threshold`; kept boxes come back in
/// acceptance order. O(n²) comparisons worst case, which is fine at
/// detections-per-image counts.
pub fn suppress(detections: &[Detection], threshold: f32) -> Vec<Detection> {
    let mut order: Vec<&Detection> = detections.iter().collect();
    order.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Detection> = Vec::new();
    for candidate in order {
        if kept.iter().all(|k| candidate.bbox.iou(&k.bbox) < threshold) {
            kept.push(candidate.clone());
        }
    }
    kept
}
