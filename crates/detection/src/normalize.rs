use crate::geometry::BoundingBox;
use crate::record::{Detection, RawPrediction};

/// Label used when a record carries neither a class nor a label field.
pub const FALLBACK_LABEL: &str = "region";

/// Convert raw center-form records into corner-form detections.
///
/// A record produces a detection only when all four of `x`, `y`, `width`,
/// `height` are present; anything else is silently filtered out, not an
/// error. The explicit `class` field wins over `label`, and a record with
/// neither gets [`FALLBACK_LABEL`]. Missing confidence defaults to 0.
pub fn normalize(raw: &[RawPrediction]) -> Vec<Detection> {
    let detections: Vec<Detection> = raw
        .iter()
        .filter_map(|p| {
            let (x, y, width, height) = match (p.x, p.y, p.width, p.height) {
                (Some(x), Some(y), Some(w), Some(h)) => (x, y, w, h),
                _ => return None,
            };
            let label = p
                .class
                .as_deref()
                .or(p.label.as_deref())
                .unwrap_or(FALLBACK_LABEL)
                .to_string();
            Some(Detection {
                label,
                confidence: p.confidence.unwrap_or(0.0),
                bbox: BoundingBox::from_center(x, y, width, height),
            })
        })
        .collect();

    if detections.len() < raw.len() {
        tracing::debug!(
            dropped = raw.len() - detections.len(),
            "Dropped records with incomplete geometry"
        );
    }

    detections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record(x: f32, y: f32, w: f32, h: f32) -> RawPrediction {
        RawPrediction {
            class: Some("room".to_string()),
            confidence: Some(0.9),
            x: Some(x),
            y: Some(y),
            width: Some(w),
            height: Some(h),
            ..Default::default()
        }
    }

    #[test]
    fn converts_center_form_to_corners() {
        let out = normalize(&[full_record(50.0, 40.0, 20.0, 10.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bbox, BoundingBox::new(40.0, 35.0, 60.0, 45.0));
        assert_eq!(out[0].label, "room");
        assert_eq!(out[0].confidence, 0.9);
    }

    #[test]
    fn drops_record_missing_any_geometry_field() {
        let mut no_width = full_record(10.0, 10.0, 5.0, 5.0);
        no_width.width = None;
        let out = normalize(&[no_width, full_record(1.0, 1.0, 2.0, 2.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bbox, BoundingBox::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn zero_size_record_normalizes_to_degenerate_box() {
        let out = normalize(&[full_record(10.0, 10.0, 0.0, 0.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bbox, BoundingBox::new(10.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn class_wins_over_label_and_both_absent_uses_fallback() {
        let mut both = full_record(1.0, 1.0, 2.0, 2.0);
        both.label = Some("door".to_string());
        let mut label_only = full_record(1.0, 1.0, 2.0, 2.0);
        label_only.class = None;
        label_only.label = Some("door".to_string());
        let mut neither = full_record(1.0, 1.0, 2.0, 2.0);
        neither.class = None;

        let out = normalize(&[both, label_only, neither]);
        assert_eq!(out[0].label, "room");
        assert_eq!(out[1].label, "door");
        assert_eq!(out[2].label, FALLBACK_LABEL);
    }

    #[test]
    fn missing_confidence_defaults_to_zero() {
        let mut p = full_record(1.0, 1.0, 2.0, 2.0);
        p.confidence = None;
        assert_eq!(normalize(&[p])[0].confidence, 0.0);
    }

    #[test]
    fn out_of_range_confidence_passes_through() {
        let mut p = full_record(1.0, 1.0, 2.0, 2.0);
        p.confidence = Some(1.7);
        assert_eq!(normalize(&[p])[0].confidence, 1.7);
    }
}
