use serde::{Deserialize, Serialize, Deserializer, Serializer};

/// Axis-aligned box in image pixel coordinates, corner form.
///
/// Serialized on the wire as the JSON array `[x0, y0, x1, y1]`. Degenerate
/// boxes (`x1 <= x0` or `y1 <= y0`) are legal everywhere in this crate and
/// contribute zero area, never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Convert from center-width-height form, the shape inference services
    /// report boxes in.
    pub fn from_center(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x0: x - width / 2.0,
            y0: y - height / 2.0,
            x1: x + width / 2.0,
            y1: y + height / 2.0,
        }
    }

    /// Box area, clamped at zero for degenerate boxes.
    pub fn area(&self) -> f32 {
        (self.x1 - self.x0).max(0.0) * (self.y1 - self.y0).max(0.0)
    }

    /// Intersection-over-union with another box.
    ///
    /// Total over all real quadruples: degenerate boxes contribute zero area
    /// and two zero-area boxes yield exactly 0 rather than dividing by zero.
    /// Exactly symmetric, since both directions evaluate the same arithmetic.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let ix0 = self.x0.max(other.x0);
        let iy0 = self.y0.max(other.y0);
        let ix1 = self.x1.min(other.x1);
        let iy1 = self.y1.min(other.y1);

        let intersection = (ix1 - ix0).max(0.0) * (iy1 - iy0).max(0.0);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 { intersection / union } else { 0.0 }
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x0, self.y0, self.x1, self.y1].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x0, y0, x1, y1] = <[f32; 4]>::deserialize(deserializer)?;
        Ok(Self { x0, y0, x1, y1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_form_round_trips_corners() {
        let b = BoundingBox::from_center(10.0, 10.0, 4.0, 6.0);
        assert_eq!(b, BoundingBox::new(8.0, 7.0, 12.0, 13.0));
    }

    #[test]
    fn iou_of_identical_box_is_one() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(b.iou(&b), 1.0);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(100.0, 100.0, 110.0, 110.0);
        assert_eq!(a.iou(&b), 0.0);
        assert_eq!(b.iou(&a), 0.0);
    }

    #[test]
    fn iou_is_symmetric_and_bounded() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(1.0, 1.0, 9.0, 9.0);
        let ab = a.iou(&b);
        assert_eq!(ab, b.iou(&a));
        assert!(ab > 0.0 && ab <= 1.0);
    }

    #[test]
    fn nested_boxes_iou_is_area_ratio() {
        // [1,1,9,9] sits inside [0,0,10,10]: 64 / 100
        let outer = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let inner = BoundingBox::new(1.0, 1.0, 9.0, 9.0);
        assert!((outer.iou(&inner) - 0.64).abs() < 1e-6);
    }

    #[test]
    fn degenerate_boxes_have_zero_area_and_zero_iou() {
        let point = BoundingBox::new(10.0, 10.0, 10.0, 10.0);
        let inverted = BoundingBox::new(5.0, 5.0, 1.0, 1.0);
        assert_eq!(point.area(), 0.0);
        assert_eq!(inverted.area(), 0.0);
        // Two zero-area boxes: union is 0, result is defined as 0.
        assert_eq!(point.iou(&point), 0.0);
        assert_eq!(point.iou(&inverted), 0.0);
    }

    #[test]
    fn serializes_as_corner_array() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
