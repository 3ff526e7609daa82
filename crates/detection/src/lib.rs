//! Detection post-processing core: normalization of raw inference records,
//! box geometry, greedy non-maximum suppression and palette color assignment.
//!
//! Everything in this crate is a pure, synchronous function over owned data;
//! raster work lives in the `annotate` crate and I/O in `gateway`.

pub mod geometry;
pub mod nms;
pub mod normalize;
pub mod palette;
pub mod record;

pub use geometry::BoundingBox;
pub use nms::{DEFAULT_IOU_THRESHOLD, suppress};
pub use normalize::normalize;
pub use palette::{PALETTE, label_color};
pub use record::{Detection, RawPrediction};
