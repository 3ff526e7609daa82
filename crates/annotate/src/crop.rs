use crate::{AnnotateError, encode_png};
use common::span;
use detection::Detection;
use image::RgbImage;
use rayon::prelude::*;

/// One extracted room crop, already PNG-encoded.
pub struct RoomCrop {
    /// Stable artifact name (`room_001`, `room_002`, ...), no extension.
    pub name: String,
    pub png: Vec<u8>,
}

struct Region {
    name: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Extract one sub-image per deduplicated room box.
///
/// Box corners are rounded to integer pixels and clamped to
/// `[0,width] x [0,height]`; a region that is degenerate after clamping is
/// skipped entirely and does not consume a sequence number. Names are 3-digit
/// zero-padded and 1-based, counting only emitted crops in input order.
///
/// Crops are independent reads of the immutable source, so extraction and PNG
/// encoding run in parallel; output order follows the region list regardless.
pub fn extract_room_crops(
    source: &RgbImage,
    rooms: &[Detection],
) -> Result<Vec<RoomCrop>, AnnotateError> {
    let _s = span!("extract_room_crops");

    let (width, height) = (source.width() as i64, source.height() as i64);

    let mut regions = Vec::with_capacity(rooms.len());
    for det in rooms {
        let ix0 = (det.bbox.x0.round() as i64).max(0);
        let iy0 = (det.bbox.y0.round() as i64).max(0);
        let ix1 = (det.bbox.x1.round() as i64).min(width);
        let iy1 = (det.bbox.y1.round() as i64).min(height);

        if ix1 <= ix0 || iy1 <= iy0 {
            tracing::debug!(label = %det.label, "Skipping degenerate crop region");
            continue;
        }

        regions.push(Region {
            name: format!("room_{:03}", regions.len() + 1),
            x: ix0 as u32,
            y: iy0 as u32,
            width: (ix1 - ix0) as u32,
            height: (iy1 - iy0) as u32,
        });
    }

    regions
        .into_par_iter()
        .map(|region| {
            let pixels =
                image::imageops::crop_imm(source, region.x, region.y, region.width, region.height)
                    .to_image();
            Ok(RoomCrop {
                name: region.name,
                png: encode_png(&pixels)?,
            })
        })
        .collect()
}
