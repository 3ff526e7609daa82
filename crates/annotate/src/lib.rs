//! Raster side of the pipeline: box/label rendering onto a copy of the source
//! image and clamped room-crop extraction. The source image is decoded once
//! and treated as read-only; every artifact is an independent output buffer.

pub mod crop;
pub mod overlay;

use image::RgbImage;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Failed to decode source image: {0}")]
    Decode(image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("Failed to read font file: {0}")]
    FontIo(std::io::Error),
    #[error("Invalid font data: {0}")]
    FontParse(ab_glyph::InvalidFont),
}

pub use crop::{RoomCrop, extract_room_crops};
pub use overlay::Annotator;

/// Decode an uploaded raster image into RGB pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, AnnotateError> {
    Ok(image::load_from_memory(bytes)
        .map_err(AnnotateError::Decode)?
        .to_rgb8())
}

/// Encode pixels to lossless PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, AnnotateError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(AnnotateError::Encode)?;
    Ok(bytes.into_inner())
}
