use crate::AnnotateError;
use ab_glyph::{FontVec, PxScale};
use common::span;
use detection::geometry::BoundingBox;
use detection::palette::ROOM_LABEL;
use detection::{Detection, label_color};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::Path;

const STROKE_WIDTH: i32 = 3;
const TAG_ALPHA: f32 = 0.6;
const TAG_PADDING: i64 = 3;
const TAG_TEXT_HEIGHT: f32 = 14.0;
// Tag width estimate when no font is available to measure the text with.
const FALLBACK_CHAR_WIDTH: i64 = 7;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Draws detection boxes and label tags onto copies of a source image.
///
/// Label text needs a TTF font; without one the tag rectangle is still drawn
/// and the text is skipped.
pub struct Annotator {
    font: Option<FontVec>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator {
    pub fn new() -> Self {
        Self { font: None }
    }

    pub fn with_font(font: FontVec) -> Self {
        Self { font: Some(font) }
    }

    pub fn from_font_path(path: &Path) -> Result<Self, AnnotateError> {
        let data = std::fs::read(path).map_err(AnnotateError::FontIo)?;
        let font = FontVec::try_from_vec(data).map_err(AnnotateError::FontParse)?;
        Ok(Self::with_font(font))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render the given detections onto a copy of `source`.
    ///
    /// Sequence order is paint order; later boxes paint over earlier ones.
    /// Room detections take their palette color from their 0-based position
    /// among the rooms in this sequence; other labels hash to a stable slot.
    /// Boxes extending outside the image are clipped, never an error.
    pub fn render(&self, source: &RgbImage, detections: &[Detection]) -> RgbImage {
        let _s = span!("render_boxes");

        let mut canvas = source.clone();
        let mut room_ordinal = 0usize;
        for det in detections {
            let ordinal = room_ordinal;
            if det.has_label(ROOM_LABEL) {
                room_ordinal += 1;
            }
            let [r, g, b] = label_color(&det.label, ordinal);
            let color = Rgb([r, g, b]);
            stroke_rect(&mut canvas, &det.bbox, color);
            self.draw_tag(&mut canvas, det, color);
        }
        canvas
    }

    /// Filled, reduced-opacity label tag at the box top-left with white text.
    fn draw_tag(&self, canvas: &mut RgbImage, det: &Detection, color: Rgb<u8>) {
        let scale = PxScale::from(TAG_TEXT_HEIGHT);
        let (text_w, text_h) = match &self.font {
            Some(font) => {
                let (w, h) = text_size(scale, font, &det.label);
                (w as i64, h as i64)
            }
            None => (
                det.label.chars().count() as i64 * FALLBACK_CHAR_WIDTH,
                TAG_TEXT_HEIGHT as i64,
            ),
        };

        let x0 = det.bbox.x0.round() as i64;
        let y0 = det.bbox.y0.round() as i64;
        blend_rect(
            canvas,
            x0,
            y0,
            text_w + 2 * TAG_PADDING,
            text_h + 2 * TAG_PADDING,
            color,
        );

        if let Some(font) = &self.font {
            draw_text_mut(
                canvas,
                WHITE,
                (x0 + TAG_PADDING) as i32,
                (y0 + TAG_PADDING) as i32,
                scale,
                font,
                &det.label,
            );
        }
    }
}

/// Hollow rectangle stroke of [`STROKE_WIDTH`] pixels, drawn as concentric
/// one-pixel rectangles shrinking inward. `draw_hollow_rect_mut` clips to the
/// canvas, so out-of-bounds boxes are safe.
fn stroke_rect(canvas: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>) {
    let x0 = bbox.x0.round() as i64;
    let y0 = bbox.y0.round() as i64;
    let w = (bbox.x1.round() as i64 - x0).max(1);
    let h = (bbox.y1.round() as i64 - y0).max(1);

    for t in 0..STROKE_WIDTH as i64 {
        let w_t = w - 2 * t;
        let h_t = h - 2 * t;
        if w_t <= 0 || h_t <= 0 {
            break;
        }
        let rect = Rect::at((x0 + t) as i32, (y0 + t) as i32).of_size(w_t as u32, h_t as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

/// Blend `color` over the rectangle at [`TAG_ALPHA`] opacity, clamped to the
/// canvas bounds.
fn blend_rect(canvas: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(canvas.width() as i64);
    let y1 = (y + h).min(canvas.height() as i64);

    for py in y0..y1 {
        for px in x0..x1 {
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            for i in 0..3 {
                let blended =
                    color.0[i] as f32 * TAG_ALPHA + pixel.0[i] as f32 * (1.0 - TAG_ALPHA);
                pixel.0[i] = blended.round() as u8;
            }
        }
    }
}
