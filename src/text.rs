//! Text watermark rendering.
//!
//! A text watermark is rasterized onto its own fully transparent layer sized
//! to the base image, then alpha-composited over the whole canvas. Fill color
//! is fixed white; the requested opacity becomes the fill alpha. Placement
//! uses the measured text box as the element for [`geometry::resolve`], so
//! text anchors exactly like a logo does.

use crate::compose;
use crate::geometry::{self, Anchor};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse font {path}: not a usable TTF/OTF file")]
    Parse { path: PathBuf },
}

/// Load a TTF/OTF font from disk. Done at most once per run.
pub fn load_font(path: &Path) -> Result<FontVec, FontError> {
    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(bytes).map_err(|_| FontError::Parse {
        path: path.to_path_buf(),
    })
}

/// Draw `text` over `base`: measure, anchor, rasterize white at
/// `round(255 * opacity)` alpha on a transparent layer, composite.
pub fn render_over(
    base: &mut RgbaImage,
    text: &str,
    anchor: Anchor,
    padding: i64,
    font: &FontVec,
    font_size: u32,
    opacity: f32,
) {
    let scale = PxScale::from(font_size as f32);
    let measured = text_size(scale, font, text);
    let (x, y) = geometry::resolve(anchor, base.dimensions(), measured, padding);

    let alpha = (255.0 * opacity).round() as u8;
    let mut layer = RgbaImage::from_pixel(base.width(), base.height(), Rgba([255, 255, 255, 0]));
    draw_text_mut(
        &mut layer,
        Rgba([255, 255, 255, alpha]),
        x as i32,
        y as i32,
        scale,
        font,
        text,
    );

    compose::blend(base, &layer);
}
