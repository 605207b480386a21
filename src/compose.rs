//! Alpha compositing of watermark layers onto base images.
//!
//! Two shapes of composite:
//! - [`paste`] — a small overlay (the scaled logo) placed at a resolved
//!   offset, blended through its own alpha channel.
//! - [`blend`] — a full-canvas layer (the rendered text) composited over the
//!   whole image.
//!
//! Both clip silently: overlay pixels outside the base's bounds are dropped,
//! which is what makes negative offsets from oversized overlays safe.

use image::RgbaImage;
use image::imageops;

/// Alpha-composite `overlay` onto `base` with its top-left corner at
/// `(x, y)`. Partially transparent overlay pixels blend; fully transparent
/// ones leave the base untouched.
pub fn paste(base: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(base, overlay, x, y);
}

/// Alpha-composite a layer of `base`'s dimensions over the whole canvas.
pub fn blend(base: &mut RgbaImage, layer: &RgbaImage) {
    imageops::overlay(base, layer, 0, 0);
}
