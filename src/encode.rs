//! Output format selection and encoding.
//!
//! The output format follows the source extension, not the pixel data:
//! PNG/TIFF sources are written as PNG (alpha survives, TIFF re-encodes
//! losslessly under its original name), JPEG sources as maximum-quality JPEG.
//! JPEG cannot carry alpha, so RGBA flattens to RGB by dropping the alpha
//! plane before encoding.
//!
//! Both encoders stamp the resolved [`Density`] into the output: PNG via the
//! `png` crate's pHYs chunk, JPEG by patching the JFIF header the `image`
//! encoder emits.

use crate::density::{self, Density};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Encoded representation for a watermarked image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the output format for a source file, by extension.
    /// `None` for files the batch would never have selected.
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" | "tif" | "tiff" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// Encode a composited image to bytes, carrying the density metadata.
pub fn encode(image: &RgbaImage, format: OutputFormat, density: Density) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(image, density),
        OutputFormat::Jpeg => encode_jpeg(image, density),
    }
}

fn encode_png(image: &RgbaImage, density: Density) -> Result<Vec<u8>, EncodeError> {
    let (xppu, yppu) = density.to_pixels_per_meter();

    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu,
        yppu,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(bytes)
}

fn encode_jpeg(image: &RgbaImage, density: Density) -> Result<Vec<u8>, EncodeError> {
    // JPEG has no alpha: drop the channel, keeping color values as-is
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 100).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;

    // The image encoder writes a JFIF header with no density; fill it in
    density::patch_jpeg_density(&mut bytes, density);
    Ok(bytes)
}
