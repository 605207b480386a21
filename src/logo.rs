//! Logo asset loading and scaling.
//!
//! The logo is prepared once per run: decoded, normalized to RGBA, and — when
//! requested — made translucent by scaling its alpha plane. The prepared
//! asset is then shared read-only across the batch; [`scale_to_image`]
//! produces a per-image resized copy and never touches the shared asset.

use image::imageops::{self, FilterType};
use image::{ImageReader, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("failed to read logo {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode logo {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Load the logo and pre-apply its opacity.
///
/// `opacity < 1.0` multiplies every alpha byte; color channels are left
/// alone, so anti-aliased edges keep their shape. `opacity >= 1.0` leaves the
/// alpha plane exactly as decoded — transparency baked into the asset is
/// preserved, never forced opaque.
pub fn prepare(path: &Path, opacity: f32) -> Result<RgbaImage, LogoError> {
    let reader = ImageReader::open(path).map_err(|source| LogoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut logo = reader
        .decode()
        .map_err(|source| LogoError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    if opacity < 1.0 {
        for px in logo.pixels_mut() {
            px[3] = (px[3] as f32 * opacity).round() as u8;
        }
    }

    Ok(logo)
}

/// Resize the logo to a percentage of the target image's shorter side,
/// keeping the logo's aspect ratio.
///
/// Width comes straight from the percentage; height follows from the logo's
/// own aspect ratio, both truncated. A scale small enough to truncate to a
/// zero width yields an empty image, which downstream compositing treats as
/// a no-op.
pub fn scale_to_image(
    logo: &RgbaImage,
    image_w: u32,
    image_h: u32,
    scale_percent: f32,
) -> RgbaImage {
    let shorter_side = image_w.min(image_h);
    let target_w = (shorter_side as f64 * scale_percent as f64 / 100.0) as u32;
    let aspect = logo.width() as f64 / logo.height() as f64;
    let target_h = (target_w as f64 / aspect) as u32;

    imageops::resize(logo, target_w, target_h, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_png;
    use image::Rgba;

    #[test]
    fn prepare_missing_file_is_io_error() {
        let err = prepare(Path::new("/nonexistent/logo.png"), 1.0).unwrap_err();
        assert!(matches!(err, LogoError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn prepare_garbage_file_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = prepare(&path, 1.0).unwrap_err();
        assert!(matches!(err, LogoError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn prepare_scales_alpha_when_translucent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_png(&path, 8, 8, [50, 100, 150, 200]);

        let logo = prepare(&path, 0.5).unwrap();
        let px = logo.get_pixel(3, 3).0;
        assert_eq!(px[3], 100); // 200 * 0.5
        assert_eq!(&px[..3], &[50, 100, 150]); // color untouched
    }

    #[test]
    fn prepare_full_opacity_preserves_baked_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_png(&path, 8, 8, [50, 100, 150, 200]);

        let logo = prepare(&path, 1.0).unwrap();
        // Alpha of 200 is kept, not bumped to 255
        assert_eq!(logo.get_pixel(0, 0).0[3], 200);
    }

    #[test]
    fn prepare_opacity_above_one_is_left_alone() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("logo.png");
        write_png(&path, 4, 4, [0, 0, 0, 120]);

        let logo = prepare(&path, 1.5).unwrap();
        assert_eq!(logo.get_pixel(0, 0).0[3], 120);
    }

    #[test]
    fn scale_targets_shorter_side() {
        // 1000x800 image at 20% → width floor(800 * 0.20) = 160;
        // 100x50 logo → height 160 / 2.0 = 80
        let logo = RgbaImage::from_pixel(100, 50, Rgba([255, 0, 0, 255]));
        let scaled = scale_to_image(&logo, 1000, 800, 20.0);
        assert_eq!(scaled.dimensions(), (160, 80));
    }

    #[test]
    fn scale_truncates_fractional_targets() {
        // shorter side 333 at 10% → 33.3 → 33; square logo → 33x33
        let logo = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        let scaled = scale_to_image(&logo, 500, 333, 10.0);
        assert_eq!(scaled.dimensions(), (33, 33));
    }

    #[test]
    fn scale_preserves_aspect_within_rounding() {
        let logo = RgbaImage::from_pixel(300, 70, Rgba([0, 0, 0, 255]));
        let scaled = scale_to_image(&logo, 2000, 1500, 25.0);

        let (w, h) = scaled.dimensions();
        let original = 300.0 / 70.0;
        let result = w as f64 / h as f64;
        assert!(
            (original - result).abs() / original < 0.02,
            "aspect drifted: {original} vs {result}"
        );
    }

    #[test]
    fn scale_to_zero_width_is_empty_not_a_panic() {
        let logo = RgbaImage::from_pixel(100, 50, Rgba([0, 0, 0, 255]));
        let scaled = scale_to_image(&logo, 40, 40, 1.0); // floor(40 * 0.01) = 0
        assert_eq!(scaled.width(), 0);
    }

    #[test]
    fn scale_does_not_mutate_shared_asset() {
        let logo = RgbaImage::from_pixel(100, 50, Rgba([1, 2, 3, 4]));
        let before = logo.clone();
        let _ = scale_to_image(&logo, 800, 600, 20.0);
        assert_eq!(logo, before);
    }
}
