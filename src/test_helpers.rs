//! Shared test utilities: synthetic image fixtures and font discovery.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Write a solid-color RGBA PNG fixture.
pub fn write_png(path: &Path, width: u32, height: u32, px: [u8; 4]) {
    let img = RgbaImage::from_pixel(width, height, Rgba(px));
    img.save(path).unwrap();
}

/// Locate a TTF font on the host, if any.
///
/// Rendering tests return early when this comes up empty, the same way
/// tests against real sample files do — the logic under test is still
/// covered wherever a font exists (CI images and dev machines alike).
pub fn system_font_path() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    for candidate in CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // Fall back to the first .ttf anywhere under the usual font roots
    for root in ["/usr/share/fonts", "/usr/local/share/fonts"] {
        let found = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .find(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
            });
        if found.is_some() {
            return found;
        }
    }
    None
}
