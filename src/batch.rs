//! Batch discovery and the per-file watermark pipeline.
//!
//! ## Control Flow
//!
//! ```text
//! run
//! ├── prepare logo          (once; failure aborts before any file)
//! ├── load font             (once; failure becomes each file's skip reason)
//! ├── discover files        (recursive, by extension, logo excluded)
//! └── for each file, in walk order:
//!     decode → scale logo → place → paste → render text → encode → write
//! ```
//!
//! Files are handled strictly one at a time and fail independently: a file
//! that cannot be decoded, composited, or written is reported as skipped and
//! the batch moves on. Output bytes are produced fully in memory before
//! anything touches disk, so a mid-pipeline failure leaves no artifact.
//!
//! ## Output Layout
//!
//! Each result lands at the source file's path relative to the source root,
//! re-rooted under the destination directory. Without a destination the
//! source root is the destination, overwriting originals in place.

use crate::compose;
use crate::density;
use crate::encode::{self, OutputFormat};
use crate::geometry::{self, Anchor};
use crate::logo::{self, LogoError};
use crate::text::{self, FontError};
use ab_glyph::FontVec;
use image::{ImageReader, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions the batch picks up, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

/// Everything one run needs: sources, watermark content, placement, output.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_dir: PathBuf,
    pub logo_path: Option<PathBuf>,
    pub text: Option<String>,
    pub anchor: Anchor,
    /// Destination root; `None` overwrites the source tree.
    pub dest_dir: Option<PathBuf>,
    pub padding: i64,
    /// Logo width as a percentage of each image's shorter side.
    pub scale_percent: f32,
    pub logo_opacity: f32,
    pub font_path: PathBuf,
    pub font_size: u32,
    pub text_opacity: f32,
}

impl RunOptions {
    /// Options with the CLI defaults: centered, 20% scale, fully opaque.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            logo_path: None,
            text: None,
            anchor: Anchor::Center,
            dest_dir: None,
            padding: 0,
            scale_percent: 20.0,
            logo_opacity: 1.0,
            font_path: PathBuf::from("DejaVuSans.ttf"),
            font_size: 36,
            text_opacity: 1.0,
        }
    }
}

/// Errors that abort the run before any file is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Logo(#[from] LogoError),
}

/// Per-file failures. These skip the file, never the batch.
#[derive(Error, Debug)]
enum StampError {
    #[error("failed to read: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode: {0}")]
    Decode(image::ImageError),
    #[error("{0}")]
    FontUnavailable(String),
    #[error("no output format for this extension")]
    Format,
    #[error(transparent)]
    Encode(#[from] encode::EncodeError),
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written { source: PathBuf, dest: PathBuf },
    Skipped { source: PathBuf, reason: String },
}

/// Progress notifications, emitted as the run advances.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Started { source: PathBuf },
    Finished(FileOutcome),
}

/// All outcomes of a completed run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

/// Watermark every eligible image under the source directory.
///
/// The logo is prepared once and shared read-only across all files; an
/// unusable logo is the one fatal error. The font is also loaded once, but
/// a font failure surfaces as the skip reason of every file so the run
/// still completes and reports the whole tree.
pub fn run(
    options: &RunOptions,
    mut progress: impl FnMut(&RunEvent),
) -> Result<RunSummary, BatchError> {
    let logo = match &options.logo_path {
        Some(path) => Some(logo::prepare(path, options.logo_opacity)?),
        None => None,
    };
    let font = options
        .text
        .as_ref()
        .map(|_| text::load_font(&options.font_path));

    let dest_root = options
        .dest_dir
        .as_deref()
        .unwrap_or(&options.source_dir)
        .to_path_buf();

    let mut summary = RunSummary::default();
    for source in discover(&options.source_dir, options.logo_path.as_deref()) {
        progress(&RunEvent::Started {
            source: source.clone(),
        });

        let outcome = match stamp_one(&source, logo.as_ref(), font.as_ref(), &dest_root, options) {
            Ok(dest) => FileOutcome::Written { source, dest },
            Err(err) => FileOutcome::Skipped {
                source,
                reason: err.to_string(),
            },
        };

        progress(&RunEvent::Finished(outcome.clone()));
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

/// Enumerate eligible files: recursive, extension-matched, and never the
/// logo itself (same file name anywhere in the tree, case-insensitive).
pub fn discover(source_dir: &Path, logo_path: Option<&Path>) -> Vec<PathBuf> {
    let logo_name = logo_path
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_lowercase());

    WalkDir::new(source_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_eligible(path, logo_name.as_deref()))
        .collect()
}

fn is_eligible(path: &Path, logo_name: Option<&str>) -> bool {
    let has_image_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
    if !has_image_ext {
        return false;
    }

    match (logo_name, path.file_name()) {
        (Some(logo), Some(name)) => name.to_string_lossy().to_lowercase() != logo,
        _ => true,
    }
}

/// The source's path relative to its root, re-rooted under the destination.
fn mirrored_path(source: &Path, source_root: &Path, dest_root: &Path) -> PathBuf {
    match source.strip_prefix(source_root) {
        Ok(rel) => dest_root.join(rel),
        // Discovery only yields paths under the root; fall back to the bare
        // file name rather than splicing an absolute path
        Err(_) => dest_root.join(source.file_name().unwrap_or(source.as_os_str())),
    }
}

/// Decode, composite, encode, and write one file. Returns the written path.
fn stamp_one(
    source: &Path,
    logo: Option<&RgbaImage>,
    font: Option<&Result<FontVec, FontError>>,
    dest_root: &Path,
    options: &RunOptions,
) -> Result<PathBuf, StampError> {
    let decoded = ImageReader::open(source)?
        .decode()
        .map_err(StampError::Decode)?;
    let mut canvas = decoded.to_rgba8();

    if let Some(logo) = logo {
        let scaled = logo::scale_to_image(
            logo,
            canvas.width(),
            canvas.height(),
            options.scale_percent,
        );
        let (x, y) = geometry::resolve(
            options.anchor,
            canvas.dimensions(),
            scaled.dimensions(),
            options.padding,
        );
        compose::paste(&mut canvas, &scaled, x, y);
    }

    if let (Some(content), Some(font_result)) = (&options.text, font) {
        let font = font_result
            .as_ref()
            .map_err(|err| StampError::FontUnavailable(err.to_string()))?;
        text::render_over(
            &mut canvas,
            content,
            options.anchor,
            options.padding,
            font,
            options.font_size,
            options.text_opacity,
        );
    }

    let format = OutputFormat::for_path(source).ok_or(StampError::Format)?;
    let resolution = density::read_density(source).unwrap_or_default();
    let bytes = encode::encode(&canvas, format, resolution)?;

    let dest = mirrored_path(source, &options.source_dir, dest_root);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&dest, bytes)?;
    Ok(dest)
}
