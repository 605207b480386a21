//! # Imprint
//!
//! Batch watermarking for image directories. Point it at a folder and it
//! stamps a logo and/or a text string onto every image underneath, writing
//! results in place or into a mirrored output tree.
//!
//! # Architecture: Prepare Once, Stamp Each
//!
//! ```text
//! 1. Prepare   logo file  →  shared RGBA asset (opacity pre-applied)
//! 2. Discover  source/    →  eligible files (jpg, jpeg, png, tif, tiff)
//! 3. Stamp     each file  →  scale logo → place → composite → encode → write
//! ```
//!
//! The logo is decoded and opacity-adjusted exactly once per run; every file
//! then gets its own proportionally scaled copy, so a 4000px photo and a
//! 600px thumbnail both end up with a watermark sized to *them*. Files are
//! processed strictly one at a time, and each file fails independently — a
//! corrupt image is reported and skipped, never aborting the batch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Anchor positions — pure placement math for overlays |
//! | [`logo`] | Logo asset loading, opacity adjustment, per-image scaling |
//! | [`text`] | Text watermarks — font loading and white-text layer rendering |
//! | [`compose`] | Alpha compositing: corner paste and full-canvas blend |
//! | [`density`] | Embedded resolution (DPI) metadata: read from sources, patch into outputs |
//! | [`encode`] | Output format selection and PNG/JPEG encoding |
//! | [`batch`] | Discovery, per-file pipeline, outcome collection |
//! | [`output`] | CLI progress and summary formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resizing (Lanczos3), compositing, and encoding all come from the
//! `image` crate family; text goes through `imageproc` + `ab_glyph`. No
//! ImageMagick, no system libraries — the binary is self-contained.
//!
//! ## Lossless Where the Source Was
//!
//! PNG and TIFF sources are written back as PNG with the alpha channel
//! intact. JPEG sources are flattened to RGB (JPEG has no alpha) and encoded
//! at maximum quality. Embedded resolution metadata (JFIF density, PNG pHYs,
//! TIFF resolution tags) is carried over to the output, defaulting to 72×72
//! when the source has none.
//!
//! ## Per-File Outcomes, Not Exceptions
//!
//! Every file produces a [`batch::FileOutcome`] — written or skipped with a
//! reason — collected into a [`batch::RunSummary`]. The only fatal error is
//! an unusable logo, caught before any image is touched.

pub mod batch;
pub mod compose;
pub mod density;
pub mod encode;
pub mod geometry;
pub mod logo;
pub mod output;
pub mod text;

#[cfg(test)]
pub(crate) mod test_helpers;
