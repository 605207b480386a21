//! CLI output formatting.
//!
//! Each run prints one `Processing:` line per file, an indented result line
//! under it, and a closing one-line summary. Format functions are pure — no
//! I/O, no side effects — with thin `print_*` wrappers, so tests can assert
//! on exact output without capturing stdout.
//!
//! ```text
//! Processing: vacation/day1/beach.jpg
//!     Watermarked: out/vacation/day1/beach.jpg
//! Processing: vacation/day1/broken.jpg
//!     Skipped: failed to decode: ...
//! Watermarked 1 of 2 images (1 skipped)
//! ```

use crate::batch::{FileOutcome, RunEvent, RunSummary};

/// One display line per event.
pub fn format_event(event: &RunEvent) -> String {
    match event {
        RunEvent::Started { source } => format!("Processing: {}", source.display()),
        RunEvent::Finished(FileOutcome::Written { dest, .. }) => {
            format!("    Watermarked: {}", dest.display())
        }
        RunEvent::Finished(FileOutcome::Skipped { reason, .. }) => {
            format!("    Skipped: {reason}")
        }
    }
}

/// Closing line after all files were attempted.
pub fn format_summary(summary: &RunSummary) -> String {
    if summary.outcomes.is_empty() {
        return "No images found".to_string();
    }
    format!(
        "Watermarked {} of {} images ({} skipped)",
        summary.written(),
        summary.outcomes.len(),
        summary.skipped()
    )
}

pub fn print_event(event: &RunEvent) {
    println!("{}", format_event(event));
}

pub fn print_summary(summary: &RunSummary) {
    println!("{}", format_summary(summary));
}
