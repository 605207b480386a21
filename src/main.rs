use clap::Parser;
use imprint::batch::{self, RunOptions};
use imprint::geometry::Anchor;
use imprint::output;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imprint")]
#[command(about = "Add logo and text watermarks to every image under a directory")]
#[command(long_about = "\
Add logo and text watermarks to every image under a directory

Walks the source directory recursively, stamps each jpg/jpeg/png/tif/tiff
it finds, and writes results in place — or into a mirror of the source
tree under --new-dir. The logo is sized per image (a percentage of the
shorter side), so large and small photos get proportionate watermarks.

Examples:

  # Logo in the bottom-right corner of every image, 10px in from the edges
  imprint photos/ logo.png --pos bottomright --padding 10

  # Translucent copyright text, originals untouched
  imprint photos/ --text \"© 2026 Jane Doe\" --text-opacity 0.4 \\
      --font fonts/DejaVuSans.ttf --new-dir watermarked/

  # Both at once
  imprint photos/ logo.png --text \"janedoe.example\" --pos bottomleft

A file that cannot be read or decoded is reported and skipped; the rest
of the batch still runs.")]
#[command(version)]
struct Cli {
    /// Directory containing the images to watermark (searched recursively)
    source_dir: PathBuf,

    /// Logo image to stamp on each file
    logo: Option<PathBuf>,

    /// Text to stamp on each file (white; see --text-opacity)
    #[arg(long)]
    text: Option<String>,

    /// Where the watermark sits on each image
    #[arg(long, value_enum, default_value = "center")]
    pos: Anchor,

    /// Write results under this directory, mirroring the source tree,
    /// instead of overwriting originals
    #[arg(long)]
    new_dir: Option<PathBuf>,

    /// Pixels between the watermark and the anchored edges (negative values
    /// push the watermark past the edge)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    padding: i64,

    /// Logo width as a percentage of each image's shorter side
    #[arg(long, default_value_t = 20.0)]
    scale: f32,

    /// Logo opacity from 0.0 (invisible) to 1.0 (as authored)
    #[arg(long, default_value_t = 1.0)]
    opacity: f32,

    /// Font file for the text watermark
    #[arg(long, default_value = "DejaVuSans.ttf")]
    font: PathBuf,

    /// Text size in pixels
    #[arg(long, default_value_t = 36)]
    fontsize: u32,

    /// Text opacity from 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    text_opacity: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let options = RunOptions {
        source_dir: cli.source_dir,
        logo_path: cli.logo,
        text: cli.text,
        anchor: cli.pos,
        dest_dir: cli.new_dir,
        padding: cli.padding,
        scale_percent: cli.scale,
        logo_opacity: cli.opacity,
        font_path: cli.font,
        font_size: cli.fontsize,
        text_opacity: cli.text_opacity,
    };

    let summary = batch::run(&options, output::print_event)?;
    output::print_summary(&summary);
    Ok(())
}
