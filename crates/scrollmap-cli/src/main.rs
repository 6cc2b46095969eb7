//! scrollmap - turn a large image into a scrolling Scratch 3 map

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrollmap")]
#[command(author, version, about = "Turn a large image into a scrolling Scratch 3 map project")]
#[command(long_about = "
Cuts an image into stage-sized, overlapping tiles and writes a Scratch 3
project (.sb3) that scrolls over them with the arrow keys.

Examples:
  scrollmap world.png world.sb3
  scrollmap photo.jpg map.sb3
")]
struct Cli {
    /// Source image (PNG or JPEG)
    input: PathBuf,

    /// Destination project file (.sb3)
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let summary = scrollmap_cli::run(&cli.input, &cli.output)?;
    println!(
        "Wrote {} ({} tiles, {} assets, {} bytes)",
        summary.path.display(),
        summary.tiles,
        summary.assets,
        summary.bytes
    );
    Ok(())
}
