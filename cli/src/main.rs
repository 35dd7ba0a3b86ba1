use anyhow::{Context, Result};
use clap::Parser;
use collector::walker::DEFAULT_MAX_DEPTH;
use collector::{FatImage, WalkOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod report;

use report::{write_boot_sector, TextReport};

/// Inspect the boot sector and directory tree of a FAT12/16 image.
#[derive(Parser, Debug)]
#[command(name = "fatscope", version, about)]
struct Args {
    /// Path to the raw volume image
    image: PathBuf,

    /// Deepest directory level to descend into (root entries are level 0)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Also report the "." and ".." entries of every subdirectory
    #[arg(long)]
    show_dot_entries: bool,

    /// Print entry counts after the listing
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    // RUST_LOG overrides; guard warnings are shown by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Inspecting {:?}", args.image);

    let image = FatImage::open(&args.image)
        .with_context(|| format!("Failed to open FAT image {:?}", args.image))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_boot_sector(&mut out, image.geometry())?;

    writeln!(out, "Root catalog info:")?;
    let options = WalkOptions {
        max_depth: args.max_depth,
        include_dot_entries: args.show_dot_entries,
    };
    let mut report = TextReport::new(out);
    let summary = image
        .walker(options)
        .walk(&mut report)
        .context("Directory walk aborted")?;

    let mut out = report.into_inner();
    if args.summary {
        writeln!(
            out,
            "{} files, {} directories, {} deleted, {} subdirectories skipped",
            summary.files, summary.directories, summary.deleted, summary.skipped_directories
        )?;
    }
    out.flush()?;
    Ok(())
}
