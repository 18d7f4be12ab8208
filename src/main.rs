// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generates a `_preview.png` beside every font in the `FreeFont` resource tree.
//!
//! Run without arguments to process the tree next to this program's sources.
//! Set `RUST_LOG=debug` for per-font diagnostics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use font_preview::batch::{self, Event, Outcome, Summary};
use font_preview::discover::{find_font_files, find_preview_images, remove_previews};
use font_preview::render::{RenderOptions, DEFAULT_FONT_SIZE};

const RULE_WIDTH: usize = 60;

#[derive(Parser, Debug)]
#[command(
    name = "generate_font_previews",
    version,
    about = "Render a tightly cropped PNG preview beside every font file"
)]
struct Cli {
    /// Font directory to process [default: ../FreeFontPro/Resources/FreeFont relative to this program]
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Font size in pixels per em
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_FONT_SIZE)]
    size: f32,

    /// Transparent margin around the text, in pixels
    #[arg(long, value_name = "PX", default_value_t = 0)]
    padding: u32,

    /// Render this text for every font instead of choosing one from the file name
    #[arg(long)]
    text: Option<String>,

    /// Delete previously generated previews before rendering
    #[arg(long)]
    clean: bool,

    /// Exit with a failure status if no fonts were found or any font failed
    #[arg(long)]
    strict: bool,
}

fn default_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("FreeFontPro")
        .join("Resources")
        .join("FreeFont")
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = cli.root.clone().unwrap_or_else(default_root);
    let options = RenderOptions {
        text: cli.text.clone(),
        font_size: cli.size,
        padding: cli.padding,
    };

    println!("🔍 Searching for fonts in {}", root.display());

    if cli.clean {
        clean(&root)?;
    }

    let fonts = match find_font_files(&root) {
        Ok(fonts) => fonts,
        Err(err) => {
            println!("❌ {err}");
            return Ok(exit_code(cli.strict, false));
        }
    };
    if fonts.is_empty() {
        println!("❌ No font files found");
        return Ok(exit_code(cli.strict, false));
    }
    println!("📝 Found {} font files\n", fonts.len());

    let summary = batch::run(&fonts, &options, report);
    print_summary(&summary);

    Ok(exit_code(cli.strict, summary.failed == 0))
}

fn clean(root: &Path) -> Result<()> {
    println!("\n🗑️  Removing old previews...");
    let stale = find_preview_images(root)?;
    let removed = remove_previews(&stale);
    if removed > 0 {
        println!("✅ Removed {removed} old previews\n");
    } else {
        println!("✅ No old previews to remove\n");
    }
    Ok(())
}

fn report(event: Event<'_>) {
    match event {
        Event::Started { index, total, font } => {
            let name = font.file_name().unwrap_or_default().to_string_lossy();
            println!("[{index}/{total}] Processing: {name}");
        }
        Event::Finished { outcome, .. } => {
            match outcome {
                Outcome::Rendered {
                    output,
                    width,
                    height,
                } => {
                    let name = output.file_name().unwrap_or_default().to_string_lossy();
                    println!("  ✅ Wrote preview: {name} ({width}x{height})");
                }
                Outcome::Failed {
                    font_load: true,
                    reason,
                } => println!("  ⚠️  Could not load font: {reason}"),
                Outcome::Failed { reason, .. } => println!("  ❌ Preview failed: {reason}"),
            }
            println!();
        }
    }
}

fn print_summary(summary: &Summary) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("✨ Done!");
    println!("   Succeeded: {}", summary.succeeded);
    println!("   Failed:    {}", summary.failed);
    println!("   Total:     {}", summary.total);
    println!("{rule}");
}

fn exit_code(strict: bool, ok: bool) -> ExitCode {
    if strict && !ok {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
