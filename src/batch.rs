// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generating previews for a list of fonts, one after another.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::discover::PREVIEW_SUFFIX;
use crate::render::{RenderOptions, Renderer};

/// Path of the preview image for `font`: same directory, extension replaced
/// by [`PREVIEW_SUFFIX`].
pub fn output_path_for(font: &Path) -> PathBuf {
    let mut name = font.file_stem().unwrap_or_default().to_os_string();
    name.push(PREVIEW_SUFFIX);
    font.with_file_name(name)
}

/// The result of generating one preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The preview was written.
    Rendered {
        /// The preview image.
        output: PathBuf,
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },
    /// The preview could not be generated.
    Failed {
        /// Whether the font itself could not be loaded.
        font_load: bool,
        /// Diagnostic message.
        reason: String,
    },
}

impl Outcome {
    /// Whether the preview was written.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Totals for a finished batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of fonts processed.
    pub total: usize,
    /// Number of previews written.
    pub succeeded: usize,
    /// Number of fonts that failed.
    pub failed: usize,
}

impl Summary {
    /// Adds one outcome to the totals.
    #[must_use]
    pub fn record(self, outcome: &Outcome) -> Self {
        if outcome.is_success() {
            Self {
                total: self.total + 1,
                succeeded: self.succeeded + 1,
                ..self
            }
        } else {
            Self {
                total: self.total + 1,
                failed: self.failed + 1,
                ..self
            }
        }
    }
}

/// Progress notifications emitted by [`run`].
#[derive(Debug)]
pub enum Event<'a> {
    /// Processing of a font is about to start. `index` counts from 1.
    Started {
        /// Position of the font in the batch, starting at 1.
        index: usize,
        /// Number of fonts in the batch.
        total: usize,
        /// The font file.
        font: &'a Path,
    },
    /// Processing of a font finished.
    Finished {
        /// Position of the font in the batch, starting at 1.
        index: usize,
        /// What happened.
        outcome: &'a Outcome,
    },
}

/// Generates a preview beside each font in order and returns the totals.
///
/// A failure for one font is reported through `observer` and counted; it does
/// not stop the batch.
pub fn run(
    fonts: &[PathBuf],
    options: &RenderOptions,
    mut observer: impl FnMut(Event<'_>),
) -> Summary {
    let mut renderer = Renderer::new();
    let total = fonts.len();
    let summary = fonts
        .iter()
        .enumerate()
        .fold(Summary::default(), |summary, (i, font)| {
            let index = i + 1;
            observer(Event::Started { index, total, font });
            let outcome = render_one(&mut renderer, font, options);
            observer(Event::Finished {
                index,
                outcome: &outcome,
            });
            summary.record(&outcome)
        });
    info!(
        "processed {} fonts: {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    summary
}

fn render_one(renderer: &mut Renderer, font: &Path, options: &RenderOptions) -> Outcome {
    let output = output_path_for(font);
    match renderer.render_to_file(font, &output, options) {
        Ok(preview) => Outcome::Rendered {
            output,
            width: preview.width,
            height: preview.height,
        },
        Err(err) => {
            warn!("{}: {err}", font.display());
            Outcome::Failed {
                font_load: err.is_font_load(),
                reason: err.to_string(),
            }
        }
    }
}
