// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while discovering fonts and rendering previews.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An error raised by one of the preview stages.
///
/// Failures for a single font never abort a batch; [`crate::batch::run`]
/// turns them into a failed [`Outcome`](crate::batch::Outcome).
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Walking the font tree failed.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        /// The directory being walked.
        path: PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
    /// The font file could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    FontRead {
        /// The font file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The font file was read but is not a usable font.
    #[error("unable to load font {}", .0.display())]
    FontLoad(PathBuf),
    /// Shaping and rasterizing the text produced no visible pixels.
    #[error("no glyph pixels rendered for {0:?}")]
    EmptyRender(String),
    /// The padded canvas is larger than [`MAX_CANVAS_BYTES`](crate::render::MAX_CANVAS_BYTES).
    #[error("canvas of {width}x{height} pixels is too large")]
    Canvas {
        /// Requested canvas width, including padding.
        width: u64,
        /// Requested canvas height, including padding.
        height: u64,
    },
    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
    /// Lossless PNG optimization failed.
    #[error("failed to optimize png: {0}")]
    Optimize(#[from] oxipng::PngError),
    /// Writing the preview image failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The output file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Removing a stale preview failed.
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        /// The stale preview file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl PreviewError {
    /// Whether this is a font load failure rather than a render or write failure.
    pub fn is_font_load(&self) -> bool {
        matches!(self, Self::FontRead { .. } | Self::FontLoad(_))
    }
}
