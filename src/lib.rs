// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font Preview batch-renders a short sample string for every font file in a
//! directory tree and writes it beside the font as a tightly cropped,
//! transparent PNG.
//!
//! The pipeline has three stages:
//!
//! - [`discover`] finds `.ttf`, `.otf` and `.ttc` files under a root.
//! - [`sample`] picks a sample string from the font's file name.
//! - [`render`] measures the text's tight bounding box, draws it onto a canvas of
//!   exactly that size (plus optional padding) and encodes the PNG.
//!
//! [`batch::run`] chains them over a list of fonts, turning every per-font
//! failure into an [`Outcome`](batch::Outcome) so that one bad font never stops
//! the batch.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use font_preview::batch;
//! use font_preview::discover::find_font_files;
//! use font_preview::render::RenderOptions;
//!
//! let fonts = find_font_files(Path::new("Resources/FreeFont"))?;
//! let summary = batch::run(&fonts, &RenderOptions::default(), |_| {});
//! assert_eq!(summary.total, fonts.len());
//! # Ok::<(), font_preview::PreviewError>(())
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

pub mod batch;
pub mod discover;
pub mod error;
pub mod render;
pub mod sample;

pub use error::PreviewError;
pub use render::{BoundingBox, RenderOptions, Renderer};
pub use sample::PreviewText;
