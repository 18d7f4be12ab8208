// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod font;

use std::path::{Path, PathBuf};

use image::RgbaImage;

pub(crate) use font::{box_font, tall_box_font};

/// Writes `data` to `root/relative`, creating parent directories.
pub(crate) fn write_file(root: &Path, relative: &str, data: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, data).unwrap();
    path
}

/// Decodes a PNG written by the renderer.
pub(crate) fn load_png(path: &Path) -> RgbaImage {
    image::open(path)
        .unwrap_or_else(|err| panic!("failed to decode {}: {err}", path.display()))
        .to_rgba8()
}

/// Whether every pixel outside the `padding` border is fully transparent.
pub(crate) fn border_is_transparent(image: &RgbaImage, padding: u32) -> bool {
    image.enumerate_pixels().all(|(x, y, pixel)| {
        let inside = x >= padding
            && y >= padding
            && x < image.width() - padding
            && y < image.height() - padding;
        inside || pixel.0[3] == 0
    })
}

/// Whether any pixel carries coverage.
pub(crate) fn has_ink(image: &RgbaImage) -> bool {
    image.pixels().any(|pixel| pixel.0[3] != 0)
}
