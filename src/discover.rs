// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finding font files, and the previews generated from them, under a root directory.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::PreviewError;

/// File extensions recognised as fonts, compared case-insensitively.
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Suffix appended to a font's file stem to name its preview image.
pub const PREVIEW_SUFFIX: &str = "_preview.png";

/// Whether `path` has one of the [`FONT_EXTENSIONS`].
pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FONT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Whether `path` names a generated preview image, `Name_preview.png` in any case.
pub fn is_preview_image(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().ends_with(PREVIEW_SUFFIX))
        .unwrap_or(false)
}

/// Recursively collects every font file under `root`.
///
/// A missing root is not an error: it simply contains no fonts. A directory
/// below the root that cannot be read is logged and skipped; only a failure
/// to read the root itself is an error. Entries are sorted by file name within
/// each directory so repeated runs visit fonts in the same order. Symbolic
/// links are not followed.
pub fn find_font_files(root: &Path) -> Result<Vec<PathBuf>, PreviewError> {
    collect(root, is_font_file)
}

/// Recursively collects every previously generated preview image under `root`.
pub fn find_preview_images(root: &Path) -> Result<Vec<PathBuf>, PreviewError> {
    collect(root, is_preview_image)
}

/// Deletes the given preview images, returning how many were removed.
///
/// A file that cannot be removed is logged and skipped.
pub fn remove_previews(paths: &[PathBuf]) -> usize {
    let mut removed = 0;
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!("removed stale preview {}", path.display());
                removed += 1;
            }
            Err(source) => {
                let err = PreviewError::Remove {
                    path: path.clone(),
                    source,
                };
                warn!("{err}");
            }
        }
    }
    removed
}

fn collect(root: &Path, keep: fn(&Path) -> bool) -> Result<Vec<PathBuf>, PreviewError> {
    if !root.is_dir() {
        warn!("{} is not a directory", root.display());
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            // Below the root, an unreadable entry only hides its own subtree.
            Err(source) if source.depth() > 0 => {
                warn!("skipping {source}");
                continue;
            }
            Err(source) => {
                return Err(PreviewError::Walk {
                    path: root.to_path_buf(),
                    source,
                })
            }
        };
        if !entry.file_type().is_file() || !keep(entry.path()) {
            continue;
        }
        debug!("found {}", entry.path().display());
        found.push(entry.into_path());
    }
    Ok(found)
}
