//! Clip retention
//!
//! After each rotation the recorder deletes the oldest clips until the
//! configured cap holds. Only regular files with the active format's
//! extension, directly inside the clip directory, are ever considered.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Delete oldest clips until at most `max_clips` remain
///
/// Files are ordered by modification time ascending; deletion starts from
/// the oldest. A failed deletion is logged and the pass moves on to the
/// next candidate. Returns the number of files actually deleted.
pub fn enforce_retention(dir: &Path, max_clips: usize, extension: &str) -> usize {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Retention: cannot list clip directory");
            return 0;
        }
    };

    let mut clips: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => clips.push((path, modified)),
            Err(e) => {
                tracing::warn!(clip = %path.display(), error = %e, "Retention: cannot stat clip");
            }
        }
    }

    if clips.len() <= max_clips {
        return 0;
    }

    clips.sort_by_key(|(_, modified)| *modified);

    let excess = clips.len() - max_clips;
    let mut deleted = 0;
    for (path, _) in clips.into_iter().take(excess) {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(clip = %path.display(), "Removed old clip");
                deleted += 1;
            }
            Err(e) => {
                tracing::warn!(clip = %path.display(), error = %e, "Could not remove old clip");
            }
        }
    }

    deleted
}
