// src/core/scanner/local.rs
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::core::counter::{count_non_empty_lines, decode_text};
use crate::core::ignore::{Patterns, load_ignore_patterns};
use crate::core::scanner::Filters;
use crate::error::{LocError, Result};
use crate::models::{CountResult, FileEntry, Tally};

/// Counts non-empty lines in every file below `root`.
///
/// Ignored directories are pruned without descending, `.locignore` patterns
/// apply to root-relative paths, and symlinks are not followed. Entries are
/// visited in file-name order so repeated runs see the same sequence.
///
/// # Errors
///
/// This function may return an error if:
/// * The directory cannot be accessed or read
/// * A file cannot be read
/// * The `.locignore` file cannot be parsed
pub fn count_local(root: &Path, filters: &Filters, top: NonZeroUsize) -> Result<CountResult> {
    let patterns = load_ignore_patterns(root)?;
    let mut tally = Tally::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !should_exclude(e, root, filters, &patterns))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = relative_path(root, entry.path());
        if !filters.accepts_extension(&rel_path) {
            continue;
        }

        let bytes = fs::read(entry.path()).map_err(|e| LocError::io(entry.path(), e))?;
        let Some(text) = decode_text(bytes) else {
            tracing::debug!(path = %rel_path, "skipping non-text file");
            continue;
        };
        let lines = count_non_empty_lines(&text);
        tracing::trace!(path = %rel_path, lines, "counted");
        tally.record(FileEntry::new(rel_path, lines));
    }

    tracing::info!(root = %root.display(), files = tally.len(), "local scan finished");
    Ok(tally.finish(top))
}

/// Decides whether a walk entry (and, for directories, everything below it)
/// is skipped. The root itself is never excluded.
fn should_exclude(entry: &DirEntry, root: &Path, filters: &Filters, patterns: &Patterns) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    let is_dir = entry.file_type().is_dir();
    if is_dir && entry.file_name().to_str().is_some_and(|name| filters.is_ignored_dir(name)) {
        return true;
    }

    !patterns.is_empty() && patterns.matches(&relative_path(root, entry.path()), is_dir)
}

/// `path` relative to `root`, joined with `/` on every platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
