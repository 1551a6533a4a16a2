// src/core/ignore/loader.rs
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use crate::core::ignore::Patterns;
use crate::error::{LocError, Result};

pub const IGNORE_FILE_NAME: &str = ".locignore";

/// Loads ignore patterns from the `.locignore` file in `dir`, or in the
/// nearest parent directory that has one. Only the first file found is used.
///
/// Patterns keep the meaning they have in their own directory: a file found
/// in a parent is matched against paths rebased onto that parent.
///
/// # Errors
///
/// This function may return an error if:
/// * The ignore file exists but cannot be read
/// * The file contains invalid pattern syntax
#[inline]
pub fn load_ignore_patterns(root: &Path) -> Result<Patterns> {
    let mut patterns = Patterns::new();
    let mut visited = HashSet::new();
    let mut current_dir = Some(root);

    while let Some(dir) = current_dir {
        if !visited.insert(dir.to_path_buf()) {
            break;
        }

        let ignore_file = dir.join(IGNORE_FILE_NAME);
        if ignore_file.is_file() {
            let content =
                fs::read_to_string(&ignore_file).map_err(|e| LocError::io(&ignore_file, e))?;
            for line in content.lines() {
                patterns.add_pattern(line)?;
            }
            patterns = patterns.with_base(base_of(root, dir));
            tracing::debug!(file = %ignore_file.display(), base = patterns.base(), "loaded ignore patterns");
            break;
        }

        current_dir = dir.parent();
    }

    Ok(patterns)
}

/// `root` relative to the directory holding the ignore file, `/`-joined.
fn base_of(root: &Path, ignore_dir: &Path) -> String {
    root.strip_prefix(ignore_dir)
        .map(|rel| {
            rel.components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}
