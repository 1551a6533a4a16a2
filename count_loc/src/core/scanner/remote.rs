// src/core/scanner/remote.rs
use std::num::NonZeroUsize;

use crate::core::counter::{count_non_empty_lines, decode_text};
use crate::core::scanner::{Filters, is_known_binary};
use crate::error::Result;
use crate::github::RepoHost;
use crate::models::{CountResult, FileEntry, RemoteTree, Tally};

/// Counts non-empty lines in every listed file of a repository tree,
/// fetching contents one file at a time.
///
/// Filters see paths relative to the tree's subpath, matching what a local
/// scan of the same folder would see. Files whose extension marks them as
/// binary are skipped without a download.
///
/// # Errors
///
/// Returns the first fetch error; nothing is retried.
pub fn count_remote<H>(
    tree: &RemoteTree,
    host: &H,
    filters: &Filters,
    top: NonZeroUsize,
) -> Result<CountResult>
where
    H: RepoHost + ?Sized,
{
    let mut tally = Tally::new();

    for entry in &tree.entries {
        let rel_path = tree.relative_path(entry);
        if !filters.accepts(rel_path) {
            continue;
        }
        if is_known_binary(rel_path) {
            tracing::debug!(path = %entry.path, "skipping binary file without fetching");
            continue;
        }

        tracing::debug!(path = %entry.path, size = ?entry.size, "fetching");
        let bytes = host.fetch_raw(&tree.owner, &tree.repo, &tree.branch, &entry.path)?;
        let Some(text) = decode_text(bytes) else {
            tracing::debug!(path = %entry.path, "skipping non-text file");
            continue;
        };
        tally.record(FileEntry::new(rel_path, count_non_empty_lines(&text)));
    }

    tracing::info!(
        repo = %format!("{}/{}", tree.owner, tree.repo),
        branch = %tree.branch,
        files = tally.len(),
        "remote scan finished"
    );
    Ok(tally.finish(top))
}
