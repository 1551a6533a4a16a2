// src/core/scanner.rs
mod filters;
mod local;
mod remote;
#[cfg(test)]
pub(crate) mod test_utils;

use std::num::NonZeroUsize;

pub use filters::{
    DEFAULT_IGNORE_DIRS, Filters, SOURCE_EXTENSIONS, SOURCE_PRESET, is_known_binary, parse_csv,
};
pub use local::count_local;
pub use remote::count_remote;

use crate::error::Result;
use crate::github::RepoHost;
use crate::models::{CountResult, ResolvedSource};

/// Counts every file of a resolved source that passes `filters`.
///
/// # Errors
///
/// Propagates IO, walk and remote fetch errors. Files that are not valid
/// UTF-8 are skipped, not reported.
#[inline]
pub fn count_resolved<H>(
    source: &ResolvedSource,
    host: &H,
    filters: &Filters,
    top: NonZeroUsize,
) -> Result<CountResult>
where
    H: RepoHost + ?Sized,
{
    match source {
        ResolvedSource::Local(root) => count_local(root, filters, top),
        ResolvedSource::Remote(tree) => count_remote(tree, host, filters, top),
    }
}
