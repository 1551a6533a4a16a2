// src/core.rs
pub mod counter;
pub mod ignore;
pub mod scanner;
pub mod source;

use std::num::NonZeroUsize;

use crate::error::Result;
use crate::github::RepoHost;
use crate::models::SourceSpec;
use crate::report::Report;

/// Resolves `spec` and counts it: the whole pipeline behind both front ends.
///
/// # Errors
///
/// Propagates [`source::resolve`] and [`scanner::count_resolved`] errors.
pub fn count<H>(
    spec: &SourceSpec,
    host: &H,
    filters: &scanner::Filters,
    top: NonZeroUsize,
) -> Result<Report>
where
    H: RepoHost + ?Sized,
{
    let resolved = source::resolve(spec, host)?;
    let result = scanner::count_resolved(&resolved, host, filters, top)?;
    Ok(Report {
        label: resolved.label(),
        result,
    })
}
