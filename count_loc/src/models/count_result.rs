// src/models/count_result.rs
use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::models::FileEntry;

/// Aggregate of one counting run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountResult {
    pub files_counted: u64,
    pub total_lines: u64,
    /// Largest files first, ties broken by path; at most the requested top-N.
    pub top_files: Vec<FileEntry>,
}

/// Accumulates per-file counts while a walk is in progress.
#[derive(Debug, Default)]
pub struct Tally {
    files: Vec<FileEntry>,
    total_lines: u64,
}

impl Tally {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            total_lines: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, entry: FileEntry) {
        self.total_lines = self.total_lines.saturating_add(entry.lines);
        self.files.push(entry);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn finish(mut self, top: NonZeroUsize) -> CountResult {
        let files_counted = u64::try_from(self.files.len()).unwrap_or(u64::MAX);
        self.files.sort_by(rank);
        self.files.truncate(top.get());
        CountResult {
            files_counted,
            total_lines: self.total_lines,
            top_files: self.files,
        }
    }
}

fn rank(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path))
}
