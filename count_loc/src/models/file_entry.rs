// src/models/file_entry.rs

/// One counted file: its root-relative path (always `/`-separated) and its
/// number of non-empty lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub lines: u64,
}

impl FileEntry {
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, lines: u64) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }
}
