// src/models.rs
pub mod count_result;
pub mod file_entry;
pub mod source_spec;

pub use count_result::{CountResult, Tally};
pub use file_entry::FileEntry;
pub use source_spec::{RemoteEntry, RemoteTree, ResolvedSource, SourceSpec};
