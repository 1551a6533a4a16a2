// src/lib.rs
pub mod bot;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod github;
pub mod logging;
pub mod models;
pub mod report;

pub use crate::cli::{Args, execute, run};
pub use crate::config::{BotConfig, Config, load_config};
pub use crate::core::count;
pub use crate::core::counter::count_non_empty_lines;
pub use crate::core::ignore::{Patterns, load_ignore_patterns};
pub use crate::core::scanner::{
    DEFAULT_IGNORE_DIRS, Filters, SOURCE_EXTENSIONS, count_local, count_remote, count_resolved,
};
pub use crate::core::source::{parse_source, resolve};
pub use crate::error::{LocError, Result};
pub use crate::github::{GitHubClient, RepoHost, TreeListing};
pub use crate::models::{
    CountResult, FileEntry, RemoteEntry, RemoteTree, ResolvedSource, SourceSpec,
};
pub use crate::report::Report;
