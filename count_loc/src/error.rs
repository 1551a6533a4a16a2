// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Guidance appended to every rejected source string.
pub const ACCEPTED_SOURCES: &str = "expected an existing local directory, \
https://github.com/<owner>/<repo>, or https://github.com/<owner>/<repo>/tree/<branch>/<path>";

#[derive(Debug, Error)]
pub enum LocError {
    #[error("Invalid source: {0} ({ACCEPTED_SOURCES})")]
    InvalidSource(String),

    #[error("{}", fetch_message(url, *status, message))]
    RemoteFetch {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid ignore pattern: {0}")]
    Ignore(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LocError {
    pub(crate) fn invalid_source(detail: impl Into<String>) -> Self {
        Self::InvalidSource(detail.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status of a failed remote call, when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteFetch { status, .. } => *status,
            _ => None,
        }
    }
}

fn fetch_message(url: &str, status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Remote fetch failed with HTTP {code} for {url}: {message}"),
        None => format!("Remote fetch failed for {url}: {message}"),
    }
}

pub type Result<T> = std::result::Result<T, LocError>;
