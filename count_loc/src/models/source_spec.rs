// src/models/source_spec.rs
use std::fmt;
use std::path::PathBuf;

/// Where to count, as parsed from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Local {
        path: PathBuf,
    },
    Remote {
        owner: String,
        repo: String,
        /// `None` means the repository's default branch.
        branch: Option<String>,
        /// `None` means the repository root.
        subpath: Option<String>,
    },
}

impl SourceSpec {
    #[inline]
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => write!(f, "{}", path.display()),
            Self::Remote {
                owner,
                repo,
                branch,
                subpath,
            } => {
                write!(f, "https://github.com/{owner}/{repo}")?;
                if let Some(branch) = branch {
                    write!(f, "/tree/{branch}")?;
                    if let Some(subpath) = subpath {
                        write!(f, "/{subpath}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// A regular file listed in a repository tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Repository-rooted, `/`-separated.
    pub path: String,
    pub size: Option<u64>,
}

/// A repository tree narrowed to the requested subpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTree {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Empty for the repository root.
    pub subpath: String,
    pub entries: Vec<RemoteEntry>,
}

impl RemoteTree {
    /// Path of `entry` relative to the subpath this tree was narrowed to.
    #[must_use]
    pub fn relative_path<'a>(&self, entry: &'a RemoteEntry) -> &'a str {
        if self.subpath.is_empty() {
            return &entry.path;
        }
        entry
            .path
            .strip_prefix(self.subpath.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&entry.path)
    }
}

/// A source made concrete: something the scanner can enumerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    Local(PathBuf),
    Remote(RemoteTree),
}

impl ResolvedSource {
    /// Human-readable identifier printed at the top of a report.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Remote(tree) => {
                let mut label = format!("{}/{}@{}", tree.owner, tree.repo, tree.branch);
                if !tree.subpath.is_empty() {
                    label.push(':');
                    label.push_str(&tree.subpath);
                }
                label
            }
        }
    }
}
