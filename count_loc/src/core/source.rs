// src/core/source.rs
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{LocError, Result};
use crate::github::RepoHost;
use crate::models::{RemoteTree, ResolvedSource, SourceSpec};

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Classifies user input as a local directory or a GitHub repository URL.
///
/// Accepted forms:
/// * an existing directory (the empty string means `.`)
/// * `https://github.com/<owner>/<repo>` (also without scheme, or ending in `.git`)
/// * `https://github.com/<owner>/<repo>/tree/<branch>/<subpath...>`
///
/// # Errors
///
/// Returns [`LocError::InvalidSource`] for anything else.
pub fn parse_source(raw: &str) -> Result<SourceSpec> {
    let raw = raw.trim();
    if raw.is_empty() {
        return local_source(".");
    }

    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return parse_github_url(raw);
    }
    let looks_like_github = GITHUB_HOSTS
        .iter()
        .any(|host| lower.starts_with(&format!("{host}/")));
    if looks_like_github && !Path::new(raw).exists() {
        return parse_github_url(&format!("https://{raw}"));
    }

    local_source(raw)
}

fn local_source(raw: &str) -> Result<SourceSpec> {
    let path = PathBuf::from(raw);
    if path.is_dir() {
        Ok(SourceSpec::Local { path })
    } else if path.exists() {
        Err(LocError::invalid_source(format!("'{raw}' is not a directory")))
    } else {
        Err(LocError::invalid_source(format!("'{raw}' does not exist")))
    }
}

fn parse_github_url(raw: &str) -> Result<SourceSpec> {
    let url = Url::parse(raw)
        .map_err(|e| LocError::invalid_source(format!("malformed URL '{raw}': {e}")))?;

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !GITHUB_HOSTS.contains(&host.as_str()) {
        return Err(LocError::invalid_source(format!(
            "'{raw}' is not a github.com repository link"
        )));
    }

    let decoded = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(decode_segment)
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    let (owner, repo, rest) = match segments.as_slice() {
        [owner, repo, rest @ ..] => (*owner, repo.strip_suffix(".git").unwrap_or(*repo), rest),
        _ => {
            return Err(LocError::invalid_source(format!(
                "'{raw}' does not name a repository"
            )));
        }
    };
    if repo.is_empty() {
        return Err(LocError::invalid_source(format!(
            "'{raw}' does not name a repository"
        )));
    }

    let (branch, subpath) = match rest {
        [] => (None, None),
        ["tree", branch, subpath @ ..] => {
            let subpath = (!subpath.is_empty()).then(|| subpath.join("/"));
            (Some((*branch).to_owned()), subpath)
        }
        _ => {
            return Err(LocError::invalid_source(format!(
                "'{raw}' is neither a repository nor a /tree/<branch> link"
            )));
        }
    };

    Ok(SourceSpec::Remote {
        owner: owner.to_owned(),
        repo: repo.to_owned(),
        branch,
        subpath,
    })
}

/// Undoes the percent-encoding `Url` applies, so branch and subpath compare
/// equal to the plain paths of the git tree.
fn decode_segment(segment: &str) -> Result<String> {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .map_err(|_| LocError::invalid_source(format!("'{segment}' is not valid UTF-8 once decoded")))
}

/// Turns a parsed source into something the scanner can enumerate.
///
/// Local paths are canonicalized. Remote sources resolve the default branch
/// when none was given, list the tree once, and keep only entries under the
/// subpath.
///
/// # Errors
///
/// This function may return an error if:
/// * A local path cannot be canonicalized
/// * Any GitHub call fails ([`LocError::RemoteFetch`])
/// * The subpath matches nothing in the tree ([`LocError::InvalidSource`])
pub fn resolve<H>(spec: &SourceSpec, host: &H) -> Result<ResolvedSource>
where
    H: RepoHost + ?Sized,
{
    match spec {
        SourceSpec::Local { path } => {
            let root = fs::canonicalize(path).map_err(|e| LocError::io(path, e))?;
            Ok(ResolvedSource::Local(root))
        }
        SourceSpec::Remote {
            owner,
            repo,
            branch,
            subpath,
        } => {
            let branch = match branch {
                Some(branch) => branch.clone(),
                None => host.default_branch(owner, repo)?,
            };
            let listing = host.list_tree(owner, repo, &branch)?;
            if listing.truncated {
                tracing::warn!(
                    %owner, %repo, %branch,
                    "repository tree was truncated by the API; counting the listed files only"
                );
            }

            let subpath = subpath.as_deref().unwrap_or_default().trim_matches('/');
            let entries: Vec<_> = listing
                .entries
                .into_iter()
                .filter(|entry| is_under(&entry.path, subpath))
                .collect();
            if !subpath.is_empty() && entries.is_empty() {
                return Err(LocError::invalid_source(format!(
                    "path '{subpath}' not found in {owner}/{repo}@{branch}"
                )));
            }

            tracing::info!(%owner, %repo, %branch, files = entries.len(), "resolved repository tree");
            Ok(ResolvedSource::Remote(RemoteTree {
                owner: owner.clone(),
                repo: repo.clone(),
                branch,
                subpath: subpath.to_owned(),
                entries,
            }))
        }
    }
}

fn is_under(path: &str, subpath: &str) -> bool {
    subpath.is_empty()
        || path == subpath
        || path
            .strip_prefix(subpath)
            .is_some_and(|rest| rest.starts_with('/'))
}
