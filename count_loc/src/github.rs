// src/github.rs
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap};
use serde::Deserialize;

use crate::config::GitHubSettings;
use crate::error::{LocError, Result};
use crate::models::RemoteEntry;

const GIT_SYMLINK_MODE: &str = "120000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A repository tree as listed by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeListing {
    pub entries: Vec<RemoteEntry>,
    /// The host stopped listing before the end of the tree.
    pub truncated: bool,
}

/// Read access to a hosted git repository.
pub trait RepoHost {
    /// # Errors
    ///
    /// Returns [`LocError::RemoteFetch`] when the repository cannot be queried.
    fn default_branch(&self, owner: &str, repo: &str) -> Result<String>;

    /// Lists every regular file of `branch`, recursively.
    ///
    /// # Errors
    ///
    /// Returns [`LocError::RemoteFetch`] when the tree cannot be fetched.
    fn list_tree(&self, owner: &str, repo: &str, branch: &str) -> Result<TreeListing>;

    /// Raw bytes of one file.
    ///
    /// # Errors
    ///
    /// Returns [`LocError::RemoteFetch`] when the content cannot be fetched.
    fn fetch_raw(&self, owner: &str, repo: &str, branch: &str, path: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    mode: String,
    size: Option<u64>,
}

impl TreeItem {
    fn is_regular_file(&self) -> bool {
        self.kind == "blob" && self.mode != GIT_SYMLINK_MODE
    }
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Blocking client for the GitHub REST API and raw content host.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    raw_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Builds a client from settings; `token` is sent as a bearer token when set.
    ///
    /// # Errors
    ///
    /// Returns [`LocError::Config`] when a base URL is malformed or the HTTP
    /// client cannot be built.
    pub fn new(settings: &GitHubSettings, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LocError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: parse_base(&settings.api_url)?,
            raw_url: parse_base(&settings.raw_url)?,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Builds a client, reading the token from the environment variable the
    /// settings name.
    ///
    /// # Errors
    ///
    /// See [`GitHubClient::new`].
    pub fn from_env(settings: &GitHubSettings) -> Result<Self> {
        Self::new(settings, std::env::var(&settings.token_env).ok())
    }

    fn get(&self, url: &Url, accept: &str) -> Result<Response> {
        tracing::debug!(%url, "GET");
        let mut request = self.http.get(url.clone()).header(ACCEPT, accept);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| LocError::RemoteFetch {
            url: url.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limited = is_rate_limited(status, response.headers());
        let body = response.text().unwrap_or_default();
        let message = if rate_limited {
            String::from("GitHub API rate limit exceeded; provide a token to raise the limit")
        } else {
            serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_owned())
        };
        Err(LocError::RemoteFetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message,
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T> {
        self.get(url, "application/vnd.github+json")?
            .json()
            .map_err(|e| LocError::RemoteFetch {
                url: url.to_string(),
                status: None,
                message: format!("unexpected response body: {}", e.without_url()),
            })
    }
}

impl RepoHost for GitHubClient {
    fn default_branch(&self, owner: &str, repo: &str) -> Result<String> {
        let url = endpoint(&self.api_url, ["repos", owner, repo])?;
        let info: RepoInfo = self.get_json(&url)?;
        Ok(info.default_branch)
    }

    fn list_tree(&self, owner: &str, repo: &str, branch: &str) -> Result<TreeListing> {
        let mut url = endpoint(&self.api_url, ["repos", owner, repo, "git", "trees", branch])?;
        url.query_pairs_mut().append_pair("recursive", "1");
        let response: TreeResponse = self.get_json(&url)?;

        let entries = response
            .tree
            .into_iter()
            .filter(TreeItem::is_regular_file)
            .map(|item| RemoteEntry {
                path: item.path,
                size: item.size,
            })
            .collect();
        Ok(TreeListing {
            entries,
            truncated: response.truncated,
        })
    }

    fn fetch_raw(&self, owner: &str, repo: &str, branch: &str, path: &str) -> Result<Vec<u8>> {
        let segments = [owner, repo, branch]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let url = endpoint(&self.raw_url, segments)?;
        let response = self.get(&url, "*/*")?;
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| LocError::RemoteFetch {
                url: url.to_string(),
                status: None,
                message: e.without_url().to_string(),
            })
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| LocError::Config(format!("invalid URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(LocError::Config(format!("'{raw}' cannot be used as a base URL")));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to a base URL.
fn endpoint<'a, I>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| LocError::Config(format!("'{base}' cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS) && exhausted
}
