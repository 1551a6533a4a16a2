// src/config.rs
use std::collections::HashSet;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::core::scanner::{Filters, SOURCE_PRESET};
use crate::error::{LocError, Result};

pub const CONFIG_FILE_NAME: &str = ".loccount.toml";
pub const DEFAULT_TOP: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// Settings read from `.loccount.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of files listed in a report.
    pub top: NonZeroUsize,
    /// Extensions to count; empty counts every file. `source` stands for the
    /// common source-code extensions.
    pub extensions: Vec<String>,
    /// Directory names ignored on top of the built-in set.
    pub ignore_dirs: Vec<String>,
    pub github: GitHubSettings,
    pub bot: BotSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            extensions: Vec::new(),
            ignore_dirs: Vec::new(),
            github: GitHubSettings::default(),
            bot: BotSettings::default(),
        }
    }
}

impl Config {
    /// Filters from the file, before any command-line overrides.
    #[must_use]
    pub fn filters(&self) -> Filters {
        Filters::new()
            .with_extensions(&self.extensions)
            .with_ignored_dirs(&self.ignore_dirs)
    }

    /// Filters for chat counts: source-code extensions unless the file lists
    /// its own.
    #[must_use]
    pub fn bot_filters(&self) -> Filters {
        if self.extensions.is_empty() {
            Filters::new()
                .with_extensions([SOURCE_PRESET])
                .with_ignored_dirs(&self.ignore_dirs)
        } else {
            self.filters()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitHubSettings {
    pub api_url: String,
    pub raw_url: String,
    /// Environment variable holding an optional API token.
    pub token_env: String,
    pub user_agent: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.github.com"),
            raw_url: String::from("https://raw.githubusercontent.com"),
            token_env: String::from("GITHUB_TOKEN"),
            user_agent: format!("count_loc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotSettings {
    /// Environment variable holding the bot token; it wins over `token`.
    pub token_env: String,
    pub token: Option<String>,
    pub api_url: String,
    pub poll_timeout_secs: u64,
    pub default_top: NonZeroUsize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            token_env: String::from("TELEGRAM_BOT_TOKEN"),
            token: None,
            api_url: String::from("https://api.telegram.org"),
            poll_timeout_secs: 30,
            default_top: DEFAULT_TOP,
        }
    }
}

/// Validated bot configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub api_url: String,
    pub poll_timeout: Duration,
    pub default_top: NonZeroUsize,
}

impl BotConfig {
    /// Resolves the token through `lookup` (an environment reader) first, then
    /// the literal `token` setting.
    ///
    /// # Errors
    ///
    /// Returns [`LocError::Config`] when no non-blank token is available.
    pub fn from_settings<F>(settings: &BotSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(&settings.token_env)
            .filter(|token| !token.trim().is_empty())
            .or_else(|| settings.token.clone())
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                LocError::Config(format!(
                    "bot token is not set; export {} or set bot.token in {CONFIG_FILE_NAME}",
                    settings.token_env
                ))
            })?;

        Ok(Self {
            token,
            api_url: settings.api_url.trim_end_matches('/').to_owned(),
            poll_timeout: Duration::from_secs(settings.poll_timeout_secs),
            default_top: settings.default_top,
        })
    }
}

/// Loads `explicit` when given, otherwise the nearest `.loccount.toml` in
/// `start_dir` or its parents. Missing files yield the defaults.
///
/// # Errors
///
/// This function may return an error if:
/// * An explicit config path cannot be read
/// * A config file contains invalid TOML or unknown keys
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(start_dir),
    };
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| LocError::io(&path, e))?;
    let config = parse_config(&content)
        .map_err(|e| LocError::Config(format!("{}: {e}", path.display())))?;
    tracing::debug!(file = %path.display(), "loaded configuration");
    Ok(config)
}

/// # Errors
///
/// Returns the TOML error when `content` is not a valid configuration.
pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut visited = HashSet::new();
    let mut current_dir = Some(start_dir);
    while let Some(dir) = current_dir {
        if !visited.insert(dir.to_path_buf()) {
            break;
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current_dir = dir.parent();
    }
    None
}
