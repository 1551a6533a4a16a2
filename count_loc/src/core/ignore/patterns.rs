// src/core/ignore/patterns.rs
use std::borrow::Cow;

use glob::{MatchOptions, Pattern};

use crate::error::{LocError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
struct Rule {
    /// Alternatives produced by brace expansion and depth prefixes.
    globs: Vec<Pattern>,
    negated: bool,
    dir_only: bool,
}

impl Rule {
    fn hits(&self, path: &str) -> bool {
        self.globs
            .iter()
            .any(|glob| glob.matches_with(path, MATCH_OPTIONS))
    }
}

/// Gitignore-style patterns read from a `.locignore` file.
///
/// Paths handed to [`Patterns::matches`] are relative to the scanned root and
/// use `/` separators. When several rules match, the last one wins.
#[derive(Debug, Default)]
pub struct Patterns {
    rules: Vec<Rule>,
    /// Scanned root relative to the ignore file's directory; empty when they
    /// are the same.
    base: String,
}

impl Patterns {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: Vec::new(),
            base: String::new(),
        }
    }

    /// Rebases matching onto the ignore file's directory.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into().trim_matches('/').to_owned();
        self
    }

    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Adds one line of an ignore file.
    ///
    /// Handles:
    /// - blank lines and `#` comments (skipped)
    /// - negation with a `!` prefix
    /// - directory-only patterns ending with `/`
    /// - patterns anchored to the root with a leading `/`
    /// - extension groups like `*.{js,ts}`
    ///
    /// # Errors
    ///
    /// Returns [`LocError::Ignore`] when the line has unbalanced braces or
    /// invalid glob syntax.
    pub fn add_pattern(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (line, negated) = line
            .strip_prefix('!')
            .map_or((line, false), |stripped| (stripped, true));
        let (line, dir_only) = line
            .strip_suffix('/')
            .map_or((line, false), |stripped| (stripped, true));
        let (line, anchored) = line
            .strip_prefix('/')
            .map_or((line, false), |stripped| (stripped, true));
        if line.is_empty() {
            return Ok(());
        }

        // A slash in the middle ties the pattern to the root, as in gitignore.
        let anchored = anchored || line.contains('/');

        let mut globs = Vec::new();
        for alternative in expand_braces(line)? {
            let sources = if anchored {
                vec![alternative]
            } else {
                vec![alternative.clone(), format!("**/{alternative}")]
            };
            for source in sources {
                let glob = Pattern::new(&source)
                    .map_err(|e| LocError::Ignore(format!("{source}: {e}")))?;
                globs.push(glob);
            }
        }

        self.rules.push(Rule {
            globs,
            negated,
            dir_only,
        });
        Ok(())
    }

    /// Reports whether `path` is ignored. A path is also ignored when one of
    /// its ancestor directories below the scanned root is.
    #[must_use]
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        let path = path.trim_matches('/');
        let full = if self.base.is_empty() {
            Cow::Borrowed(path)
        } else {
            Cow::Owned(format!("{}/{path}", self.base))
        };

        let mut ignored = false;
        for rule in &self.rules {
            let direct = rule.hits(&full) && (is_dir || !rule.dir_only);
            let inherited = ancestors(&full)
                .filter(|dir| dir.len() > self.base.len())
                .any(|dir| rule.hits(dir));
            if direct || inherited {
                ignored = !rule.negated;
            }
        }
        ignored
    }
}

/// Proper ancestor directories of a relative path, shortest first.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(idx, _)| &path[..idx])
}

fn expand_braces(pattern: &str) -> Result<Vec<String>> {
    let Some(open) = pattern.find('{') else {
        if pattern.contains('}') {
            return Err(LocError::Ignore(format!(
                "{pattern}: closing brace without opening brace"
            )));
        }
        return Ok(vec![pattern.to_owned()]);
    };
    let close = pattern[open..]
        .find('}')
        .map(|offset| open + offset)
        .ok_or_else(|| LocError::Ignore(format!("{pattern}: missing closing brace")))?;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut expanded = Vec::new();
    for alternative in pattern[open + 1..close].split(',') {
        for rest in expand_braces(suffix)? {
            expanded.push(format!("{prefix}{}{rest}", alternative.trim()));
        }
    }
    Ok(expanded)
}
