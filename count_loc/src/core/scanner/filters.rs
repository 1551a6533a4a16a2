// src/core/scanner/filters.rs
use std::collections::BTreeSet;
use std::path::Path;

/// Directory names skipped at any depth unless the caller narrows the set.
pub const DEFAULT_IGNORE_DIRS: [&str; 9] = [
    ".git",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    "dist",
    "build",
    ".idea",
    ".vscode",
];

/// Source-code extensions, used by the bot when no extensions are configured.
pub const SOURCE_EXTENSIONS: [&str; 23] = [
    "py", "js", "ts", "jsx", "tsx", "java", "kt", "go", "rs", "cpp", "c", "h", "hpp", "cs", "php",
    "rb", "swift", "scala", "sh", "html", "css", "scss", "sql",
];

/// Extension-filter item that expands to [`SOURCE_EXTENSIONS`].
pub const SOURCE_PRESET: &str = "source";

/// Extensions whose content is never text.
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "psd", "pdf", "zip", "gz", "tgz",
    "bz2", "xz", "7z", "rar", "jar", "war", "exe", "dll", "so", "dylib", "a", "o", "class", "pyc",
    "wasm", "woff", "woff2", "ttf", "otf", "eot", "mp3", "mp4", "wav", "ogg", "mov", "avi", "webm",
    "sqlite", "db", "bin",
];

/// Extension and directory filters applied to every root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Lowercase, without the leading dot. Empty means every extension.
    extensions: BTreeSet<String>,
    ignore_dirs: BTreeSet<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            extensions: BTreeSet::new(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|&dir| dir.to_owned()).collect(),
        }
    }
}

impl Filters {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts counting to the given extensions (`py`, `.py` and `.PY` are
    /// equivalent). The item `source` adds every [`SOURCE_EXTENSIONS`] entry.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extensions {
            let ext = ext.as_ref().trim();
            if ext.eq_ignore_ascii_case(SOURCE_PRESET) {
                self.extensions
                    .extend(SOURCE_EXTENSIONS.iter().map(|&source| source.to_owned()));
            } else if let Some(ext) = normalize_extension(ext) {
                self.extensions.insert(ext);
            }
        }
        self
    }

    /// Adds directory names to the ignore set.
    #[must_use]
    pub fn with_ignored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_dirs.extend(
            dirs.into_iter()
                .map(|dir| dir.as_ref().trim().trim_matches('/').to_owned())
                .filter(|dir| !dir.is_empty()),
        );
        self
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }

    /// True when a directory component of `rel_path` is an ignored name.
    /// The file name itself is not considered.
    #[must_use]
    pub fn in_ignored_dir(&self, rel_path: &str) -> bool {
        let mut components: Vec<&str> = rel_path.split('/').filter(|c| !c.is_empty()).collect();
        components.pop();
        components.iter().any(|dir| self.is_ignored_dir(dir))
    }

    #[must_use]
    pub fn accepts_extension(&self, rel_path: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        extension_of(rel_path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    #[inline]
    #[must_use]
    pub fn accepts(&self, rel_path: &str) -> bool {
        !self.in_ignored_dir(rel_path) && self.accepts_extension(rel_path)
    }
}

/// True when the extension of `rel_path` marks content that is never text,
/// so the file can be skipped without reading it.
#[must_use]
pub fn is_known_binary(rel_path: &str) -> bool {
    extension_of(rel_path).is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

/// Lowercased extension of the file name in `rel_path`.
fn extension_of(rel_path: &str) -> Option<String> {
    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Splits a comma-separated flag value, dropping blank items.
#[must_use]
pub fn parse_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
}
