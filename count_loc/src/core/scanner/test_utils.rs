// src/core/scanner/test_utils.rs
use anyhow::Result;
use std::fs::{self, File};
use std::io::Write as _;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.path().join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&file_path)?;
    file.write_all(content.as_bytes())?;
    Ok(file_path)
}

pub fn setup_test_directory() -> Result<TempDir> {
    let dir = TempDir::new()?;

    create_test_file(&dir, "main.py", "import os\n\nprint(os.name)\n\n\nexit(0)\n")?;
    create_test_file(&dir, "lib/util.py", "def f():\n    return 1\n")?;
    create_test_file(&dir, "README.md", "# Title\n\n")?;
    create_test_file(&dir, "empty.py", "\n   \n")?;

    create_test_file(&dir, "node_modules/pkg/index.js", "a\nb\nc\nd\n")?;
    create_test_file(&dir, ".git/config", "[core]\n")?;

    Ok(dir)
}

pub fn top(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("top must be non-zero")
}
