// tests/integration_tests/edge_cases_test.rs
use super::common::{create_test_file, top};
use anyhow::Result;
use count_loc::{Filters, count_local, count_non_empty_lines};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_empty_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 0);
    assert_eq!(result.total_lines, 0);
    assert!(result.top_files.is_empty());
    Ok(())
}

#[test]
fn test_blank_and_empty_files_still_count_as_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "empty.py", "")?;
    create_test_file(temp_dir.path(), "blank.py", "\n  \n\t\n")?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 2);
    assert_eq!(result.total_lines, 0);
    assert!(result.top_files.iter().all(|f| f.lines == 0));
    Ok(())
}

#[test]
fn test_binary_files_are_skipped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "main.py", "print(1)\n")?;
    fs::write(temp_dir.path().join("logo.png"), [0x89, b'P', b'N', b'G', 0xff, 0xfe, 0x00])?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 1);
    assert_eq!(result.top_files[0].path, "main.py");
    Ok(())
}

#[test]
fn test_line_endings() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "crlf.txt", "a\r\n\r\nb\r\n")?;
    create_test_file(temp_dir.path(), "cr.txt", "a\rb\r\rc")?;
    create_test_file(temp_dir.path(), "no_newline.txt", "a\nb")?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(result.total_lines, 2 + 3 + 2);

    assert_eq!(count_non_empty_lines("a\r\n\r\nb\r\n"), 2);
    assert_eq!(count_non_empty_lines(""), 0);
    Ok(())
}

#[test]
fn test_ignored_name_as_file_is_counted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "build", "not a directory\n")?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let outside = TempDir::new()?;
    create_test_file(outside.path(), "far.py", "a\nb\nc\n")?;
    create_test_file(temp_dir.path(), "near.py", "a\n")?;
    std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("linked"))?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 1);
    assert_eq!(result.total_lines, 1);
    Ok(())
}
