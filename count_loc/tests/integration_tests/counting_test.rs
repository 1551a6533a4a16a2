// tests/integration_tests/counting_test.rs
use super::common::{create_test_file, setup_test_directory, top};
use anyhow::Result;
use count_loc::{FileEntry, Filters, count_local};
use tempfile::TempDir;

#[test]
fn test_counts_every_file_outside_ignored_dirs() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let result = count_local(temp_dir.path(), &Filters::default(), top(10))?;

    assert_eq!(result.files_counted, 5, "ignored directories must not be counted");
    assert_eq!(result.total_lines, 4 + 2 + 6 + 3 + 2);
    assert_eq!(
        result.top_files,
        vec![
            FileEntry::new("lib/deep/model.py", 6),
            FileEntry::new("app.py", 4),
            FileEntry::new("web/index.js", 3),
            FileEntry::new("README.md", 2),
            FileEntry::new("lib/helpers.py", 2),
        ]
    );
    Ok(())
}

#[test]
fn test_extension_filter() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let filters = Filters::new().with_extensions(["py"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;
    assert_eq!(result.files_counted, 3);
    assert_eq!(result.total_lines, 12);

    let filters = Filters::new().with_extensions([".PY", "js"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;
    assert_eq!(result.files_counted, 4);
    assert_eq!(result.total_lines, 15);
    Ok(())
}

#[test]
fn test_mixed_extensions_example() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "a.py", "x = 1\n\ny = 2\nz = 3\n")?;
    create_test_file(temp_dir.path(), "b.md", "# doc\n")?;

    let filters = Filters::new().with_extensions(["py"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;

    assert_eq!(result.files_counted, 1);
    assert_eq!(result.total_lines, 3);
    assert_eq!(result.top_files, vec![FileEntry::new("a.py", 3)]);
    Ok(())
}

#[test]
fn test_top_is_bounded_by_file_count() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    for n in [1, 3, 5, 20] {
        let result = count_local(temp_dir.path(), &Filters::default(), top(n))?;
        assert_eq!(result.top_files.len(), n.min(5), "top {n}");
        assert_eq!(result.files_counted, 5, "truncation must not change the file count");
        assert_eq!(result.total_lines, 17, "truncation must not change the total");
    }
    Ok(())
}

#[test]
fn test_top_files_are_sorted_and_sum_to_at_most_total() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let result = count_local(temp_dir.path(), &Filters::default(), top(3))?;

    assert!(
        result
            .top_files
            .windows(2)
            .all(|pair| pair[0].lines >= pair[1].lines)
    );
    let listed: u64 = result.top_files.iter().map(|f| f.lines).sum();
    assert!(listed <= result.total_lines);
    Ok(())
}

#[test]
fn test_counting_is_idempotent() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let first = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    let second = count_local(temp_dir.path(), &Filters::default(), top(10))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_extra_ignored_dirs() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let filters = Filters::new().with_ignored_dirs(["lib"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;
    assert_eq!(result.files_counted, 3);
    assert!(result.top_files.iter().all(|f| !f.path.starts_with("lib/")));
    Ok(())
}

#[test]
fn test_extension_filter_keeps_empty_matching_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "a.js", &"call();\n".repeat(100))?;
    create_test_file(temp_dir.path(), "a.py", "\n\n")?;

    let filters = Filters::new().with_extensions(["py"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;
    assert_eq!(result.files_counted, 1);
    assert_eq!(result.total_lines, 0);
    assert_eq!(result.top_files, vec![FileEntry::new("a.py", 0)]);
    Ok(())
}
