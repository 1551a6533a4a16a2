// tests/integration_tests/ignore_patterns_test.rs
use super::common::{create_ignore_file, create_test_file, setup_test_directory, top};
use anyhow::Result;
use count_loc::{Filters, count_local, load_ignore_patterns};

#[test]
fn test_locignore_excludes_files_and_dirs() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_ignore_file(temp_dir.path(), &["*.md", "web/"])?;

    let filters = Filters::new().with_extensions(["py", "js", "md"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;

    let paths: Vec<&str> = result.top_files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["lib/deep/model.py", "app.py", "lib/helpers.py"]);
    assert_eq!(result.files_counted, 3);
    Ok(())
}

#[test]
fn test_locignore_negation() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_ignore_file(temp_dir.path(), &["*.py", "!app.py"])?;

    let filters = Filters::new().with_extensions(["py"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;
    assert_eq!(result.files_counted, 1);
    assert_eq!(result.top_files[0].path, "app.py");
    Ok(())
}

#[test]
fn test_anchored_pattern_only_matches_at_root() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_test_file(temp_dir.path(), "lib/app.py", "x = 1\n")?;
    create_ignore_file(temp_dir.path(), &["/app.py"])?;

    let filters = Filters::new().with_extensions(["py"]);
    let result = count_local(temp_dir.path(), &filters, top(10))?;
    let paths: Vec<&str> = result.top_files.iter().map(|f| f.path.as_str()).collect();
    assert!(!paths.contains(&"app.py"));
    assert!(paths.contains(&"lib/app.py"));
    Ok(())
}

#[test]
fn test_ignore_file_found_in_parent() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_ignore_file(temp_dir.path(), &["model.py"])?;

    let lib = temp_dir.path().join("lib");
    let patterns = load_ignore_patterns(&lib)?;
    assert!(patterns.matches("deep/model.py", false));

    let result = count_local(&lib, &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 1);
    assert_eq!(result.top_files[0].path, "helpers.py");
    Ok(())
}

#[test]
fn test_parent_ignore_file_anchors_at_its_own_dir() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_ignore_file(temp_dir.path(), &["/lib/deep/", "lib/"])?;

    let lib = temp_dir.path().join("lib");
    let result = count_local(&lib, &Filters::default(), top(10))?;
    assert_eq!(result.files_counted, 1);
    assert_eq!(result.top_files[0].path, "helpers.py");

    let deep = count_local(&lib.join("deep"), &Filters::default(), top(10))?;
    assert_eq!(deep.files_counted, 1, "the scanned root is never hidden by its own name");
    Ok(())
}

#[test]
fn test_invalid_pattern_is_reported() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    create_ignore_file(temp_dir.path(), &["src/{a,b"])?;

    let err = count_local(temp_dir.path(), &Filters::default(), top(10))
        .expect_err("unbalanced braces must fail");
    assert!(err.to_string().contains("ignore pattern"));
    Ok(())
}
