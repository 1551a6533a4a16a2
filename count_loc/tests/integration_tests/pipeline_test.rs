// tests/integration_tests/pipeline_test.rs
use super::common::{setup_test_directory, top};
use anyhow::Result;
use count_loc::{
    Filters, LocError, RemoteEntry, RepoHost, ResolvedSource, SourceSpec, TreeListing, count,
    parse_source, resolve,
};
use std::collections::BTreeMap;

struct MemoryHost {
    files: BTreeMap<String, String>,
}

impl MemoryHost {
    fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, body)| ((*path).to_owned(), (*body).to_owned()))
                .collect(),
        }
    }
}

impl RepoHost for MemoryHost {
    fn default_branch(&self, _owner: &str, _repo: &str) -> count_loc::Result<String> {
        Ok(String::from("main"))
    }

    fn list_tree(&self, _owner: &str, _repo: &str, _branch: &str) -> count_loc::Result<TreeListing> {
        Ok(TreeListing {
            entries: self
                .files
                .iter()
                .map(|(path, body)| RemoteEntry {
                    path: path.clone(),
                    size: u64::try_from(body.len()).ok(),
                })
                .collect(),
            truncated: false,
        })
    }

    fn fetch_raw(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
        path: &str,
    ) -> count_loc::Result<Vec<u8>> {
        self.files
            .get(path)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| LocError::RemoteFetch {
                url: format!("raw:{branch}/{path}"),
                status: Some(404),
                message: String::from("Not Found"),
            })
    }
}

#[test]
fn test_local_pipeline() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let host = MemoryHost::new(&[]);

    let spec = parse_source(&temp_dir.path().to_string_lossy())?;
    let report = count(&spec, &host, &Filters::new().with_extensions(["py"]), top(2))?;

    assert_eq!(report.result.files_counted, 3);
    assert_eq!(report.result.top_files.len(), 2);
    assert!(report.render_text().contains("Total non-empty LOC: 12"));
    Ok(())
}

#[test]
fn test_remote_subpath_pipeline() -> Result<()> {
    let host = MemoryHost::new(&[
        ("README.md", "# r\n"),
        ("src/lib.rs", "fn a() {}\n\nfn b() {}\n"),
        ("src/node_modules/dep.js", "x\n"),
        ("src/util/mod.rs", "pub mod x;\n"),
        ("docs/guide.md", "text\n"),
    ]);

    let spec = parse_source("https://github.com/owner/repo/tree/dev/src")?;
    assert_eq!(
        spec,
        SourceSpec::Remote {
            owner: String::from("owner"),
            repo: String::from("repo"),
            branch: Some(String::from("dev")),
            subpath: Some(String::from("src")),
        }
    );

    let report = count(&spec, &host, &Filters::default(), top(10))?;
    assert_eq!(report.label, "owner/repo@dev:src");
    assert_eq!(report.result.files_counted, 2);
    assert_eq!(report.result.total_lines, 3);
    assert_eq!(report.result.top_files[0].path, "lib.rs");
    assert_eq!(report.result.top_files[1].path, "util/mod.rs");
    Ok(())
}

#[test]
fn test_remote_resolve_uses_default_branch() -> Result<()> {
    let host = MemoryHost::new(&[("a.py", "x\n")]);

    let spec = parse_source("https://github.com/owner/repo")?;
    let ResolvedSource::Remote(tree) = resolve(&spec, &host)? else {
        panic!("expected a remote tree");
    };
    assert_eq!(tree.branch, "main");
    assert_eq!(tree.entries.len(), 1);
    Ok(())
}

#[test]
fn test_invalid_sources() {
    let host = MemoryHost::new(&[("a.py", "x\n")]);

    assert!(matches!(
        parse_source("https://example.com/owner/repo"),
        Err(LocError::InvalidSource(_))
    ));
    assert!(matches!(
        parse_source("/definitely/not/here/for/count_loc"),
        Err(LocError::InvalidSource(_))
    ));

    let missing = SourceSpec::Remote {
        owner: String::from("owner"),
        repo: String::from("repo"),
        branch: Some(String::from("main")),
        subpath: Some(String::from("nope")),
    };
    assert!(matches!(
        count(&missing, &host, &Filters::default(), top(10)),
        Err(LocError::InvalidSource(_))
    ));
}

#[test]
fn test_remote_encoded_subpath_pipeline() -> Result<()> {
    let host = MemoryHost::new(&[
        ("my docs/intro.py", "print(1)\n\nprint(2)\n"),
        ("папка/код.py", "x = 1\n"),
        ("other.py", "y = 2\n"),
    ]);

    let spaced = parse_source("https://github.com/owner/repo/tree/main/my%20docs")?;
    let report = count(&spaced, &host, &Filters::default(), top(10))?;
    assert_eq!(report.result.files_counted, 1);
    assert_eq!(report.result.total_lines, 2);

    let cyrillic = parse_source(
        "https://github.com/owner/repo/tree/main/%D0%BF%D0%B0%D0%BF%D0%BA%D0%B0",
    )?;
    let report = count(&cyrillic, &host, &Filters::default(), top(10))?;
    assert_eq!(report.result.files_counted, 1);
    assert_eq!(report.result.top_files[0].path, "код.py");
    Ok(())
}
