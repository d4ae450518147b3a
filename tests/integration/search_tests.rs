use fs_search::cache::CacheStore;
use fs_search::error::SearchError;
use fs_search::search::{SearchOptions, SearchParameters, SearchService};
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

/// `a.txt`, `b.log`, `node_modules/c.txt`
fn scenario() -> TempDir {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("a.txt")).unwrap();
    File::create(dir.path().join("b.log")).unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    File::create(dir.path().join("node_modules").join("c.txt")).unwrap();
    dir
}

fn run(
    base: &Path,
    exts: &[&str],
    dirs: &[&str],
    files_only: bool,
    folders_only: bool,
) -> Vec<String> {
    let cache_dir = TempDir::new().unwrap();
    let params = SearchParameters::resolve(
        base,
        exts.iter().copied(),
        dirs.iter().copied(),
        files_only,
        folders_only,
    )
    .unwrap();
    let service = SearchService::new(CacheStore::new(cache_dir.path().join("cache.json")));
    service
        .search(&params, SearchOptions::default())
        .unwrap()
        .results
}

fn expected(base: &Path, names: &[&str]) -> Vec<String> {
    let root = fs::canonicalize(base).unwrap();
    names
        .iter()
        .map(|name| {
            name.split('/')
                .fold(root.clone(), |p, part| p.join(part))
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn test_scenario_excluding_log_and_node_modules() {
    let dir = scenario();
    let results = run(dir.path(), &[".log"], &["node_modules"], false, false);
    assert_eq!(results, expected(dir.path(), &["a.txt"]));
}

#[test]
fn test_scenario_files_only() {
    let dir = scenario();
    let results = run(dir.path(), &[".log"], &["node_modules"], true, false);
    assert_eq!(results, expected(dir.path(), &["a.txt"]));
}

#[test]
fn test_scenario_without_exclusions() {
    let dir = scenario();
    let results = run(dir.path(), &[], &[], false, false);
    assert_eq!(
        results,
        expected(
            dir.path(),
            &["a.txt", "b.log", "node_modules", "node_modules/c.txt"]
        )
    );
}

#[test]
fn test_scenario_folders_only() {
    let dir = scenario();
    let results = run(dir.path(), &[], &[], false, true);
    assert_eq!(results, expected(dir.path(), &["node_modules"]));
}

#[test]
fn test_scenario_keeps_unpruned_subdirectory() {
    let dir = scenario();
    fs::create_dir(dir.path().join("src")).unwrap();
    File::create(dir.path().join("src").join("lib.rs")).unwrap();

    let results = run(dir.path(), &["log"], &["node_modules"], false, false);
    assert_eq!(results, expected(dir.path(), &["a.txt", "src", "src/lib.rs"]));
}

#[test]
fn test_pruned_directory_never_appears_at_any_depth() {
    let dir = TempDir::new().unwrap();
    let deep = dir.path().join("a").join("b").join("target").join("c");
    fs::create_dir_all(&deep).unwrap();
    File::create(deep.join("x.txt")).unwrap();
    File::create(dir.path().join("a").join("keep.txt")).unwrap();

    let results = run(dir.path(), &[], &["target"], false, false);

    assert!(results.iter().all(|r| !r.contains("target")));
    assert_eq!(results, expected(dir.path(), &["a", "a/b", "a/keep.txt"]));
}

#[test]
fn test_excluded_dir_name_does_not_filter_files() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("build")).unwrap();

    let results = run(dir.path(), &[], &["build"], false, false);
    assert_eq!(results, expected(dir.path(), &["build"]));
}

#[test]
fn test_extension_exclusion_does_not_prune_directories() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("logs.log")).unwrap();
    File::create(dir.path().join("logs.log").join("today.txt")).unwrap();

    let results = run(dir.path(), &["log"], &[], false, false);
    assert_eq!(
        results,
        expected(dir.path(), &["logs.log", "logs.log/today.txt"])
    );
}

#[test]
fn test_extension_match_uses_last_suffix() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("archive.tar.gz")).unwrap();
    File::create(dir.path().join("notes.tar")).unwrap();

    let results = run(dir.path(), &["tar"], &[], false, false);
    assert_eq!(results, expected(dir.path(), &["archive.tar.gz"]));
}

#[test]
fn test_conflicting_modes_rejected_before_filesystem_access() {
    let cache_dir = TempDir::new().unwrap();
    let cache_path = cache_dir.path().join("cache.json");

    let result = SearchParameters::resolve(
        "/this/path/does/not/exist",
        Vec::<String>::new(),
        Vec::<String>::new(),
        true,
        true,
    );

    // The missing path is never looked at.
    assert!(matches!(result, Err(SearchError::ConflictingMode)));
    assert!(!cache_path.exists());
}

#[test]
fn test_missing_base_path() {
    let result = SearchParameters::resolve(
        "/this/path/does/not/exist",
        Vec::<String>::new(),
        Vec::<String>::new(),
        false,
        false,
    );
    match result {
        Err(SearchError::PathNotFound(path)) => {
            assert!(path.to_string_lossy().contains("does/not/exist"));
        }
        other => panic!("Expected PathNotFound, got {:?}", other),
    }
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(run(dir.path(), &[], &[], false, false).is_empty());
}

#[test]
fn test_results_are_absolute() {
    let dir = scenario();
    let results = run(dir.path(), &[], &[], false, false);
    assert!(results.iter().all(|r| Path::new(r).is_absolute()));
}
