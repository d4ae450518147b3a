use fs_search::cache::{CacheKey, CacheStore};
use fs_search::output::to_relative;
use fs_search::search::{SearchOptions, SearchParameters, SearchService};
use std::fs::{self, File};
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn search(base: &Path, exts: &[&str]) -> Vec<String> {
    let cache_dir = tempdir().unwrap();
    let params =
        SearchParameters::resolve(base, exts.iter().copied(), Vec::<String>::new(), false, false)
            .unwrap();
    SearchService::new(CacheStore::new(cache_dir.path().join("cache.json")))
        .search(&params, SearchOptions::default())
        .unwrap()
        .results
}

fn names(results: &[String]) -> Vec<String> {
    results
        .iter()
        .map(|r| {
            Path::new(r)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn test_paths_with_spaces_and_unicode() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("my file.txt")).unwrap();
    File::create(dir.path().join("résumé.log")).unwrap();
    File::create(dir.path().join("日本語.txt")).unwrap();

    let results = search(dir.path(), &["log"]);
    let found = names(&results);

    assert_eq!(found.len(), 2);
    assert!(found.contains(&"my file.txt".to_string()));
    assert!(found.contains(&"日本語.txt".to_string()));
}

#[test]
fn test_dotfiles_and_extensionless_files_are_never_excluded() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join(".gitignore")).unwrap();
    File::create(dir.path().join("Makefile")).unwrap();
    File::create(dir.path().join("trailing.")).unwrap();

    let results = search(dir.path(), &[".gitignore", ""]);
    assert_eq!(
        names(&results),
        vec![".gitignore", "Makefile", "trailing."]
    );
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("upper.LOG")).unwrap();
    File::create(dir.path().join("lower.log")).unwrap();

    let results = search(dir.path(), &["log"]);
    assert_eq!(names(&results), vec!["upper.LOG"]);
}

#[test]
fn test_base_path_that_is_a_file_yields_nothing() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("single.txt");
    File::create(&file).unwrap();

    assert!(search(&file, &[]).is_empty());
}

#[test]
fn test_equivalent_spellings_of_base_share_a_key() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();

    let plain = SearchParameters::resolve(&sub, ["log"], ["target"], false, false).unwrap();
    let dotted = SearchParameters::resolve(
        dir.path().join("sub").join(".").join("..").join("sub"),
        [".log"],
        ["target"],
        false,
        false,
    )
    .unwrap();

    assert_eq!(plain.base_path(), dotted.base_path());
    assert_eq!(CacheKey::derive(&plain), CacheKey::derive(&dotted));
}

#[test]
fn test_relative_display_strips_base() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    File::create(dir.path().join("src").join("main.rs")).unwrap();

    let params =
        SearchParameters::resolve(dir.path(), Vec::<String>::new(), Vec::<String>::new(), false, false)
            .unwrap();
    let results = search(dir.path(), &[]);
    let relative = to_relative(&results, params.base_path().as_path());

    assert_eq!(
        relative,
        vec![
            "src".to_string(),
            Path::new("src").join("main.rs").to_string_lossy().into_owned(),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_listed_but_not_descended() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("real");
    fs::create_dir(&target).unwrap();
    File::create(target.join("inner.txt")).unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

    let results = search(dir.path(), &[]);
    assert_eq!(names(&results), vec!["link", "real", "inner.txt"]);

    let folders = {
        let cache_dir = tempdir().unwrap();
        let params = SearchParameters::resolve(
            dir.path(),
            Vec::<String>::new(),
            Vec::<String>::new(),
            false,
            true,
        )
        .unwrap();
        SearchService::new(CacheStore::new(cache_dir.path().join("cache.json")))
            .search(&params, SearchOptions::uncached())
            .unwrap()
            .results
    };
    assert_eq!(names(&folders), vec!["link", "real"]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_matching_exclusion_is_pruned() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("real");
    fs::create_dir(&target).unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("vendor")).unwrap();

    let cache_dir = tempdir().unwrap();
    let params =
        SearchParameters::resolve(dir.path(), Vec::<String>::new(), ["vendor"], false, false)
            .unwrap();
    let results = SearchService::new(CacheStore::new(cache_dir.path().join("cache.json")))
        .search(&params, SearchOptions::default())
        .unwrap()
        .results;

    assert_eq!(names(&results), vec!["real"]);
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_listed_as_file() {
    let dir = TempDir::new().unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing.txt"), dir.path().join("dangling.txt"))
        .unwrap();

    assert_eq!(names(&search(dir.path(), &[])), vec!["dangling.txt"]);
    assert!(search(dir.path(), &["txt"]).is_empty());
}
