use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use fs_search::config::{Config, CACHE_FILE_NAME};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

// Config::figment reads the process environment.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_config_load_defaults() {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert!(config.use_cache);
    assert!(config.cache_file.is_none());
    assert!(config.exclude.is_empty());
    assert!(config.exclude_dirs.is_empty());
    assert!(!config.relative);
}

#[test]
fn test_config_load_from_toml() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
cache_file = "/var/cache/fs-search.json"
use_cache = false
exclude = [".log", "tmp"]
exclude_dirs = ["node_modules", ".git"]
relative = true
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::load_from_path(&config_path);

    assert_eq!(
        config.cache_file,
        Some(PathBuf::from("/var/cache/fs-search.json"))
    );
    assert!(!config.use_cache);
    assert_eq!(config.exclude, vec![".log", "tmp"]);
    assert_eq!(config.exclude_dirs, vec!["node_modules", ".git"]);
    assert!(config.relative);
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "exclude_dirs = [\"target\"]\n").unwrap();

    let config = Config::load_from_path(&config_path);

    assert!(config.use_cache);
    assert!(config.cache_file.is_none());
    assert_eq!(config.exclude_dirs, vec!["target"]);
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config = Config::load_from_path(&temp_dir.path().join("absent.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_invalid_toml_fallback() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "use_cache = \"definitely\"").unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    assert!(figment.extract::<Config>().is_err());

    assert_eq!(Config::load_from_path(&config_path), Config::default());
}

#[test]
fn test_config_env_overrides_file() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "cache_file = \"/from/file.json\"\n").unwrap();

    std::env::set_var("FS_SEARCH_CACHE_FILE", "/from/env.json");
    std::env::set_var("FS_SEARCH_USE_CACHE", "false");

    let config = Config::load_from_path(&config_path);

    std::env::remove_var("FS_SEARCH_CACHE_FILE");
    std::env::remove_var("FS_SEARCH_USE_CACHE");

    assert_eq!(config.cache_file, Some(PathBuf::from("/from/env.json")));
    assert_eq!(
        config.cache_file_path().unwrap(),
        PathBuf::from("/from/env.json")
    );
    assert!(!config.use_cache);
}

#[test]
fn test_config_default_cache_location() {
    let config = Config::default();
    if let Ok(path) = config.cache_file_path() {
        assert_eq!(path.file_name().unwrap(), CACHE_FILE_NAME);
    }
}
