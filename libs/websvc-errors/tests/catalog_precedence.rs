#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Catalog location precedence: override directory, live file, shipped file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use websvc_errors::{
    CONFIG_DIR_ENV, CatalogConfig, CatalogLoader, ConfigurationError, DIST_CATALOG_FILE,
    LIVE_CATALOG_FILE, MapEnv, ProcessEnv,
};

fn catalog_with(code: &str) -> String {
    format!(
        r#"{{"{code}": {{"code": "{code}", "message": "from {code}", "more_info": "https://e/{code}", "response_code": "400"}}}}"#
    )
}

fn write(dir: &Path, file: &str, code: &str) {
    fs::write(dir.join(file), catalog_with(code)).unwrap();
}

fn shipped_config_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config")
}

#[test]
fn override_dir_beats_live_file() {
    let base = TempDir::new().unwrap();
    let overridden = TempDir::new().unwrap();
    write(base.path(), LIVE_CATALOG_FILE, "base-live");
    write(overridden.path(), DIST_CATALOG_FILE, "override-dist");

    let env = MapEnv::new().with(CONFIG_DIR_ENV, overridden.path().to_str().unwrap());
    let config = CatalogConfig::from_environment(&env, base.path());
    let loader = CatalogLoader::with_environment(config, Arc::new(env));

    let catalog = loader.load().unwrap();
    assert!(catalog.contains("override-dist"));
    assert!(!catalog.contains("base-live"));
    assert!(loader.resolve_path().unwrap().starts_with(overridden.path()));
}

#[test]
fn dist_file_used_without_live_file() {
    let base = TempDir::new().unwrap();
    write(base.path(), DIST_CATALOG_FILE, "dist");

    let loader = CatalogLoader::with_environment(CatalogConfig::new(base.path()), Arc::new(MapEnv::new()));

    assert_eq!(
        loader.resolve_path().unwrap(),
        base.path().join(DIST_CATALOG_FILE)
    );
    assert!(loader.load().unwrap().contains("dist"));
}

#[test]
fn live_file_used_when_present() {
    let base = TempDir::new().unwrap();
    write(base.path(), LIVE_CATALOG_FILE, "live");
    write(base.path(), DIST_CATALOG_FILE, "dist");

    let catalog = CatalogLoader::with_environment(CatalogConfig::new(base.path()), Arc::new(MapEnv::new()))
        .load()
        .unwrap();
    assert!(catalog.contains("live"));
    assert!(!catalog.contains("dist"));
}

#[test]
fn neither_file_is_a_configuration_error() {
    let base = TempDir::new().unwrap();
    let err = CatalogLoader::with_environment(CatalogConfig::new(base.path()), Arc::new(MapEnv::new()))
        .load()
        .unwrap_err();

    match err {
        ConfigurationError::CatalogNotFound { dir } => assert_eq!(dir, base.path()),
        other => panic!("expected CatalogNotFound, got {other:?}"),
    }
}

#[test]
fn override_dir_without_catalog_does_not_fall_back_to_base() {
    let base = TempDir::new().unwrap();
    let overridden = TempDir::new().unwrap();
    write(base.path(), DIST_CATALOG_FILE, "base");

    let config = CatalogConfig::new(base.path()).with_override_dir(overridden.path());
    let err = CatalogLoader::with_environment(config, Arc::new(MapEnv::new()))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::CatalogNotFound { .. }));
}

#[test]
fn malformed_live_file_is_a_configuration_error() {
    let base = TempDir::new().unwrap();
    fs::write(base.path().join(LIVE_CATALOG_FILE), "{\"broken\": ").unwrap();
    write(base.path(), DIST_CATALOG_FILE, "dist");

    let err = CatalogLoader::with_environment(CatalogConfig::new(base.path()), Arc::new(MapEnv::new()))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse { .. }));
}

#[test]
#[cfg(unix)]
fn unreadable_live_file_is_fatal_and_dist_is_not_used() {
    let base = TempDir::new().unwrap();
    // A directory named like the live catalog exists but cannot be read as a file.
    fs::create_dir(base.path().join(LIVE_CATALOG_FILE)).unwrap();
    write(base.path(), DIST_CATALOG_FILE, "dist");

    let err = CatalogLoader::with_environment(CatalogConfig::new(base.path()), Arc::new(MapEnv::new()))
        .load()
        .unwrap_err();

    match err {
        ConfigurationError::Unreadable { path, .. } => {
            assert_eq!(path, base.path().join(LIVE_CATALOG_FILE));
        }
        other => panic!("expected Unreadable, got {other:?}"),
    }
}

#[test]
#[cfg(not(target_os = "windows"))]
fn tilde_override_expands_from_process_home() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("websvc");
    fs::create_dir(&config_dir).unwrap();
    write(&config_dir, DIST_CATALOG_FILE, "home");

    temp_env::with_vars(
        [
            ("HOME", Some(home.path().to_str().unwrap())),
            (CONFIG_DIR_ENV, Some("~/websvc")),
        ],
        || {
            let config = CatalogConfig::from_environment(&ProcessEnv, "/nonexistent");
            let catalog = CatalogLoader::new(config).load().unwrap();
            assert!(catalog.contains("home"));
        },
    );
}

#[test]
fn shipped_catalog_parses() {
    let loader = CatalogLoader::with_environment(CatalogConfig::new(shipped_config_dir()), Arc::new(MapEnv::new()));
    let catalog = loader.load().unwrap();

    assert!(catalog.contains(websvc_errors::INVALID_SUPPRESSION_FLAG_CODE));
    for def in catalog.definitions() {
        assert!(def.status().as_u16() >= 400, "{} has non-error status", def.code);
    }
}
