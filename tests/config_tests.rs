use std::fs;

use community_core::{
    config::{Config, ConfigManager, StorageKind, Theme, API_URL_ENV, STORAGE_ENV},
    errors::CommunityError,
};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.storage, StorageKind::Memory);
    assert_eq!(config.api.path_prefix, "/api/v1/rehic");
}

#[test]
fn saved_changes_survive_a_reload() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let mut config = Config::default();
    config.set("theme", "dark").unwrap();
    config.set("api-url", "https://church.example.org/").unwrap();
    config.set("api_prefix", "api/v2").unwrap();
    config.set("page_size", "25").unwrap();
    config.set("display_name", "Pastor Mike").unwrap();
    manager.save(&config).unwrap();

    let reloaded = manager.load().unwrap();
    assert_eq!(reloaded.layout.theme, Theme::Dark);
    assert_eq!(reloaded.api.base_url, "https://church.example.org");
    assert_eq!(reloaded.api.path_prefix, "/api/v2");
    assert_eq!(reloaded.page_size, 25);
    assert_eq!(reloaded.display_name, "Pastor Mike");
    assert!(!manager.path().with_extension("json.tmp").exists());
}

#[test]
fn invalid_values_are_rejected() {
    let mut config = Config::default();
    assert!(matches!(config.set("api_url", "ftp://example.org"), Err(CommunityError::Config(_))));
    assert!(config.set("page_size", "0").is_err());
    assert!(config.set("timeout", "soon").is_err());
    assert!(config.set("storage", "floppy").is_err());
    assert!(config.set("colour", "blue").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn corrupt_file_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    fs::write(manager.path(), "{ not json").unwrap();
    assert!(matches!(manager.load(), Err(CommunityError::Config(_))));
}

#[test]
fn environment_overrides_file_values() {
    std::env::set_var(API_URL_ENV, "http://api.internal:9000");
    std::env::set_var(STORAGE_ENV, "http");
    let config = Config::default().with_env_overrides();
    std::env::remove_var(API_URL_ENV);
    std::env::remove_var(STORAGE_ENV);

    assert_eq!(config.api.base_url, "http://api.internal:9000");
    assert_eq!(config.storage, StorageKind::Http);
}
