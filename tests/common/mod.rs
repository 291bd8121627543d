#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex, time::Duration};

use assert_cmd::Command;
use community_core::{
    config::{Config, ConfigManager},
    domain::Seeded,
    storage::{InMemoryStore, StoredRecord},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh application home with a config that disables the simulated latency.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager = ConfigManager::with_base_dir(base.clone()).expect("config manager for temp dir");
    let config = Config {
        mock_latency_ms: 0,
        ..Config::default()
    };
    manager.save(&config).expect("write test config");
    base
}

/// The shell binary in script mode, isolated from the user's home.
pub fn cli(home: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("community_core_cli").expect("binary built");
    cmd.env("COMMUNITY_CORE_HOME", home)
        .env("COMMUNITY_CORE_CLI_SCRIPT", "1")
        .env_remove("COMMUNITY_API_URL")
        .env_remove("COMMUNITY_CORE_STORAGE");
    cmd
}

/// Joins script lines, terminating the last one.
pub fn script(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn seeded<R: StoredRecord + Seeded>() -> InMemoryStore<R> {
    InMemoryStore::seeded(Duration::ZERO)
}
