use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    errors::{CommunityError, Result},
    utils::{app_data_dir, ensure_dir},
};

pub const API_URL_ENV: &str = "COMMUNITY_API_URL";
pub const STORAGE_ENV: &str = "COMMUNITY_CORE_STORAGE";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/v1/rehic";

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Which record store backs the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Sample data held in process, discarded on exit.
    #[default]
    Memory,
    /// The REST backend at [`ApiConfig::base_url`].
    Http,
}

impl StorageKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" | "mock" => Some(StorageKind::Memory),
            "http" | "remote" => Some(StorageKind::Http),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Memory => "memory",
            StorageKind::Http => "http",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub path_prefix: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            path_prefix: DEFAULT_API_PREFIX.into(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Parsed base URL. Only `http`/`https` URLs with a host are accepted.
    pub fn validated_base(&self) -> Result<Url> {
        validate_base_url(&self.base_url)
    }
}

pub fn validate_base_url(raw: &str) -> Result<Url> {
    let parsed = Url::parse(raw.trim())
        .map_err(|err| CommunityError::Config(format!("invalid API URL `{raw}`: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CommunityError::Config(format!(
            "API URL `{raw}` must use http or https"
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CommunityError::Config(format!(
            "API URL `{raw}` must include a host"
        )));
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Theme and sidebar state. Owned by the shell and handed to whatever renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutState {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl LayoutState {
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageKind,
    /// Artificial delay applied by the in-memory store.
    pub mock_latency_ms: u64,
    pub page_size: u32,
    pub layout: LayoutState,
    /// Sender recorded on composed messages.
    pub display_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageKind::default(),
            mock_latency_ms: 1000,
            page_size: 10,
            layout: LayoutState::default(),
            display_name: "Admin".into(),
        }
    }
}

impl Config {
    /// Applies `COMMUNITY_API_URL` and `COMMUNITY_CORE_STORAGE` on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                debug!(%url, "API URL taken from environment");
                self.api.base_url = url.trim().to_string();
            }
        }
        if let Ok(raw) = env::var(STORAGE_ENV) {
            match StorageKind::parse(&raw) {
                Some(kind) => self.storage = kind,
                None => warn!(value = %raw, "ignoring unknown storage kind from environment"),
            }
        }
        self
    }

    /// Sets one key by its shell name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_ascii_lowercase().replace('-', "_").as_str() {
            "api_url" | "base_url" => {
                validate_base_url(value)?;
                self.api.base_url = value.trim().trim_end_matches('/').to_string();
            }
            "api_prefix" => {
                let trimmed = value.trim().trim_end_matches('/');
                self.api.path_prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
                    trimmed.to_string()
                } else {
                    format!("/{trimmed}")
                };
            }
            "timeout" | "timeout_secs" => self.api.timeout_secs = parse_number(key, value)?,
            "storage" => {
                self.storage = StorageKind::parse(value).ok_or_else(|| {
                    CommunityError::Config(format!("storage must be `memory` or `http`, not `{value}`"))
                })?
            }
            "mock_latency" | "mock_latency_ms" => self.mock_latency_ms = parse_number(key, value)?,
            "page_size" => {
                let size: u32 = parse_number(key, value)?;
                if size == 0 {
                    return Err(CommunityError::Config("page_size must be at least 1".into()));
                }
                self.page_size = size;
            }
            "theme" => {
                self.layout.theme = Theme::parse(value).ok_or_else(|| {
                    CommunityError::Config(format!("theme must be `light` or `dark`, not `{value}`"))
                })?
            }
            "display_name" => self.display_name = value.trim().to_string(),
            other => {
                return Err(CommunityError::Config(format!(
                    "unknown config key `{other}`"
                )))
            }
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CommunityError::Config(format!("{key} must be numeric, got `{value}`")))
}

/// Loads and saves [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let dir = base.join(CONFIG_DIR);
        ensure_dir(&dir)?;
        Ok(Self {
            path: dir.join(CONFIG_FILE),
        })
    }

    /// Stored config, or defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            CommunityError::Config(format!("{} is not valid: {err}", self.path.display()))
        })
    }

    /// Writes through a temporary sibling and renames it into place.
    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
