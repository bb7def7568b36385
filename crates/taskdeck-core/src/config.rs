use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "tasks.json";
pub const DEFAULT_WEIGHT: u8 = 10;

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_categories() -> Vec<String> {
    ["Work", "Study", "Life", "Other"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_weight() -> u8 {
    DEFAULT_WEIGHT
}

fn default_backup() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Working file, resolved against the current directory when relative.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Categories offered by the task form and the type filter.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_weight")]
    pub default_weight: u8,

    /// When set, the card view document is mirrored to this file on every change.
    #[serde(default)]
    pub card_html: Option<PathBuf>,

    #[serde(default = "default_backup")]
    pub backup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            categories: default_categories(),
            default_weight: default_weight(),
            card_html: None,
            backup: default_backup(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskdeck/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskdeck/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskdeck\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the user config, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Weight clamped into the accepted 1..=100 range.
    pub fn effective_default_weight(&self) -> u8 {
        self.default_weight.clamp(1, 100)
    }
}
