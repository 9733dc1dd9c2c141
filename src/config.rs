use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Directory holding page1.json, page2.json, ... and an optional
    /// manifest.json. When unset, the bundled sample pages are used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_max_probe_pages")]
    pub max_probe_pages: u32,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_max_probe_pages() -> u32 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            data_dir: None,
            max_probe_pages: default_max_probe_pages(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flipdeck")
            .join("config.toml")
    }
}
