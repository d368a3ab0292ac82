use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Start on the first lesson instead of the intro menu.
    #[serde(default = "default_skip_intro")]
    pub skip_intro: bool,
    /// Show the key hint line at the bottom of every screen.
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_skip_intro() -> bool {
    false
}
fn default_show_hints() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            skip_intro: default_skip_intro(),
            show_hints: default_show_hints(),
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
            .join("netwise")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.skip_intro, false);
        assert_eq!(config.show_hints, true);
    }

    #[test]
    fn test_config_serde_partial_file_keeps_defaults() {
        let toml_str = r#"
theme = "catppuccin-mocha"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.skip_intro, false);
        assert_eq!(config.show_hints, true);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            theme: "catppuccin-mocha".to_string(),
            skip_intro: true,
            show_hints: false,
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.skip_intro, deserialized.skip_intro);
        assert_eq!(config.show_hints, deserialized.show_hints);
    }
}
