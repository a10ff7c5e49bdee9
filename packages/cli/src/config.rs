use serde::{Deserialize, Serialize};
use sitecraft_blocks::LayoutPreset;
use sitecraft_editor::EditorOptions;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Sitecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding page, header and footer documents
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Maximum number of undo levels (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,

    /// Persisted editor UI state, relative to the project root
    #[serde(default = "default_settings_file")]
    pub settings_file: String,

    /// Preset for new layout blocks when none is given
    #[serde(default)]
    pub default_preset: LayoutPreset,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_undo_levels() -> usize {
    100
}

fn default_settings_file() -> String {
    ".sitecraft/ui.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    pub fn get_settings_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.settings_file)
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            undo_levels: self.undo_levels,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            undo_levels: default_undo_levels(),
            settings_file: default_settings_file(),
            default_preset: LayoutPreset::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pagesDir": "site",
            "undoLevels": 0,
            "defaultPreset": "33-33-33"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pages_dir, "site");
        assert_eq!(config.undo_levels, 0);
        assert_eq!(config.settings_file, ".sitecraft/ui.json");
        assert_eq!(config.default_preset, LayoutPreset::Thirds);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pages_dir, "pages");
        assert_eq!(config.editor_options().undo_levels, 100);
        assert_eq!(config.default_preset, LayoutPreset::Halves);
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config.pages_dir, "pages");
    }
}
