//! Persisted editor UI state (open panels, last active tab)

use crate::EditorError;
use serde::{Deserialize, Serialize};
use sitecraft_common::{CommonError, FileSystem};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiSettings {
    /// Sidebar sections currently expanded
    pub open_sections: BTreeSet<String>,
    pub active_tab: Option<String>,
}

/// UI settings backed by a JSON file; every change is written through
pub struct SettingsStore<F: FileSystem> {
    fs: F,
    path: PathBuf,
    settings: UiSettings,
}

impl<F: FileSystem> SettingsStore<F> {
    /// Read settings from `path`. A missing or unreadable file gives defaults.
    pub fn open(fs: F, path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let settings = match fs.read_to_string(&path) {
            Ok(source) => serde_json::from_str(&source).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "Ignoring corrupt UI settings");
                UiSettings::default()
            }),
            Err(CommonError::NotFound(_)) => UiSettings::default(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self { fs, path, settings })
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_section_open(&self, section: &str) -> bool {
        self.settings.open_sections.contains(section)
    }

    /// Flip a section, returning whether it is now open
    pub fn toggle_section(&mut self, section: &str) -> Result<bool, EditorError> {
        let open = !self.is_section_open(section);
        self.set_section_open(section, open)?;
        Ok(open)
    }

    pub fn set_section_open(&mut self, section: &str, open: bool) -> Result<(), EditorError> {
        self.update(|settings| {
            if open {
                settings.open_sections.insert(section.to_string());
            } else {
                settings.open_sections.remove(section);
            }
        })
    }

    pub fn set_active_tab(&mut self, tab: Option<String>) -> Result<(), EditorError> {
        self.update(|settings| settings.active_tab = tab)
    }

    /// Write the changed settings and keep them only once the write succeeded
    fn update(&mut self, change: impl FnOnce(&mut UiSettings)) -> Result<(), EditorError> {
        let mut next = self.settings.clone();
        change(&mut next);

        let json = serde_json::to_string_pretty(&next)?;
        self.fs.write(&self.path, &json)?;
        self.settings = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_common::{MockFileSystem, RealFileSystem};

    #[test]
    fn test_missing_file_gives_defaults() {
        let fs = MockFileSystem::new();
        let store = SettingsStore::open(&fs, "/ui.json").unwrap();
        assert_eq!(store.settings(), &UiSettings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let fs = MockFileSystem::new();
        fs.add_file("/ui.json", "{ not json");
        let store = SettingsStore::open(&fs, "/ui.json").unwrap();
        assert!(store.settings().open_sections.is_empty());
    }

    #[test]
    fn test_changes_are_written_through() {
        let fs = MockFileSystem::new();
        let mut store = SettingsStore::open(&fs, "/ui.json").unwrap();

        assert!(store.toggle_section("spacing").unwrap());
        store.set_active_tab(Some("style".to_string())).unwrap();

        let reopened = SettingsStore::open(&fs, "/ui.json").unwrap();
        assert!(reopened.is_section_open("spacing"));
        assert_eq!(reopened.settings().active_tab.as_deref(), Some("style"));

        let mut store = reopened;
        assert!(!store.toggle_section("spacing").unwrap());
        let raw = fs.contents(Path::new("/ui.json")).unwrap();
        assert!(!raw.contains("spacing"));
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "").unwrap();

        let mut store = SettingsStore::open(RealFileSystem, blocker.join("ui.json")).unwrap();
        assert!(store.toggle_section("spacing").is_err());
        assert!(store.set_active_tab(Some("style".to_string())).is_err());
        assert_eq!(store.settings(), &UiSettings::default());
    }

    #[test]
    fn test_real_file_system() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sitecraft/ui.json");

        let mut store = SettingsStore::open(RealFileSystem, &path).unwrap();
        store.set_section_open("animation", true).unwrap();

        let reopened = SettingsStore::open(RealFileSystem, &path).unwrap();
        assert!(reopened.is_section_open("animation"));
    }
}
