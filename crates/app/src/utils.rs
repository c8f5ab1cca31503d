//! Settings persistence helpers.

use shared::settings::AppSettings;
use std::fs;
use std::path::{Path, PathBuf};

fn config_path() -> Option<PathBuf> {
    if let Some(proj) = directories::ProjectDirs::from("com.local", "Code Workbench", "CodeWorkbench")
    {
        let _ = fs::create_dir_all(proj.config_dir());
        Some(proj.config_dir().join("settings.json"))
    } else {
        None
    }
}

pub(crate) fn read_settings(path: &Path) -> Option<AppSettings> {
    let bytes = fs::read(path).ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub(crate) fn write_settings(path: &Path, settings: &AppSettings) {
    if let Ok(json) = serde_json::to_string_pretty(settings) {
        if let Err(e) = fs::write(path, json) {
            tracing::warn!("failed to write settings to {}: {}", path.display(), e);
        }
    }
}

/// Loads settings from the config dir, seeding the file with defaults on
/// first run so the backend address is easy to find and edit.
pub fn load_settings_or_default() -> AppSettings {
    let Some(path) = config_path() else {
        return AppSettings::default();
    };
    if let Some(settings) = read_settings(&path) {
        return settings;
    }
    let settings = AppSettings::default();
    write_settings(&path, &settings);
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = AppSettings::default();
        settings.backend_url = "http://10.0.0.5:9000".to_string();
        settings.default_model = "llama3.2:3b".to_string();

        write_settings(&path, &settings);
        let loaded = read_settings(&path).unwrap();
        assert_eq!(loaded.backend_url, "http://10.0.0.5:9000");
        assert_eq!(loaded.default_model, "llama3.2:3b");
    }

    #[test]
    fn unreadable_settings_yield_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(read_settings(&path).is_none());
    }
}
