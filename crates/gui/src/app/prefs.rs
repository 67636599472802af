//! Sketch settings persistence.
//!
//! Settings are stored as JSON in the platform config directory. The point
//! buffers and undo history are never persisted.

use std::path::{Path, PathBuf};

use shared::SketchSettings;

const QUALIFIER: &str = "com";
const ORG: &str = "cloudsketch";
const APP: &str = "cloudsketch";

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from(QUALIFIER, ORG, APP)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Load settings from the platform config directory, falling back to
/// defaults.
pub fn load() -> SketchSettings {
    match config_path() {
        Some(path) => load_from(&path),
        None => SketchSettings::default(),
    }
}

/// Save settings to the platform config directory. Failures are logged,
/// never fatal.
pub fn save(settings: &SketchSettings) {
    if let Some(path) = config_path() {
        save_to(settings, &path);
    }
}

/// Load settings from `path`. Stored values are clamped on the way in so a
/// hand-edited file cannot smuggle bad ranges; a missing or malformed file
/// yields the defaults.
pub fn load_from(path: &Path) -> SketchSettings {
    if let Ok(json) = std::fs::read_to_string(path) {
        match serde_json::from_str::<SketchSettings>(&json) {
            Ok(settings) => return settings.clamped(),
            Err(e) => tracing::warn!("Ignoring malformed settings file: {e}"),
        }
    }
    SketchSettings::default()
}

/// Save settings as pretty JSON to `path`, creating parent directories.
pub fn save_to(settings: &SketchSettings, path: &Path) {
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!("Could not create config dir: {e}");
            return;
        }
    }
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                tracing::warn!("Could not save settings: {e}");
            }
        }
        Err(e) => tracing::warn!("Could not serialize settings: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = SketchSettings::default();
        settings.points_per_cloud = 64;
        settings.export.layer_count = 7;
        save_to(&settings, &path);

        assert_eq!(load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(load_from(&path), SketchSettings::default());
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_from(&path), SketchSettings::default());
    }

    #[test]
    fn test_hand_edited_ranges_are_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "points_per_cloud": 0,
                "cloud_size": 1.0,
                "map_width": 20.0,
                "map_height": 15.0,
                "dpi": 5000,
                "cloud_color": [0.2, 0.6, 0.9],
                "export": { "layer_height": -0.25, "layer_count": 0 }
            }"#,
        )
        .unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded.points_per_cloud, 1);
        assert_eq!(loaded.dpi, 800);
        assert_eq!(loaded.export.layer_height, 0.25);
        assert_eq!(loaded.export.layer_count, 1);
    }
}
