use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::scene::{Camera, Light};

/// Returns the path to the settings file: `~/.config/bezier-flight/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("bezier-flight");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightSettings {
    // Editor
    pub show_settings: bool,
    pub paused: bool,

    // Animation
    pub duration: f32,
    pub propeller_speed: f32,

    // Curves
    pub curve_resolution: usize,
    pub curve_width: f32,
    pub polygon_width: f32,

    // Display
    pub show_grid: bool,
    pub show_control_polygon: bool,
    pub show_frame_axes: bool,
    pub show_lights: bool,

    // Camera
    pub fov_degrees: f32,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],

    // Lights
    pub lights: Vec<Light>,

    // Colors (stored as u8 triples since Color32 isn't serde-friendly)
    pub curve_color: [u8; 3],
    pub point_color: [u8; 3],
    pub body_color: [u8; 3],
    pub propeller_color: [u8; 3],
    pub background: [u8; 3],
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self {
            show_settings: true,
            paused: false,

            duration: 3.0,
            propeller_speed: 1500.0,

            curve_resolution: 50,
            curve_width: 3.5,
            polygon_width: 2.5,

            show_grid: true,
            show_control_polygon: true,
            show_frame_axes: false,
            show_lights: true,

            fov_degrees: 30.0,
            camera_position: [0.0, 1.5, 4.5],
            camera_target: [0.0, 0.0, 0.0],

            lights: Light::default_set(),

            curve_color: [34, 34, 34],
            point_color: [26, 153, 26],
            body_color: [255, 105, 180],
            propeller_color: [0, 0, 255],
            background: [255, 255, 255],
        }
    }
}

/// Highest curve resolution offered; more pieces than this are invisible
pub const MAX_CURVE_RESOLUTION: usize = 500;

impl FlightSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Load settings from a specific file, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        self.save_to(&settings_path());
    }

    /// Save settings to a specific file as pretty JSON.
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Saved settings to {}", path.display()),
                Err(e) => log::warn!("Failed to write settings: {}", e),
            },
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Replace values a hand-edited file may have broken with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.duration.is_finite() && self.duration > 0.0) {
            log::warn!(
                "Invalid loop duration {} in settings, using {}",
                self.duration,
                defaults.duration
            );
            self.duration = defaults.duration;
        }

        if !self.propeller_speed.is_finite() {
            self.propeller_speed = defaults.propeller_speed;
        }

        self.curve_resolution = self.curve_resolution.clamp(1, MAX_CURVE_RESOLUTION);

        if !(self.fov_degrees.is_finite() && (5.0..=120.0).contains(&self.fov_degrees)) {
            self.fov_degrees = defaults.fov_degrees;
        }

        let finite = |v: &[f32; 3]| v.iter().all(|c| c.is_finite());
        if !finite(&self.camera_position)
            || !finite(&self.camera_target)
            || Camera::new(
                Point3::from(self.camera_position),
                Point3::from(self.camera_target),
            )
            .is_degenerate()
        {
            log::warn!("Invalid camera in settings, using default view");
            self.camera_position = defaults.camera_position;
            self.camera_target = defaults.camera_target;
        }

        self.lights.retain(|light| finite(&light.position));

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = FlightSettings::default();
        settings.duration = 7.5;
        settings.lights.push(Light::new(0.0, 2.0, 0.0));
        settings.save_to(&path);

        assert_eq!(FlightSettings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FlightSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, FlightSettings::default());
    }

    #[test]
    fn test_garbage_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(FlightSettings::load_from(&path), FlightSettings::default());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: FlightSettings =
            serde_json::from_str(r#"{ "duration": 12.0, "show_grid": false }"#).unwrap();
        assert_eq!(settings.duration, 12.0);
        assert!(!settings.show_grid);
        assert_eq!(settings.curve_resolution, 50);
        assert_eq!(settings.lights.len(), 3);
    }

    #[test]
    fn test_sanitize_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "duration": -2.0,
                "curve_resolution": 0,
                "fov_degrees": 500.0,
                "camera_position": [1.0, 1.0, 1.0],
                "camera_target": [1.0, 1.0, 1.0]
            }"#,
        )
        .unwrap();

        let settings = FlightSettings::load_from(&path);
        let defaults = FlightSettings::default();
        assert_eq!(settings.duration, defaults.duration);
        assert_eq!(settings.curve_resolution, 1);
        assert_eq!(settings.fov_degrees, defaults.fov_degrees);
        assert_eq!(settings.camera_position, defaults.camera_position);
    }

    #[test]
    fn test_sanitize_camera_looking_straight_down() {
        let settings = FlightSettings {
            camera_position: [0.0, 5.0, 0.0],
            camera_target: [0.0, 0.0, 0.0],
            ..FlightSettings::default()
        }
        .sanitized();

        let defaults = FlightSettings::default();
        assert_eq!(settings.camera_position, defaults.camera_position);
        assert_eq!(settings.camera_target, defaults.camera_target);

        // A tilted view from above is kept
        let tilted = FlightSettings {
            camera_position: [0.5, 5.0, 0.0],
            ..FlightSettings::default()
        }
        .sanitized();
        assert_eq!(tilted.camera_position, [0.5, 5.0, 0.0]);
    }
}
