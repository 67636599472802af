//! Sketch and export settings with validation.
//!
//! Settings are plain immutable structs: the UI edits a [`SettingsForm`] of
//! text fields, parses it into a [`SketchSettings`], and the result is clamped
//! into range before anyone else sees it. No widget-backed state.

use serde::{Deserialize, Serialize};

use crate::{ExportSettings, Rgb, DEFAULT_CLOUD_COLOR};

/// Canvas DPI bounds.
pub const DPI_MIN: u32 = 30;
pub const DPI_MAX: u32 = 800;

/// Errors when parsing user-entered settings fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Field value is not a number.
    Invalid(&'static str),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Invalid(field) => write!(f, "'{}' is not a valid number", field),
        }
    }
}

impl std::error::Error for SettingsError {}

/// All sketch settings, validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchSettings {
    /// Target number of points per painted cloud (at least 1).
    pub points_per_cloud: u32,
    /// Side length of a painted cloud, meters.
    pub cloud_size: f64,
    /// Canvas extent along x, meters.
    pub map_width: f64,
    /// Canvas extent along y, meters.
    pub map_height: f64,
    /// Canvas DPI, clamped to [30, 800].
    pub dpi: u32,
    /// Color applied to every point of a painted cloud.
    pub cloud_color: Rgb,
    /// Layered-export settings.
    pub export: ExportSettings,
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self {
            points_per_cloud: 200,
            cloud_size: 1.0,
            map_width: 20.0,
            map_height: 15.0,
            dpi: 100,
            cloud_color: DEFAULT_CLOUD_COLOR,
            export: ExportSettings::default(),
        }
    }
}

impl SketchSettings {
    /// Return a copy with every field forced into its valid range.
    ///
    /// Out-of-range values clamp rather than fail: point count and layer
    /// count floor at 1, DPI clamps to [30, 800], layer height takes its
    /// absolute value.
    pub fn clamped(&self) -> Self {
        Self {
            points_per_cloud: self.points_per_cloud.max(1),
            cloud_size: self.cloud_size,
            map_width: self.map_width,
            map_height: self.map_height,
            dpi: self.dpi.clamp(DPI_MIN, DPI_MAX),
            cloud_color: self.cloud_color,
            export: ExportSettings {
                layer_height: self.export.layer_height.abs(),
                layer_count: self.export.layer_count.max(1),
            },
        }
    }
}

/// Text-field mirror of [`SketchSettings`] as edited in the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub points_per_cloud: String,
    pub cloud_size: String,
    pub map_width: String,
    pub map_height: String,
    pub dpi: String,
    pub layer_height: String,
    pub layer_count: String,
}

impl SettingsForm {
    /// Fill the form from current settings.
    pub fn from_settings(s: &SketchSettings) -> Self {
        Self {
            points_per_cloud: s.points_per_cloud.to_string(),
            cloud_size: s.cloud_size.to_string(),
            map_width: s.map_width.to_string(),
            map_height: s.map_height.to_string(),
            dpi: s.dpi.to_string(),
            layer_height: s.export.layer_height.to_string(),
            layer_count: s.export.layer_count.to_string(),
        }
    }

    /// Parse the form into clamped settings.
    ///
    /// Unparseable fields are reported by name; out-of-range numbers clamp.
    /// Integer fields accept a leading/trailing-whitespace decimal; the point
    /// and layer counts tolerate values entered as floats ("200.0").
    pub fn parse(&self, color: Rgb) -> Result<SketchSettings, SettingsError> {
        let settings = SketchSettings {
            points_per_cloud: parse_count(&self.points_per_cloud, "Points per cloud")?,
            cloud_size: parse_float(&self.cloud_size, "Cloud size")?,
            map_width: parse_float(&self.map_width, "Map width")?,
            map_height: parse_float(&self.map_height, "Map height")?,
            dpi: parse_count(&self.dpi, "Canvas DPI")?,
            cloud_color: color,
            export: ExportSettings {
                layer_height: parse_float(&self.layer_height, "Layer height")?,
                layer_count: parse_count(&self.layer_count, "Layer count")?,
            },
        };
        Ok(settings.clamped())
    }
}

fn parse_float(text: &str, field: &'static str) -> Result<f64, SettingsError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| SettingsError::Invalid(field))
}

fn parse_count(text: &str, field: &'static str) -> Result<u32, SettingsError> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return Ok(n);
    }
    // Tolerate "200.0"-style entry; negative values clamp to 0 here and
    // to the field minimum in `clamped`.
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v.max(0.0) as u32),
        _ => Err(SettingsError::Invalid(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_already_valid() {
        let s = SketchSettings::default();
        assert_eq!(s, s.clamped());
    }

    #[test]
    fn test_clamp_point_and_layer_counts() {
        let mut s = SketchSettings::default();
        s.points_per_cloud = 0;
        s.export.layer_count = 0;
        let c = s.clamped();
        assert_eq!(c.points_per_cloud, 1);
        assert_eq!(c.export.layer_count, 1);
    }

    #[test]
    fn test_clamp_dpi_range() {
        let mut s = SketchSettings::default();
        s.dpi = 10;
        assert_eq!(s.clamped().dpi, DPI_MIN);
        s.dpi = 5000;
        assert_eq!(s.clamped().dpi, DPI_MAX);
        s.dpi = 144;
        assert_eq!(s.clamped().dpi, 144);
    }

    #[test]
    fn test_clamp_layer_height_absolute_value() {
        let mut s = SketchSettings::default();
        s.export.layer_height = -0.5;
        assert_eq!(s.clamped().export.layer_height, 0.5);
    }

    #[test]
    fn test_form_round_trip() {
        let s = SketchSettings::default();
        let form = SettingsForm::from_settings(&s);
        let parsed = form.parse(s.cloud_color).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn test_form_rejects_garbage() {
        let mut form = SettingsForm::from_settings(&SketchSettings::default());
        form.dpi = "fast".to_string();
        let err = form.parse(DEFAULT_CLOUD_COLOR).unwrap_err();
        assert_eq!(err, SettingsError::Invalid("Canvas DPI"));
    }

    #[test]
    fn test_form_accepts_float_counts() {
        let mut form = SettingsForm::from_settings(&SketchSettings::default());
        form.points_per_cloud = "200.0".to_string();
        form.layer_count = " 12 ".to_string();
        let parsed = form.parse(DEFAULT_CLOUD_COLOR).unwrap();
        assert_eq!(parsed.points_per_cloud, 200);
        assert_eq!(parsed.export.layer_count, 12);
    }

    #[test]
    fn test_form_clamps_after_parse() {
        let mut form = SettingsForm::from_settings(&SketchSettings::default());
        form.dpi = "2000".to_string();
        form.layer_height = "-0.25".to_string();
        let parsed = form.parse(DEFAULT_CLOUD_COLOR).unwrap();
        assert_eq!(parsed.dpi, DPI_MAX);
        assert_eq!(parsed.export.layer_height, 0.25);
    }

    #[test]
    fn test_total_height() {
        let e = ExportSettings {
            layer_height: 0.25,
            layer_count: 10,
        };
        assert!((e.total_height() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let s = SketchSettings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: SketchSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
