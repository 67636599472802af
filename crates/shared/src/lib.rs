use serde::{Deserialize, Serialize};

mod settings;

pub use settings::{SettingsError, SettingsForm, SketchSettings};

/// RGB color with channels in 0.0–1.0.
pub type Rgb = [f32; 3];

/// Default color for newly painted clouds.
pub const DEFAULT_CLOUD_COLOR: Rgb = [0.2, 0.6, 0.9];

/// Export settings: how the flat 2D buffer is extruded into layers at save time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Vertical spacing between synthetic layers, meters (non-negative).
    pub layer_height: f64,
    /// Number of synthetic layers (at least 1).
    pub layer_count: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            layer_height: 0.25,
            layer_count: 10,
        }
    }
}

impl ExportSettings {
    /// Total extrusion height of the exported cloud.
    pub fn total_height(&self) -> f64 {
        self.layer_count as f64 * self.layer_height
    }
}
