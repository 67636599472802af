//! Factory helpers for tests.

use shared::{ExportSettings, SketchSettings};

use crate::cloud::PointCloud;

/// Settings with a small cloud so tests stay readable: 2×2 grid per paint.
pub fn small_cloud_settings() -> SketchSettings {
    SketchSettings {
        points_per_cloud: 4,
        ..SketchSettings::default()
    }
}

/// Settings with the given export layering.
pub fn layered_settings(layer_height: f64, layer_count: u32) -> SketchSettings {
    SketchSettings {
        export: ExportSettings {
            layer_height,
            layer_count,
        },
        ..SketchSettings::default()
    }
}

/// A store pre-filled with `clouds` single-point appends along the diagonal.
pub fn diagonal_cloud(clouds: usize) -> PointCloud {
    let mut pc = PointCloud::new();
    for i in 0..clouds {
        pc.add_square(i as f64, i as f64, 1.0, 1, [0.2, 0.6, 0.9]);
    }
    pc
}
