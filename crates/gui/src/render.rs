//! Render contract between the core and the canvas backend.
//!
//! The store keeps full-resolution data; what reaches the renderer is capped
//! at [`MAX_DISPLAY_POINTS`] by an evenly spaced index subsequence, so redraw
//! cost stays bounded no matter how many points accumulate.

use std::path::PathBuf;

use shared::{Rgb, SketchSettings};

use crate::cloud::PointCloud;

/// Display cap for a single redraw.
pub const MAX_DISPLAY_POINTS: usize = 30_000;

/// Abstract canvas the core draws into. The GUI canvas panel implements
/// this; tests use a recording fake.
pub trait CanvasRenderer {
    /// Set the visible map extent in meters.
    fn set_bounds(&mut self, width: f64, height: f64);
    /// Replace the displayed point set.
    fn draw_points(&mut self, xy: &[[f64; 2]], colors: &[Rgb]);
    /// Remove everything from the display.
    fn clear_display(&mut self);
    /// Present the current display state. The very first flush of a session
    /// must complete synchronously; later ones may be batched by the backend.
    fn flush(&mut self, blocking: bool);
}

/// User-facing dialogs the controller needs: confirmation, save-path pick,
/// and notifications.
pub trait UserPrompt {
    fn ask_yes_no(&mut self, message: &str) -> bool;
    fn ask_save_path(&mut self, extension: &str) -> Option<PathBuf>;
    fn notify(&mut self, title: &str, message: &str);
}

/// Indices of the points shown for a buffer of `total` points.
///
/// Identity below the cap; above it, exactly `cap` indices spread evenly
/// across the whole range (first and last always included), not a prefix.
pub fn display_indices(total: usize, cap: usize) -> Vec<usize> {
    if total <= cap {
        return (0..total).collect();
    }
    if cap == 0 {
        return Vec::new();
    }
    if cap == 1 {
        return vec![0];
    }
    let last = (total - 1) as f64;
    let denom = (cap - 1) as f64;
    (0..cap).map(|i| (i as f64 * last / denom) as usize).collect()
}

/// Push the current (possibly downsampled) store contents to the renderer.
pub fn refresh(
    cloud: &PointCloud,
    settings: &SketchSettings,
    renderer: &mut dyn CanvasRenderer,
    blocking: bool,
) {
    renderer.set_bounds(settings.map_width, settings.map_height);

    if cloud.is_empty() {
        renderer.clear_display();
        renderer.flush(blocking);
        return;
    }

    let indices = display_indices(cloud.len(), MAX_DISPLAY_POINTS);
    let xy: Vec<[f64; 2]> = indices
        .iter()
        .map(|&i| {
            let p = cloud.points()[i];
            [p[0], p[1]]
        })
        .collect();
    let colors: Vec<Rgb> = indices.iter().map(|&i| cloud.colors()[i]).collect();

    renderer.draw_points(&xy, &colors);
    renderer.flush(blocking);
}
