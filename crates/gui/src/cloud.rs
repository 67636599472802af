//! Point-cloud geometry store
//!
//! Append-only buffers of 2D-painted points with batch-granular undo. The
//! editing buffer stays flat (z = 0); the layered 3D geometry is synthesized
//! on demand by [`PointCloud::build_layers`] and never written back.

use shared::{ExportSettings, Rgb};

/// One undo record: a contiguous run of points appended by a single
/// operation (either one painted cloud or one full clear).
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Buffer length at the time of the append.
    pub start: usize,
    /// Number of points the operation covered.
    pub count: usize,
    /// Buffers dropped by a clear, stashed so the generic truncate-to-start
    /// undo can reinstate them. `None` for plain appends.
    saved: Option<(Vec<[f64; 3]>, Vec<Rgb>)>,
}

/// Layered export geometry: the flat buffer replicated per layer, colors
/// already converted to 8-bit channels.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredCloud {
    pub points: Vec<[f64; 3]>,
    pub colors: Vec<[u8; 3]>,
}

impl LayeredCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The geometry store: index-aligned point and color buffers plus the
/// undo stack and current export settings.
#[derive(Debug, Default)]
pub struct PointCloud {
    points: Vec<[f64; 3]>,
    colors: Vec<Rgb>,
    undo_stack: Vec<Batch>,
    pub export: ExportSettings,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Append an approximately-square grid of points centered at
    /// `(center_x, center_y)` with side length `size`.
    ///
    /// The grid side is `floor(sqrt(target_points))`, at least 1, so the
    /// actual count is the largest perfect square not exceeding the target.
    /// A single-point grid degenerates to the center itself. Every generated
    /// point gets `color` and z = 0. Returns the number of points added.
    pub fn add_square(
        &mut self,
        center_x: f64,
        center_y: f64,
        size: f64,
        target_points: u32,
        color: Rgb,
    ) -> usize {
        let side = (f64::from(target_points.max(1)).sqrt() as usize).max(1);
        let xs = grid_axis(center_x, size, side);
        let ys = grid_axis(center_y, size, side);

        let start = self.points.len();
        let count = side * side;
        self.points.reserve(count);
        self.colors.reserve(count);
        for &y in &ys {
            for &x in &xs {
                self.points.push([x, y, 0.0]);
                self.colors.push(color);
            }
        }
        self.undo_stack.push(Batch {
            start,
            count,
            saved: None,
        });
        count
    }

    /// Pop the most recent batch and truncate both buffers back to its
    /// start index; a clear batch additionally reinstates the buffers it
    /// stashed. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(batch) = self.undo_stack.pop() else {
            return false;
        };
        self.points.truncate(batch.start);
        self.colors.truncate(batch.start);
        if let Some((points, colors)) = batch.saved {
            self.points = points;
            self.colors = colors;
        }
        true
    }

    /// Drop every point, recording the wipe as a single undoable batch
    /// spanning the whole buffer. Returns false when already empty.
    ///
    /// The recorded batch has start 0 and carries the dropped buffers, so
    /// undoing a clear goes through the same pop-and-truncate path as any
    /// other batch and then puts the stashed data back.
    pub fn clear(&mut self) -> bool {
        if self.points.is_empty() {
            return false;
        }
        let count = self.points.len();
        let saved = Some((
            std::mem::take(&mut self.points),
            std::mem::take(&mut self.colors),
        ));
        self.undo_stack.push(Batch {
            start: 0,
            count,
            saved,
        });
        true
    }

    /// Replicate the current flat buffer `layer_count` times, layer `i`
    /// shifted by `i * layer_height` along z. Colors convert once to 8-bit
    /// channels and repeat per layer. Returns `None` when the buffer is
    /// empty. Pure with respect to the store.
    pub fn build_layers(&self) -> Option<LayeredCloud> {
        if self.points.is_empty() {
            return None;
        }
        let layers = self.export.layer_count.max(1) as usize;
        let step = self.export.layer_height.abs();
        let base_colors: Vec<[u8; 3]> = self
            .colors
            .iter()
            .map(|c| {
                [
                    channel_to_u8(c[0]),
                    channel_to_u8(c[1]),
                    channel_to_u8(c[2]),
                ]
            })
            .collect();

        let mut points = Vec::with_capacity(self.points.len() * layers);
        let mut colors = Vec::with_capacity(self.points.len() * layers);
        for i in 0..layers {
            let z = i as f64 * step;
            for p in &self.points {
                points.push([p[0], p[1], p[2] + z]);
            }
            colors.extend_from_slice(&base_colors);
        }
        Some(LayeredCloud { points, colors })
    }
}

/// Evenly spaced grid coordinates spanning `[center - size/2, center + size/2]`.
/// A single-sample axis collapses to the center.
fn grid_axis(center: f64, size: f64, samples: usize) -> Vec<f64> {
    if samples == 1 {
        return vec![center];
    }
    let half = size / 2.0;
    let step = size / (samples - 1) as f64;
    (0..samples).map(|i| center - half + i as f64 * step).collect()
}

fn channel_to_u8(c: f32) -> u8 {
    (f64::from(c) * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DEFAULT_CLOUD_COLOR;

    #[test]
    fn test_single_point_lands_on_center() {
        let mut pc = PointCloud::new();
        let added = pc.add_square(3.0, 4.0, 1.0, 1, DEFAULT_CLOUD_COLOR);
        assert_eq!(added, 1);
        assert_eq!(pc.points(), &[[3.0, 4.0, 0.0]]);
    }

    #[test]
    fn test_target_200_yields_196_point_grid() {
        let mut pc = PointCloud::new();
        let added = pc.add_square(0.0, 0.0, 2.0, 200, DEFAULT_CLOUD_COLOR);
        assert_eq!(added, 196); // floor(sqrt(200))^2

        // Grid spans [cx - size/2, cx + size/2] on both axes.
        let xs: Vec<f64> = pc.points().iter().map(|p| p[0]).collect();
        let ys: Vec<f64> = pc.points().iter().map(|p| p[1]).collect();
        let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min_x + 1.0).abs() < 1e-12);
        assert!((max_x - 1.0).abs() < 1e-12);
        let min_y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min_y + 1.0).abs() < 1e-12);
        assert!((max_y - 1.0).abs() < 1e-12);

        // Regular spacing: first row advances along x by size / (side - 1).
        let step = pc.points()[1][0] - pc.points()[0][0];
        assert!((step - 2.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_target_clamps_to_one() {
        let mut pc = PointCloud::new();
        assert_eq!(pc.add_square(0.0, 0.0, 1.0, 0, DEFAULT_CLOUD_COLOR), 1);
    }

    #[test]
    fn test_buffers_stay_aligned() {
        let mut pc = PointCloud::new();
        for i in 0..5u32 {
            pc.add_square(f64::from(i), 0.0, 1.0, 10 + i, DEFAULT_CLOUD_COLOR);
            assert_eq!(pc.points().len(), pc.colors().len());
        }
        pc.undo();
        assert_eq!(pc.points().len(), pc.colors().len());
        pc.clear();
        assert_eq!(pc.points().len(), pc.colors().len());
    }

    #[test]
    fn test_undo_restores_exact_buffers() {
        let mut pc = PointCloud::new();
        pc.add_square(1.0, 1.0, 1.0, 9, [0.1, 0.2, 0.3]);
        let points_before = pc.points().to_vec();
        let colors_before = pc.colors().to_vec();

        pc.add_square(5.0, 5.0, 2.0, 25, [0.9, 0.8, 0.7]);
        assert!(pc.undo());

        assert_eq!(pc.points(), points_before.as_slice());
        assert_eq!(pc.colors(), colors_before.as_slice());
    }

    #[test]
    fn test_full_history_unwinds_to_empty() {
        let mut pc = PointCloud::new();
        for i in 0..4 {
            pc.add_square(i as f64, i as f64, 1.0, 16, DEFAULT_CLOUD_COLOR);
        }
        for _ in 0..4 {
            assert!(pc.undo());
        }
        assert!(pc.is_empty());
        assert!(!pc.undo());
    }

    #[test]
    fn test_clear_then_undo_restores_everything() {
        let mut pc = PointCloud::new();
        pc.add_square(1.0, 2.0, 1.0, 9, [0.5, 0.5, 0.5]);
        pc.add_square(3.0, 4.0, 1.0, 16, [0.2, 0.4, 0.6]);
        let points_before = pc.points().to_vec();
        let colors_before = pc.colors().to_vec();

        assert!(pc.clear());
        assert!(pc.is_empty());
        assert!(pc.undo());

        assert_eq!(pc.points(), points_before.as_slice());
        assert_eq!(pc.colors(), colors_before.as_slice());
    }

    #[test]
    fn test_history_across_clear_unwinds_in_order() {
        let mut pc = PointCloud::new();
        pc.add_square(0.0, 0.0, 1.0, 9, [0.1, 0.1, 0.1]);
        let first = pc.points().to_vec();
        pc.clear();
        pc.add_square(7.0, 7.0, 1.0, 4, [0.9, 0.9, 0.9]);

        assert!(pc.undo()); // drop the post-clear cloud
        assert!(pc.is_empty());
        assert!(pc.undo()); // undo the clear
        assert_eq!(pc.points(), first.as_slice());
        assert!(pc.undo()); // undo the original append
        assert!(pc.is_empty());
        assert!(!pc.can_undo());
    }

    #[test]
    fn test_clear_on_empty_is_noop() {
        let mut pc = PointCloud::new();
        assert!(!pc.clear());
        assert!(!pc.undo());
    }

    #[test]
    fn test_stored_points_stay_flat() {
        let mut pc = PointCloud::new();
        pc.export.layer_count = 5;
        pc.add_square(0.0, 0.0, 1.0, 50, DEFAULT_CLOUD_COLOR);
        let _ = pc.build_layers();
        assert!(pc.points().iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn test_build_layers_replicates_with_z_offsets() {
        let mut pc = PointCloud::new();
        pc.export = ExportSettings {
            layer_height: 0.5,
            layer_count: 3,
        };
        pc.add_square(2.0, 3.0, 1.0, 9, [1.0, 0.5, 0.0]);

        let layers = pc.build_layers().unwrap();
        let m = pc.len();
        assert_eq!(layers.len(), m * 3);
        for i in 0..3 {
            for j in 0..m {
                let src = pc.points()[j];
                let got = layers.points[i * m + j];
                assert_eq!(got[0], src[0]);
                assert_eq!(got[1], src[1]);
                assert!((got[2] - i as f64 * 0.5).abs() < 1e-12);
                assert_eq!(layers.colors[i * m + j], [255, 128, 0]);
            }
        }
    }

    #[test]
    fn test_build_layers_empty_is_none() {
        let pc = PointCloud::new();
        assert!(pc.build_layers().is_none());
    }
}
