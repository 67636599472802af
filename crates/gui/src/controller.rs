//! Interaction controller.
//!
//! Turns the pointer-event stream into batch appends on the store, debounces
//! redraws behind a single pending flag, and runs the user commands
//! (apply settings, undo, clear, export). The controller never touches a
//! real widget: the canvas, dialogs, and timer are reached through the
//! [`CanvasRenderer`], [`UserPrompt`], and [`RedrawScheduler`] traits.
//!
//! [`CanvasRenderer`]: crate::render::CanvasRenderer

use std::io;

use glam::DVec2;
use shared::SketchSettings;

use crate::cloud::PointCloud;
use crate::export;
use crate::render::UserPrompt;

/// Squared drag distance (canvas units) below which pointer moves are
/// ignored. Throttles the append rate during fast drags.
pub const DRAG_SAMPLE_DIST_SQ: f64 = 0.0005;

/// Debounce window between the first append and the redraw that flushes it.
pub const REDRAW_DELAY_MS: u64 = 30;

/// A pointer event with its position already mapped into map coordinates.
/// `pos: None` means the pointer was outside the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { pos: Option<DVec2> },
    Move { pos: Option<DVec2> },
    Release,
}

/// Binary export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Ply,
    Pcd,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Ply => "ply",
            ExportFormat::Pcd => "pcd",
        }
    }
}

/// Deferred single-shot redraw task. At most one is outstanding; scheduling
/// while one is pending is suppressed by the controller, never queued.
pub trait RedrawScheduler {
    fn schedule_once(&mut self, delay_ms: u64);
}

/// Pointer-drag state machine plus redraw debouncing and command handling.
pub struct SketchController {
    settings: SketchSettings,
    /// Last sampled position while a drag is in progress; `None` when idle.
    drag_anchor: Option<DVec2>,
    redraw_pending: bool,
}

impl SketchController {
    pub fn new(settings: SketchSettings) -> Self {
        Self {
            settings: settings.clamped(),
            drag_anchor: None,
            redraw_pending: false,
        }
    }

    pub fn settings(&self) -> &SketchSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Feed one pointer event through the drag state machine. Returns true
    /// when a cloud was appended (a debounced redraw is then pending).
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        cloud: &mut PointCloud,
        scheduler: &mut dyn RedrawScheduler,
    ) -> bool {
        match event {
            PointerEvent::Press { pos: Some(p) } => {
                self.drag_anchor = Some(p);
                self.paint_at(p, cloud, scheduler);
                true
            }
            PointerEvent::Move { pos: Some(p) } => {
                let Some(anchor) = self.drag_anchor else {
                    return false; // not dragging
                };
                if anchor.distance_squared(p) <= DRAG_SAMPLE_DIST_SQ {
                    return false; // below the sampling threshold
                }
                self.drag_anchor = Some(p);
                self.paint_at(p, cloud, scheduler);
                true
            }
            PointerEvent::Release => {
                self.drag_anchor = None;
                false
            }
            // No valid canvas mapping: ignored in every state.
            PointerEvent::Press { pos: None } | PointerEvent::Move { pos: None } => false,
        }
    }

    fn paint_at(&mut self, p: DVec2, cloud: &mut PointCloud, scheduler: &mut dyn RedrawScheduler) {
        cloud.add_square(
            p.x,
            p.y,
            self.settings.cloud_size,
            self.settings.points_per_cloud,
            self.settings.cloud_color,
        );
        if !self.redraw_pending {
            self.redraw_pending = true;
            scheduler.schedule_once(REDRAW_DELAY_MS);
        }
    }

    /// Called when the debounce timer fires. Clears the pending flag and
    /// returns whether a redraw is due; the host then performs exactly one
    /// redraw reflecting every append since the last flush.
    pub fn redraw_fired(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Replace the settings with a clamped copy of `candidate`, push the
    /// export settings into the store, and report the export summary.
    /// The caller redraws immediately afterwards.
    pub fn apply_settings(
        &mut self,
        candidate: SketchSettings,
        cloud: &mut PointCloud,
        prompt: &mut dyn UserPrompt,
    ) {
        self.settings = candidate.clamped();
        cloud.export = self.settings.export;
        prompt.notify(
            "Settings",
            &format!(
                "Export: {} layers \u{d7} {} m",
                self.settings.export.layer_count, self.settings.export.layer_height
            ),
        );
    }

    /// Undo the most recent batch. Returns true when the store changed
    /// (caller redraws immediately).
    pub fn undo(&mut self, cloud: &mut PointCloud) -> bool {
        cloud.undo()
    }

    /// Clear the store after a yes/no confirmation. Returns true when the
    /// store changed (caller redraws immediately).
    pub fn clear(&mut self, cloud: &mut PointCloud, prompt: &mut dyn UserPrompt) -> bool {
        if !prompt.ask_yes_no("Clear all points?") {
            return false;
        }
        cloud.clear()
    }

    /// Export the layered cloud in the given format. Notifies on an empty
    /// buffer and on success; a cancelled save dialog is a silent no-op.
    /// Write failures propagate to the caller.
    pub fn export(
        &mut self,
        cloud: &PointCloud,
        format: ExportFormat,
        prompt: &mut dyn UserPrompt,
    ) -> io::Result<bool> {
        if cloud.is_empty() {
            prompt.notify("Error", "No points to save.");
            return Ok(false);
        }
        let Some(path) = prompt.ask_save_path(format.extension()) else {
            return Ok(false);
        };
        let written = match format {
            ExportFormat::Ply => export::save_ply(cloud, &path)?,
            ExportFormat::Pcd => export::save_pcd(cloud, &path)?,
        };
        if written {
            let e = &cloud.export;
            prompt.notify(
                "Saved",
                &format!(
                    "Saved {} layers \u{d7} {}m = {:.3}m",
                    e.layer_count,
                    e.layer_height,
                    e.total_height()
                ),
            );
        }
        Ok(written)
    }
}
