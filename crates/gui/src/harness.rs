//! Headless harness for driving the sketcher without a UI.
//!
//! Wires a real store and controller to recording fakes for the scheduler,
//! canvas, and dialogs, and exposes pointer-gesture helpers. Integration
//! tests (and any scripted driver) go through this instead of egui.

use std::io;
use std::path::PathBuf;

use glam::DVec2;
use shared::{Rgb, SketchSettings};

use crate::cloud::PointCloud;
use crate::controller::{ExportFormat, PointerEvent, RedrawScheduler, SketchController};
use crate::render::{self, CanvasRenderer, UserPrompt};

/// Scheduler fake: records every requested delay, fires nothing on its own.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub scheduled: Vec<u64>,
}

impl RedrawScheduler for CountingScheduler {
    fn schedule_once(&mut self, delay_ms: u64) {
        self.scheduled.push(delay_ms);
    }
}

/// Dialog fake with canned answers and recorded traffic.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub yes_no_answer: bool,
    pub save_path: Option<PathBuf>,
    pub yes_no_requests: Vec<String>,
    pub save_path_requests: Vec<String>,
    pub notifications: Vec<(String, String)>,
}

impl UserPrompt for ScriptedPrompt {
    fn ask_yes_no(&mut self, message: &str) -> bool {
        self.yes_no_requests.push(message.to_string());
        self.yes_no_answer
    }

    fn ask_save_path(&mut self, extension: &str) -> Option<PathBuf> {
        self.save_path_requests.push(extension.to_string());
        self.save_path.clone()
    }

    fn notify(&mut self, title: &str, message: &str) {
        self.notifications.push((title.to_string(), message.to_string()));
    }
}

/// Canvas fake: keeps the last drawn buffers and counts calls.
#[derive(Debug, Default)]
pub struct FakeCanvas {
    pub bounds: Option<(f64, f64)>,
    pub last_points: Vec<[f64; 2]>,
    pub last_colors: Vec<Rgb>,
    pub draw_calls: usize,
    pub clear_calls: usize,
    pub flushes: Vec<bool>,
}

impl CanvasRenderer for FakeCanvas {
    fn set_bounds(&mut self, width: f64, height: f64) {
        self.bounds = Some((width, height));
    }

    fn draw_points(&mut self, xy: &[[f64; 2]], colors: &[Rgb]) {
        self.last_points = xy.to_vec();
        self.last_colors = colors.to_vec();
        self.draw_calls += 1;
    }

    fn clear_display(&mut self) {
        self.last_points.clear();
        self.last_colors.clear();
        self.clear_calls += 1;
    }

    fn flush(&mut self, blocking: bool) {
        self.flushes.push(blocking);
    }
}

/// Store + controller + fakes, with gesture helpers.
pub struct SketchHarness {
    pub cloud: PointCloud,
    pub controller: SketchController,
    pub scheduler: CountingScheduler,
    pub canvas: FakeCanvas,
    pub prompt: ScriptedPrompt,
    rendered_once: bool,
}

impl SketchHarness {
    pub fn new() -> Self {
        Self::with_settings(SketchSettings::default())
    }

    pub fn with_settings(settings: SketchSettings) -> Self {
        let mut cloud = PointCloud::new();
        let controller = SketchController::new(settings);
        cloud.export = controller.settings().export;
        Self {
            cloud,
            controller,
            scheduler: CountingScheduler::default(),
            canvas: FakeCanvas::default(),
            prompt: ScriptedPrompt::default(),
            rendered_once: false,
        }
    }

    // ── Pointer gestures ──────────────────────────────────────

    pub fn press(&mut self, x: f64, y: f64) -> bool {
        self.pointer(PointerEvent::Press {
            pos: Some(DVec2::new(x, y)),
        })
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.pointer(PointerEvent::Move {
            pos: Some(DVec2::new(x, y)),
        })
    }

    pub fn release(&mut self) {
        self.pointer(PointerEvent::Release);
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        self.controller
            .handle_pointer(event, &mut self.cloud, &mut self.scheduler)
    }

    // ── Redraw plumbing ───────────────────────────────────────

    /// Fire the debounce timer: one refresh if a redraw was pending.
    pub fn fire_redraw(&mut self) -> bool {
        if !self.controller.redraw_fired() {
            return false;
        }
        self.redraw_now();
        true
    }

    /// Unconditional refresh, as after undo/clear/settings commands.
    pub fn redraw_now(&mut self) {
        let blocking = !self.rendered_once;
        render::refresh(
            &self.cloud,
            self.controller.settings(),
            &mut self.canvas,
            blocking,
        );
        self.rendered_once = true;
    }

    // ── Commands ──────────────────────────────────────────────

    pub fn apply_settings(&mut self, candidate: SketchSettings) {
        self.controller
            .apply_settings(candidate, &mut self.cloud, &mut self.prompt);
        self.redraw_now();
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.controller.undo(&mut self.cloud);
        if changed {
            self.redraw_now();
        }
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.controller.clear(&mut self.cloud, &mut self.prompt);
        if changed {
            self.redraw_now();
        }
        changed
    }

    pub fn export(&mut self, format: ExportFormat) -> io::Result<bool> {
        self.controller.export(&self.cloud, format, &mut self.prompt)
    }
}

impl Default for SketchHarness {
    fn default() -> Self {
        Self::new()
    }
}
