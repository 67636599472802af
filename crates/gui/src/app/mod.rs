//! Main application module

mod dialogs;
mod prefs;

use std::time::{Duration, Instant};

use eframe::egui;
use shared::SettingsForm;

use crate::canvas::CanvasPanel;
use crate::cloud::PointCloud;
use crate::controller::{ExportFormat, RedrawScheduler, SketchController};
use crate::render::{self, UserPrompt};
use crate::ui::{actions, settings_panel};

use dialogs::DialogPrompt;

/// Main application
pub struct SketchApp {
    cloud: PointCloud,
    controller: SketchController,
    form: SettingsForm,
    canvas: CanvasPanel,
    prompt: DialogPrompt,
    /// When the pending debounced redraw is due, if any.
    redraw_deadline: Option<Instant>,
    /// Whether the first (blocking) render has happened.
    rendered_once: bool,
}

impl SketchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = prefs::load();
        let form = SettingsForm::from_settings(&settings);
        let controller = SketchController::new(settings);
        let mut cloud = PointCloud::new();
        cloud.export = controller.settings().export;

        Self {
            cloud,
            controller,
            form,
            canvas: CanvasPanel::new(),
            prompt: DialogPrompt,
            redraw_deadline: None,
            rendered_once: false,
        }
    }

    /// Rebuild the canvas display buffer from the store.
    fn refresh(&mut self) {
        let blocking = !self.rendered_once;
        render::refresh(
            &self.cloud,
            self.controller.settings(),
            &mut self.canvas,
            blocking,
        );
        self.rendered_once = true;
    }

    fn apply_settings(&mut self) {
        let color = self.controller.settings().cloud_color;
        match self.form.parse(color) {
            Ok(settings) => {
                self.controller
                    .apply_settings(settings, &mut self.cloud, &mut self.prompt);
                // Echo the clamped values back into the form.
                self.form = SettingsForm::from_settings(self.controller.settings());
                prefs::save(self.controller.settings());
                self.refresh();
            }
            Err(e) => {
                tracing::warn!("Rejected settings: {e}");
                self.prompt.notify("Settings", &e.to_string());
            }
        }
    }

    fn run_action(&mut self, action: actions::Action) {
        match action {
            actions::Action::Undo => {
                if self.controller.undo(&mut self.cloud) {
                    self.refresh();
                }
            }
            actions::Action::Clear => {
                if self.controller.clear(&mut self.cloud, &mut self.prompt) {
                    self.refresh();
                }
            }
            actions::Action::SavePly => self.export(ExportFormat::Ply),
            actions::Action::SavePcd => self.export(ExportFormat::Pcd),
            actions::Action::Refresh => self.refresh(),
        }
    }

    fn export(&mut self, format: ExportFormat) {
        match self.controller.export(&self.cloud, format, &mut self.prompt) {
            Ok(true) => self.refresh(),
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Export failed: {e}");
                self.prompt
                    .notify("Error", &format!("Export failed: {e}"));
            }
        }
    }

    /// Update the color in place without waiting for Apply; painting with a
    /// freshly picked color is what users expect.
    fn set_color(&mut self, color: [f32; 3]) {
        let mut settings = self.controller.settings().clone();
        settings.cloud_color = color;
        let mut quiet = dialogs::SilentPrompt;
        self.controller
            .apply_settings(settings, &mut self.cloud, &mut quiet);
        prefs::save(self.controller.settings());
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Fire the debounce timer when its deadline has passed.
        if let Some(deadline) = self.redraw_deadline {
            if Instant::now() >= deadline {
                self.redraw_deadline = None;
                if self.controller.redraw_fired() {
                    self.refresh();
                }
            } else {
                ctx.request_repaint_after(deadline - Instant::now());
            }
        }

        if !self.rendered_once {
            self.refresh();
        }

        // ── Controls panel ───────────────────────────────────
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                let mut color = self.controller.settings().cloud_color;
                let out = settings_panel::show(ui, &mut self.form, &mut color);
                if color != self.controller.settings().cloud_color {
                    self.set_color(color);
                }
                if out.apply_clicked {
                    self.apply_settings();
                }

                ui.separator();
                if let Some(action) = actions::show(ui, self.cloud.can_undo()) {
                    self.run_action(action);
                }
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} points", self.cloud.len()));
                if self.controller.redraw_pending() {
                    ui.separator();
                    ui.label("redraw pending\u{2026}");
                }
            });
        });

        // ── Canvas ───────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            let dpi = self.controller.settings().dpi;
            let events = self.canvas.show(ui, dpi);
            let mut scheduler = RepaintScheduler {
                ctx,
                deadline: &mut self.redraw_deadline,
            };
            for event in events {
                self.controller
                    .handle_pointer(event, &mut self.cloud, &mut scheduler);
            }
        });
    }
}

/// Scheduler backed by egui's deferred repaint: remembers the deadline and
/// asks the event loop to wake up then.
struct RepaintScheduler<'a> {
    ctx: &'a egui::Context,
    deadline: &'a mut Option<Instant>,
}

impl RedrawScheduler for RepaintScheduler<'_> {
    fn schedule_once(&mut self, delay_ms: u64) {
        let delay = Duration::from_millis(delay_ms);
        *self.deadline = Some(Instant::now() + delay);
        self.ctx.request_repaint_after(delay);
    }
}
