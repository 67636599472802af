//! Canvas panel: paints the cached display buffer and turns egui pointer
//! input into map-space pointer events.
//!
//! The panel is the GUI side of the [`CanvasRenderer`] contract: the
//! debounced redraw path replaces its display buffer, while the per-frame
//! paint just re-draws whatever buffer is cached. Painting therefore stays
//! cheap between redraws no matter how fast input arrives.

use eframe::egui;
use glam::DVec2;
use shared::Rgb;

use crate::controller::PointerEvent;
use crate::render::CanvasRenderer;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 24, 28);
const PLOT_FILL: egui::Color32 = egui::Color32::from_rgb(38, 38, 44);
const PLOT_BORDER: egui::Color32 = egui::Color32::from_rgb(90, 90, 100);

pub struct CanvasPanel {
    /// Map extent in meters.
    bounds: (f64, f64),
    /// Downsampled display buffer, replaced on each debounced redraw.
    points: Vec<[f64; 2]>,
    colors: Vec<Rgb>,
}

impl CanvasPanel {
    pub fn new() -> Self {
        Self {
            bounds: (1.0, 1.0),
            points: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Paint the canvas and collect this frame's pointer events.
    pub fn show(&mut self, ui: &mut egui::Ui, dpi: u32) -> Vec<PointerEvent> {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let plot_rect = self.plot_rect(rect);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);
        painter.rect_filled(plot_rect, 0.0, PLOT_FILL);
        painter.rect_stroke(
            plot_rect,
            0.0,
            egui::Stroke::new(1.0, PLOT_BORDER),
            egui::StrokeKind::Outside,
        );

        let radius = (dpi as f32 / 100.0).max(0.5);
        for (p, c) in self.points.iter().zip(&self.colors) {
            let center = self.to_screen(plot_rect, p[0], p[1]);
            painter.circle_filled(center, radius, rgb_to_color32(*c));
        }

        let mut events = Vec::new();
        let pos = response
            .interact_pointer_pos()
            .and_then(|p| self.to_map(plot_rect, p));
        if response.drag_started_by(egui::PointerButton::Primary) {
            events.push(PointerEvent::Press { pos });
        } else if response.dragged_by(egui::PointerButton::Primary) {
            events.push(PointerEvent::Move { pos });
        } else if response.clicked() {
            // A plain click never crosses egui's drag threshold; treat it as
            // an immediate press-and-release.
            events.push(PointerEvent::Press { pos });
            events.push(PointerEvent::Release);
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            events.push(PointerEvent::Release);
        }
        events
    }

    /// The aspect-equal sub-rect the map occupies inside the widget.
    fn plot_rect(&self, rect: egui::Rect) -> egui::Rect {
        let (map_w, map_h) = self.bounds;
        let scale = f64::min(
            f64::from(rect.width()) / map_w,
            f64::from(rect.height()) / map_h,
        );
        let size = egui::vec2((map_w * scale) as f32, (map_h * scale) as f32);
        egui::Rect::from_center_size(rect.center(), size)
    }

    fn to_screen(&self, plot: egui::Rect, x: f64, y: f64) -> egui::Pos2 {
        let fx = (x / self.bounds.0) as f32;
        let fy = (y / self.bounds.1) as f32;
        egui::pos2(
            plot.left() + fx * plot.width(),
            plot.bottom() - fy * plot.height(), // map y points up
        )
    }

    /// Screen position to map coordinates; `None` outside the plot area.
    fn to_map(&self, plot: egui::Rect, pos: egui::Pos2) -> Option<DVec2> {
        if !plot.contains(pos) {
            return None;
        }
        let fx = f64::from((pos.x - plot.left()) / plot.width());
        let fy = f64::from((plot.bottom() - pos.y) / plot.height());
        Some(DVec2::new(fx * self.bounds.0, fy * self.bounds.1))
    }
}

impl CanvasRenderer for CanvasPanel {
    fn set_bounds(&mut self, width: f64, height: f64) {
        self.bounds = (width.max(f64::EPSILON), height.max(f64::EPSILON));
    }

    fn draw_points(&mut self, xy: &[[f64; 2]], colors: &[Rgb]) {
        self.points = xy.to_vec();
        self.colors = colors.to_vec();
    }

    fn clear_display(&mut self) {
        self.points.clear();
        self.colors.clear();
    }

    fn flush(&mut self, _blocking: bool) {
        // egui presents every frame; the cached buffer is picked up by the
        // next paint either way.
    }
}

fn rgb_to_color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(
        (c[0] * 255.0).round().clamp(0.0, 255.0) as u8,
        (c[1] * 255.0).round().clamp(0.0, 255.0) as u8,
        (c[2] * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}
