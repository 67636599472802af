//! Actions panel: undo/clear/export/refresh buttons.

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Undo,
    Clear,
    SavePly,
    SavePcd,
    Refresh,
}

pub fn show(ui: &mut egui::Ui, can_undo: bool) -> Option<Action> {
    let mut action = None;

    ui.heading("Actions");
    ui.vertical(|ui| {
        let width = ui.available_width();
        if ui
            .add_enabled(can_undo, egui::Button::new("Undo").min_size([width, 24.0].into()))
            .clicked()
        {
            action = Some(Action::Undo);
        }
        if button(ui, width, "Clear").clicked() {
            action = Some(Action::Clear);
        }
        if button(ui, width, "Save PLY").clicked() {
            action = Some(Action::SavePly);
        }
        if button(ui, width, "Save PCD").clicked() {
            action = Some(Action::SavePcd);
        }
        if button(ui, width, "Refresh").clicked() {
            action = Some(Action::Refresh);
        }
    });

    action
}

fn button(ui: &mut egui::Ui, width: f32, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size([width, 24.0].into()))
}
