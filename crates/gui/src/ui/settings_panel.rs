//! Settings panel: text fields mirroring `SketchSettings`, applied as a
//! whole when the user clicks Apply.

use eframe::egui;
use shared::SettingsForm;

pub struct SettingsOutput {
    pub apply_clicked: bool,
}

pub fn show(ui: &mut egui::Ui, form: &mut SettingsForm, color: &mut [f32; 3]) -> SettingsOutput {
    let mut apply_clicked = false;

    ui.heading("Settings");
    egui::Grid::new("settings_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            field(ui, "Points per cloud:", &mut form.points_per_cloud);
            field(ui, "Cloud size (m):", &mut form.cloud_size);
            field(ui, "Map width (m):", &mut form.map_width);
            field(ui, "Map height (m):", &mut form.map_height);
            field(ui, "Canvas DPI:", &mut form.dpi);
            field(ui, "Layer height (m):", &mut form.layer_height);
            field(ui, "Layer count:", &mut form.layer_count);

            ui.label("Cloud color:");
            ui.color_edit_button_rgb(color);
            ui.end_row();
        });

    if ui
        .add_sized([ui.available_width(), 24.0], egui::Button::new("Apply"))
        .clicked()
    {
        apply_clicked = true;
    }

    SettingsOutput { apply_clicked }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
    ui.end_row();
}
