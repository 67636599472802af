mod app;
mod canvas;
mod ui;

// Re-export library modules so that `crate::cloud`, `crate::controller`,
// etc. resolve to the lib crate types everywhere in the binary.
pub use cloudsketch_gui_lib::cloud;
pub use cloudsketch_gui_lib::controller;
pub use cloudsketch_gui_lib::export;
pub use cloudsketch_gui_lib::render;

use app::SketchApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudsketch=info".into()),
        )
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CloudSketch — Point Cloud Sketcher")
            .with_inner_size([1150.0, 700.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "cloudsketch",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
