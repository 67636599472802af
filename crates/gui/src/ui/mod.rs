pub mod actions;
pub mod settings_panel;
