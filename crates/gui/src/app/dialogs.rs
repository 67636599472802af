//! Native dialogs backing the `UserPrompt` trait.

use std::path::PathBuf;

use crate::render::UserPrompt;

/// rfd-backed prompts: modal yes/no, save-file picker, message box.
pub struct DialogPrompt;

impl UserPrompt for DialogPrompt {
    fn ask_yes_no(&mut self, message: &str) -> bool {
        rfd::MessageDialog::new()
            .set_title("Confirm")
            .set_description(message)
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show()
            == rfd::MessageDialogResult::Yes
    }

    fn ask_save_path(&mut self, extension: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(format!("Save {}", extension.to_uppercase()))
            .add_filter(extension.to_uppercase(), &[extension])
            .set_file_name(format!("cloud.{extension}"))
            .save_file()
    }

    fn notify(&mut self, title: &str, message: &str) {
        rfd::MessageDialog::new()
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Prompt that swallows notifications, for settings updates that should not
/// interrupt the user (color picks).
pub struct SilentPrompt;

impl UserPrompt for SilentPrompt {
    fn ask_yes_no(&mut self, _message: &str) -> bool {
        false
    }

    fn ask_save_path(&mut self, _extension: &str) -> Option<PathBuf> {
        None
    }

    fn notify(&mut self, _title: &str, _message: &str) {}
}
