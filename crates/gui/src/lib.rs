// Library crate: exposes testable modules for integration tests.
// GUI-specific modules (app, ui, canvas painting) remain in the binary crate.

pub mod cloud;
pub mod controller;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod render;
