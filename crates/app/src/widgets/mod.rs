//! Reusable widgets for the application.

pub mod file_picker;

pub use file_picker::{FileFilter, FilePickerWidget};
