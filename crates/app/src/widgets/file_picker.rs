//! File picker widget using rfd (rust file dialog).
//!
//! The portfolio only records *which* file was chosen as a project demo, so
//! the picker hands back a display name and never opens the file.

use std::path::{Path, PathBuf};

/// Filter for file types.
#[derive(Clone)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn demo_media() -> Self {
        Self::new(
            "Demo media",
            &["mp4", "webm", "mov", "gif", "png", "jpg", "jpeg", "pdf"],
        )
    }

    pub fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }
}

/// File picker widget for choosing a demo file.
pub struct FilePickerWidget {
    filters: Vec<FileFilter>,
    title: String,
}

impl Default for FilePickerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerWidget {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            title: "Select File".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Blocking file picker (opens native dialog and waits).
    pub fn pick_file(&self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(&self.title);
        for filter in &self.filters {
            let ext_refs: Vec<&str> = filter.extensions.iter().map(|s| s.as_str()).collect();
            dialog = dialog.add_filter(&filter.name, &ext_refs);
        }
        dialog.pick_file()
    }

    /// Pick a file and return only its name.
    pub fn pick_display_name(&self) -> Option<String> {
        self.pick_file().as_deref().and_then(display_name)
    }
}

/// Final path component as text, if there is one.
pub fn display_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_picker_creation() {
        let picker = FilePickerWidget::new()
            .with_title("Attach demo")
            .with_filter(FileFilter::demo_media())
            .with_filter(FileFilter::all_files());

        assert_eq!(picker.title, "Attach demo");
        assert_eq!(picker.filters.len(), 2);
        assert!(picker.filters[0].extensions.contains(&"mp4".to_string()));
    }

    #[test]
    fn test_display_name_keeps_only_file_name() {
        assert_eq!(
            display_name(Path::new("/home/me/videos/demo.mp4")).as_deref(),
            Some("demo.mp4")
        );
        assert_eq!(display_name(Path::new("/")), None);
    }
}
