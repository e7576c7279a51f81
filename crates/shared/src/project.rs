//! Project records shown in the project lab.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Inactive,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub short_description: String,
    pub tags: Vec<String>,
    /// Display name of a locally chosen demo file. The file itself is
    /// never read.
    pub demo_file_name: Option<String>,
    pub status: ProjectStatus,
    pub completion_date: String,
    pub source_link: Option<String>,
    pub deployed: bool,
}

/// A partial update. `None` leaves the field untouched. There is no `id`
/// field, so a patch cannot re-key a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub demo_file_name: Option<String>,
    pub status: Option<ProjectStatus>,
    pub completion_date: Option<String>,
    pub source_link: Option<String>,
    pub deployed: Option<bool>,
}

impl ProjectPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn short_description(text: impl Into<String>) -> Self {
        Self {
            short_description: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn demo_file_name(name: impl Into<String>) -> Self {
        Self {
            demo_file_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Project {
    /// Merge `patch` into this record.
    pub fn apply(&mut self, patch: ProjectPatch) {
        let ProjectPatch {
            title,
            short_description,
            tags,
            demo_file_name,
            status,
            completion_date,
            source_link,
            deployed,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = short_description {
            self.short_description = v;
        }
        if let Some(v) = tags {
            self.tags = v;
        }
        if let Some(v) = demo_file_name {
            self.demo_file_name = Some(v);
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = completion_date {
            self.completion_date = v;
        }
        if let Some(v) = source_link {
            self.source_link = Some(v);
        }
        if let Some(v) = deployed {
            self.deployed = v;
        }
    }
}
