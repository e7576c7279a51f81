//! In-memory project list.
//!
//! Seeded once from the profile and edited in place for the lifetime of the
//! process. Nothing is written to disk; edits are gone on restart.

use shared::project::{Project, ProjectPatch};

#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Current snapshot, in seed order.
    pub fn list_all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Titles as they currently read, including in-session edits.
    pub fn titles(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.title.clone()).collect()
    }

    /// Merge `patch` into project `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: u32, patch: ProjectPatch) {
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                tracing::debug!(project_id = id, ?patch, "updating project");
                project.apply(patch);
            }
            None => tracing::debug!(project_id = id, "update for unknown project ignored"),
        }
    }

    /// Record the display name of a locally picked demo file.
    pub fn attach_demo(&mut self, id: u32, file_name: impl Into<String>) {
        self.update(id, ProjectPatch::demo_file_name(file_name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::profile::Profile;

    fn seeded() -> ProjectStore {
        ProjectStore::new(Profile::seed().projects)
    }

    #[test]
    fn test_update_title_keeps_other_fields() {
        let mut store = seeded();
        let before = store.get(1).cloned().unwrap();

        store.update(1, ProjectPatch::title("Y"));

        let after = store.get(1).unwrap();
        assert_eq!(after.id, 1);
        assert_eq!(after.title, "Y");
        assert_eq!(after.short_description, before.short_description);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.status, before.status);
        assert_eq!(after.source_link, before.source_link);
        assert_eq!(after.deployed, before.deployed);
    }

    #[test]
    fn test_attach_demo_sets_file_name_only() {
        let mut store = seeded();
        let before = store.get(2).cloned().unwrap();

        store.attach_demo(2, "demo.mp4");

        let after = store.get(2).unwrap();
        assert_eq!(after.demo_file_name.as_deref(), Some("demo.mp4"));
        let mut expected = before;
        expected.demo_file_name = Some("demo.mp4".into());
        assert_eq!(*after, expected);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = seeded();
        let before = store.list_all().to_vec();

        store.update(99, ProjectPatch::title("ghost"));
        store.attach_demo(99, "ghost.mp4");

        assert_eq!(store.list_all(), before.as_slice());
    }

    #[test]
    fn test_list_all_keeps_seed_order_after_edits() {
        let mut store = seeded();
        store.update(3, ProjectPatch::short_description(""));
        let ids: Vec<u32> = store.list_all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(store.get(3).unwrap().short_description, "");
    }

    #[test]
    fn test_titles_reflect_updates() {
        let mut store = seeded();
        store.update(1, ProjectPatch::title("X"));
        assert_eq!(store.titles()[0], "X");
        assert_eq!(store.len(), 4);
    }
}
