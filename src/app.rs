use std::path::{Path, PathBuf};

use tracing::warn;

use crate::io::store_io;
use crate::model::{FilterMode, SortMode, Task};
use crate::ops::{project, weave_visible_order};
use crate::store::{StoreError, TaskEdit, TaskStore};

/// The collaborator-facing application core.
///
/// Owns the store, the persistence slot and the current view criteria. The
/// rendering layer calls the mutation entry points from its event handlers
/// and redraws from [`TaskApp::current_projection`] after each one; it never
/// reaches the store directly.
pub struct TaskApp {
    store: TaskStore,
    store_path: PathBuf,
    query: String,
    filter: FilterMode,
    sort: SortMode,
}

impl TaskApp {
    /// Open the app against a store file, loading whatever is there.
    /// A missing or damaged blob starts an empty session.
    pub fn open(store_path: impl Into<PathBuf>) -> TaskApp {
        let store_path = store_path.into();
        let store = TaskStore::from_tasks(store_io::load_tasks(&store_path));
        TaskApp {
            store,
            store_path,
            query: String::new(),
            filter: FilterMode::All,
            sort: SortMode::CreatedAsc,
        }
    }

    pub fn add_task(&mut self, title: &str, date: &str) -> Result<Task, StoreError> {
        let task = self.store.add(title, date)?;
        self.persist();
        Ok(task)
    }

    pub fn edit_task(
        &mut self,
        id: &str,
        title: Option<String>,
        date: Option<String>,
    ) -> Result<Task, StoreError> {
        let task = self.store.update(id, TaskEdit { title, date })?;
        self.persist();
        Ok(task)
    }

    pub fn toggle_done(&mut self, id: &str, done: bool) -> Result<Task, StoreError> {
        let task = self.store.set_done(id, done)?;
        self.persist();
        Ok(task)
    }

    /// Delete a task. Unknown ids are a quiet no-op, mirroring how a stale
    /// row in the rendering layer should not take the session down.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// Commit a drag-and-drop ordering of the currently visible tasks.
    ///
    /// The dragged sequence is woven around tasks hidden by the active
    /// filter or search, the store reassigns dense ranks, and the sort mode
    /// flips to manual: a drag is an explicit manual-order request.
    pub fn commit_reorder(&mut self, visible_ids: &[String]) -> Result<(), StoreError> {
        let full = weave_visible_order(self.store.list(), visible_ids)?;
        self.store.reorder(&full)?;
        self.sort = SortMode::Manual;
        self.persist();
        Ok(())
    }

    /// The filtered, searched, sorted view the rendering layer draws from.
    pub fn current_projection(&self) -> Vec<&Task> {
        project(self.store.list(), &self.query, self.filter, self.sort)
    }

    /// Tasks in insertion order, independent of the view criteria.
    pub fn tasks(&self) -> &[Task] {
        self.store.list()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Fire-and-forget save. A failed write is warned about and the session
    /// carries on from memory; the next mutation's save retries implicitly.
    fn persist(&self) {
        if let Err(err) = store_io::save_tasks(&self.store_path, self.store.list()) {
            warn!(%err, "task save failed, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_app(tmp: &TempDir) -> TaskApp {
        TaskApp::open(tmp.path().join("tasks.json"))
    }

    #[test]
    fn test_open_on_empty_slot() {
        let tmp = TempDir::new().unwrap();
        let app = open_app(&tmp);

        assert!(app.tasks().is_empty());
        assert_eq!(app.query(), "");
        assert_eq!(app.filter(), FilterMode::All);
        assert_eq!(app.sort(), SortMode::CreatedAsc);
    }

    #[test]
    fn test_mutations_persist_across_sessions() {
        let tmp = TempDir::new().unwrap();

        let first_id = {
            let mut app = open_app(&tmp);
            let first = app.add_task("Buy milk", "").unwrap();
            app.add_task("Call dentist", "2024-05-01").unwrap();
            app.toggle_done(&first.id, true).unwrap();
            first.id
        };

        let app = open_app(&tmp);
        assert_eq!(app.tasks().len(), 2);
        assert_eq!(app.tasks()[0].id, first_id);
        assert!(app.tasks()[0].done);
        assert_eq!(app.tasks()[1].title, "Call dentist");
    }

    #[test]
    fn test_delete_unknown_id_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let mut app = open_app(&tmp);
        app.add_task("keep me", "").unwrap();

        assert!(!app.delete_task("missing"));
        assert_eq!(app.tasks().len(), 1);
    }

    #[test]
    fn test_commit_reorder_forces_manual_sort() {
        let tmp = TempDir::new().unwrap();
        let mut app = open_app(&tmp);
        let a = app.add_task("a", "").unwrap();
        let b = app.add_task("b", "").unwrap();
        app.set_sort(SortMode::CreatedDesc);

        app.commit_reorder(&[b.id.clone(), a.id.clone()]).unwrap();

        assert_eq!(app.sort(), SortMode::Manual);
        let view = app.current_projection();
        assert_eq!(view[0].id, b.id);
        assert_eq!(view[1].id, a.id);
    }

    #[test]
    fn test_failed_reorder_leaves_sort_mode_alone() {
        let tmp = TempDir::new().unwrap();
        let mut app = open_app(&tmp);
        app.add_task("a", "").unwrap();

        let err = app.commit_reorder(&["ghost".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidReorder));
        assert_eq!(app.sort(), SortMode::CreatedAsc);
    }

    #[test]
    fn test_projection_follows_criteria() {
        let tmp = TempDir::new().unwrap();
        let mut app = open_app(&tmp);
        let milk = app.add_task("Buy milk", "").unwrap();
        app.add_task("Call dentist", "2024-05-01").unwrap();
        app.toggle_done(&milk.id, true).unwrap();

        app.set_filter(FilterMode::Open);
        let view = app.current_projection();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Call dentist");

        app.set_filter(FilterMode::All);
        app.set_query("milk");
        let view = app.current_projection();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Buy milk");
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let tmp = TempDir::new().unwrap();
        // A directory at the store path makes every save fail
        let store_path = tmp.path().join("tasks.json");
        std::fs::create_dir_all(&store_path).unwrap();

        let mut app = TaskApp::open(&store_path);
        app.add_task("survives in memory", "").unwrap();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks()[0].title, "survives in memory");
    }
}
