use std::collections::HashMap;

use chrono::Utc;

use crate::model::Task;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("reorder ids do not match the stored task set")]
    InvalidReorder,
}

/// Partial edit applied by [`TaskStore::update`].
///
/// `None` leaves a field alone. A blank value is ignored as well, keeping
/// the previous one (the "keep old value on blank save" policy).
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub date: Option<String>,
}

/// Owns the canonical task list.
///
/// All mutation goes through this API; other components see `&Task`
/// snapshots, never the backing vector. Insertion order is preserved and is
/// what [`TaskStore::list`] returns, independent of display order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// Per-session id sequence
    next_seq: u64,
    /// Floor for creation stamps; keeps them strictly increasing even when
    /// the wall clock stalls or steps backwards
    clock_floor: i64,
}

impl TaskStore {
    pub fn new() -> TaskStore {
        TaskStore::default()
    }

    /// Rehydrate a store from previously persisted tasks. The timestamp
    /// floor is primed from the loaded maximum so session-new tasks always
    /// sort after loaded ones by creation time.
    pub fn from_tasks(tasks: Vec<Task>) -> TaskStore {
        let clock_floor = tasks.iter().map(|t| t.created_at).max().unwrap_or(0);
        TaskStore {
            tasks,
            next_seq: 0,
            clock_floor,
        }
    }

    /// Create a task from user input and append it.
    ///
    /// The title must be non-blank after trimming; the date is optional and
    /// stored as `""` when blank. The new task gets a fresh id, the current
    /// creation stamp, and a manual rank at the end of the list.
    pub fn add(&mut self, title: &str, date: &str) -> Result<Task, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let created_at = self.next_timestamp();
        let id = format!("t-{}-{}", created_at, self.next_seq);
        self.next_seq += 1;

        let task = Task {
            id,
            title: title.to_string(),
            date: date.trim().to_string(),
            done: false,
            created_at,
            order: self.tasks.len() as i64,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Apply a partial edit to title and/or date.
    ///
    /// Blank edits keep the old value; id, creation stamp, manual rank and
    /// completion flag are not editable through this path.
    pub fn update(&mut self, id: &str, edit: TaskEdit) -> Result<Task, StoreError> {
        let task = self.find_mut(id)?;
        if let Some(title) = edit.title {
            let title = title.trim();
            if !title.is_empty() {
                task.title = title.to_string();
            }
        }
        if let Some(date) = edit.date {
            let date = date.trim();
            if !date.is_empty() {
                task.date = date.to_string();
            }
        }
        Ok(task.clone())
    }

    /// Set the completion flag.
    pub fn set_done(&mut self, id: &str, done: bool) -> Result<Task, StoreError> {
        let task = self.find_mut(id)?;
        task.done = done;
        Ok(task.clone())
    }

    /// Remove a task. Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Tasks in insertion order (not the display order).
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Reassign every task's manual rank to its index in `ids`.
    ///
    /// The sequence must contain exactly the stored ids, each once; anything
    /// else is rejected and no rank changes.
    pub fn reorder(&mut self, ids: &[String]) -> Result<(), StoreError> {
        if ids.len() != self.tasks.len() {
            return Err(StoreError::InvalidReorder);
        }

        let mut ranks: HashMap<&str, i64> = HashMap::with_capacity(ids.len());
        for (rank, id) in ids.iter().enumerate() {
            if ranks.insert(id.as_str(), rank as i64).is_some() {
                return Err(StoreError::InvalidReorder);
            }
        }
        if self.tasks.iter().any(|t| !ranks.contains_key(t.id.as_str())) {
            return Err(StoreError::InvalidReorder);
        }

        for task in &mut self.tasks {
            if let Some(&rank) = ranks.get(task.id.as_str()) {
                task.order = rank;
            }
        }
        Ok(())
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn next_timestamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let stamp = now.max(self.clock_floor + 1);
        self.clock_floor = stamp;
        stamp
    }
}
