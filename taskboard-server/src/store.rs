//! In-memory task store shared by all request handlers.
//!
//! The [`TaskStore`] owns the process-wide task list. It is seeded from disk
//! at start-up, grows when tasks are added through the form, and is lost on
//! restart. Nothing is written back to disk.

use std::path::Path;

use taskboard_core::{SortSpec, Task, TaskFilter, order};
use tokio::sync::RwLock;

use crate::loader::{self, LoadError};

/// Ordered, in-memory list of known tasks.
///
/// Thread-safe via [`RwLock`]: listings take a read lock, additions and
/// reloads take the write lock.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks` in the given order.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }

    /// Replaces the contents with the tasks found in `dir`, returning how
    /// many were loaded.
    ///
    /// Tasks keep their file order; pinned-first ordering happens when the
    /// store is queried.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if any file fails to load. The current contents
    /// are left untouched in that case.
    pub async fn load(&self, dir: &Path) -> Result<usize, LoadError> {
        let loaded = loader::load_all(dir).await?;
        let count = loaded.len();
        *self.tasks.write().await = loaded;
        tracing::info!(dir = %dir.display(), count, "task store loaded");
        Ok(count)
    }

    /// Returns the tasks matching `filter`, ordered by `sort`.
    pub async fn list(&self, filter: &TaskFilter, sort: Option<SortSpec>) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let matching = filter.apply(&tasks);
        drop(tasks);
        order(&matching, sort)
    }

    /// Inserts `task` at the front of the store, then re-orders the whole
    /// store by `sort` (pinned-first at minimum).
    pub async fn add(&self, task: Task, sort: Option<SortSpec>) {
        let mut tasks = self.tasks.write().await;
        tasks.insert(0, task);
        taskboard_core::order::sort_in_place(&mut tasks, sort);
        let len = tasks.len();
        drop(tasks);
        tracing::debug!(len, "task added");
    }

    /// Returns a copy of the stored tasks in stored order.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Returns the number of stored tasks.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Returns `true` if the store holds no tasks.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}
