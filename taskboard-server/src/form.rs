//! Coercion of the add-task form into a [`Task`].
//!
//! Form values arrive as text. The rules applied here stay at the HTTP
//! boundary so the core model only ever sees typed values:
//! - `priority` must be an integer (surrounding whitespace allowed);
//! - `pinned` is `true` only for the literal text `"true"`;
//! - `tags` is comma-split and trimmed;
//! - blank `due-date` and `progress` are treated as absent.

use serde::{Deserialize, Serialize};
use taskboard_core::{Progress, Task};

/// Errors produced while coercing the add-task form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// `priority` was missing or not an integer.
    #[error("priority must be a whole number, got {0:?}")]
    InvalidPriority(String),
}

/// Raw `POST /add` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTaskForm {
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Priority as typed.
    #[serde(default)]
    pub priority: String,
    /// Due date as typed.
    #[serde(rename = "due-date", default)]
    pub due_date: String,
    /// `"true"` when the pinned checkbox is ticked.
    #[serde(default)]
    pub pinned: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub tags: String,
    /// Progress as typed.
    #[serde(default)]
    pub progress: String,
}

impl AddTaskForm {
    /// Converts the submitted fields into a task.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPriority`] if `priority` is not an integer.
    pub fn to_task(&self) -> Result<Task, FormError> {
        let priority = self
            .priority
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidPriority(self.priority.clone()))?;

        let mut task = Task::new(self.title.clone())
            .with_description(self.description.clone())
            .with_priority(priority)
            .with_pinned(self.pinned.as_deref() == Some("true"))
            .with_tags(self.tags.split(','));
        if !self.due_date.trim().is_empty() {
            task = task.with_due_date(self.due_date.trim());
        }
        if !self.progress.trim().is_empty() {
            task = task.with_progress(Progress::Text(self.progress.clone()));
        }
        Ok(task)
    }
}
