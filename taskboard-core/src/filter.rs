//! Title and tag filtering.

use crate::task::Task;

/// Optional title-substring and exact-tag criteria.
///
/// Both criteria must match when both are set. An empty string counts as
/// "not set", so a blank query parameter never hides anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    title: Option<String>,
    tag: Option<String>,
}

impl TaskFilter {
    /// Builds a filter, treating empty criteria as absent.
    #[must_use]
    pub fn new(title: Option<String>, tag: Option<String>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
            tag: tag.filter(|t| !t.is_empty()),
        }
    }

    /// The case-sensitive title substring, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The exact tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns `true` when neither criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.tag.is_none()
    }

    /// Returns `true` if `task` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.title.as_deref().is_none_or(|q| task.title.contains(q))
            && self.tag.as_deref().is_none_or(|q| task.has_tag(q))
    }

    /// Returns the matching tasks in their original order.
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Convenience wrapper over [`TaskFilter::apply`].
#[must_use]
pub fn filter(tasks: &[Task], title: Option<&str>, tag: Option<&str>) -> Vec<Task> {
    TaskFilter::new(title.map(str::to_string), tag.map(str::to_string)).apply(tasks)
}
