//! HTML rendering with embedded `minijinja` templates.

use minijinja::{Environment, context};
use serde::Serialize;
use taskboard_core::Task;

use crate::form::AddTaskForm;
use crate::routes::ListQuery;

/// Errors produced while rendering a page.
#[derive(Debug, thiserror::Error)]
#[error("template rendering failed: {0}")]
pub struct RenderError(#[from] minijinja::Error);

/// Display-ready view of a task.
#[derive(Debug, Serialize)]
struct TaskView<'a> {
    title: &'a str,
    description: &'a str,
    priority: i64,
    due_date: Option<&'a str>,
    pinned: bool,
    tags: &'a [String],
    progress: Option<String>,
}

impl<'a> From<&'a Task> for TaskView<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            description: &task.description,
            priority: task.priority,
            due_date: task.due_date.as_deref(),
            pinned: task.pinned,
            tags: &task.tags,
            progress: task.progress.as_ref().map(ToString::to_string),
        }
    }
}

/// Compiled page templates.
pub struct Templates {
    env: Environment<'static>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

impl Templates {
    /// Compiles the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a template fails to parse.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template("home.html", include_str!("../templates/home.html"))?;
        env.add_template("add.html", include_str!("../templates/add.html"))?;
        Ok(Self { env })
    }

    /// Renders the task listing, echoing the current filter and sort choices.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if rendering fails.
    pub fn render_home(&self, tasks: &[Task], query: &ListQuery) -> Result<String, RenderError> {
        let tasks: Vec<TaskView<'_>> = tasks.iter().map(TaskView::from).collect();
        let html = self.env.get_template("home.html")?.render(context! {
            tasks => tasks,
            query => context! {
                title_q => query.title_q,
                tag_q => query.tag_q,
                sort_by => query.sort_by,
                sort_order => query.sort_order,
            },
        })?;
        Ok(html)
    }

    /// Renders the add-task form, pre-filled with `form` and showing `error`
    /// if given.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if rendering fails.
    pub fn render_add(&self, form: &AddTaskForm, error: Option<&str>) -> Result<String, RenderError> {
        let html = self.env.get_template("add.html")?.render(context! {
            form => form,
            error => error,
        })?;
        Ok(html)
    }
}
