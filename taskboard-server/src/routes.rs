//! HTTP routes: task listing, the add-task form, and static assets.
//!
//! - `GET /` filters the store by `titleQ` / `tagQ` and orders it by
//!   `sort-by` / `sort-order`.
//! - `GET /add` shows the add-task form.
//! - `POST /add` inserts the submitted task at the front of the store,
//!   re-orders the store, and redirects to `/`.
//!
//! Anything else falls through to the static asset directory.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use taskboard_core::{SortSpec, TaskFilter};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::form::AddTaskForm;
use crate::render::{RenderError, Templates};
use crate::store::TaskStore;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The process-wide task store.
    pub store: Arc<TaskStore>,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Creates handler state around `store`, compiling the page templates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a template fails to compile.
    pub fn new(store: Arc<TaskStore>) -> Result<Self, RenderError> {
        Ok(Self {
            store,
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// Query parameters accepted by the listing (and by `POST /add` for its
/// re-ordering step).
///
/// Built from the raw query pairs so a repeated key is not a rejection:
/// the first occurrence wins, and unrecognised keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// `titleQ`: case-sensitive title substring.
    pub title_q: Option<String>,
    /// `tagQ`: exact tag.
    pub tag_q: Option<String>,
    /// `sort-by`: `due-date` or `priority`.
    pub sort_by: Option<String>,
    /// `sort-order`: `asc` or `desc`.
    pub sort_order: Option<String>,
}

impl ListQuery {
    /// Collects the recognised parameters out of decoded query pairs.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "titleQ" => &mut query.title_q,
                "tagQ" => &mut query.tag_q,
                "sort-by" => &mut query.sort_by,
                "sort-order" => &mut query.sort_order,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// The title/tag filter described by this query.
    #[must_use]
    pub fn filter(&self) -> TaskFilter {
        TaskFilter::new(self.title_q.clone(), self.tag_q.clone())
    }

    /// The secondary sort described by this query, if complete and valid.
    #[must_use]
    pub fn sort(&self) -> Option<SortSpec> {
        SortSpec::from_params(self.sort_by.as_deref(), self.sort_order.as_deref())
    }
}

/// Handler failures that become explicit error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A page template failed to render.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        match self {
            Self::Render(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
            }
        }
    }
}

/// Builds the application router.
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/", get(list_tasks))
        .route("/add", get(add_form).post(add_task));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .with_state(state)
}

/// `GET /`: filtered, ordered task listing.
async fn list_tasks(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let query = ListQuery::from_pairs(pairs);
    let tasks = state.store.list(&query.filter(), query.sort()).await;
    tracing::debug!(count = tasks.len(), query = ?query, "listing tasks");
    Ok(Html(state.templates.render_home(&tasks, &query)?))
}

/// `GET /add`: blank add-task form.
async fn add_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(
        state.templates.render_add(&AddTaskForm::default(), None)?,
    ))
}

/// `POST /add`: insert a task, then redirect to the listing.
///
/// An invalid form is answered with `400 Bad Request` and the form
/// re-rendered with the submitted values.
async fn add_task(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    Form(form): Form<AddTaskForm>,
) -> Result<Response, AppError> {
    let query = ListQuery::from_pairs(pairs);
    match form.to_task() {
        Ok(task) => {
            tracing::info!(title = %task.title, pinned = task.pinned, "adding task");
            state.store.add(task, query.sort()).await;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected add-task form");
            let html = state.templates.render_add(&form, Some(&e.to_string()))?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
    }
}
