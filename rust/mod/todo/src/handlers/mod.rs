//! Request handling for every route.
//!
//! Each operation is a plain function from the shared state and its
//! parsed input to an [`Outcome`]. The axum glue in [`crate::api`] only
//! extracts input and turns the outcome into a response. Expected
//! failures (bad id, missing field, store trouble) become a message on
//! the returned page; anything else comes back as `Err`.

mod about;
mod create;
mod done;
mod edit;
mod list;
mod remove;
mod search;

pub use about::about;
pub use create::{TaskForm, create};
pub use done::toggle_done;
pub use edit::{EditForm, apply_edit, edit_form};
pub use list::{list_all, list_complete, list_incomplete};
pub use remove::remove;
pub use search::{SearchQuery, search};

use todo_core::ServiceError;
use tracing::warn;

use crate::store::{STORE_UNAVAILABLE, TaskFilter, TaskStore};
use crate::views::{Tab, Template, View};

/// What a handler decided to do with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redirect(String),
    Page(View),
}

impl Outcome {
    /// The error shown on the page, if this outcome is a page.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Page(view) => view.error.as_deref(),
            Outcome::Redirect(_) => None,
        }
    }
}

/// Render `template` over the tasks selected by `filter`.
///
/// If the store is unavailable the page still renders, with no tasks
/// and the unavailable message in place of `error`.
pub(crate) fn task_page(
    store: &TaskStore,
    template: Template,
    tab: Option<Tab>,
    filter: &TaskFilter,
    error: Option<&str>,
) -> Result<Outcome, ServiceError> {
    let (todos, error) = match store.find_all(filter) {
        Ok(todos) => (todos, error.map(str::to_string)),
        Err(ServiceError::StoreUnavailable(_)) => (Vec::new(), Some(STORE_UNAVAILABLE.to_string())),
        Err(e) => return Err(e),
    };
    Ok(Outcome::Page(View {
        tab,
        todos,
        error,
        ..View::new(template)
    }))
}

/// The list page with all tasks and no active tab.
pub(crate) fn all_tasks_page(store: &TaskStore, error: &str) -> Result<Outcome, ServiceError> {
    task_page(store, Template::Index, None, &TaskFilter::All, Some(error))
}

/// The default (incomplete) list page.
pub(crate) fn incomplete_page(store: &TaskStore, error: &str) -> Result<Outcome, ServiceError> {
    task_page(
        store,
        Template::Index,
        Some(Tab::Incomplete),
        &TaskFilter::Done(crate::model::Done::No),
        Some(error),
    )
}

/// Pick the message for a caught error, or pass an unexpected one on.
///
/// `StoreUnavailable` keeps its own message (the page renderer shows
/// it anyway); `InvalidIdentifier` and `MissingField` use `invalid`;
/// `StoreOperationFailed` uses `failed` when one is given.
pub(crate) fn caught<'a>(
    op: &str,
    err: ServiceError,
    invalid: &'a str,
    failed: Option<&'a str>,
) -> Result<&'a str, ServiceError> {
    if !err.is_user_facing() {
        return Err(err);
    }
    warn!(code = err.error_code(), "{op}: {err}");
    match err {
        ServiceError::StoreUnavailable(_) => Ok(STORE_UNAVAILABLE),
        ServiceError::StoreOperationFailed(_) => failed.ok_or(err),
        _ => Ok(invalid),
    }
}
