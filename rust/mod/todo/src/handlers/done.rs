//! GET /done?_id=: flip a task's completion flag, then go back.

use axum::http::HeaderValue;
use todo_core::ServiceError;

use super::{Outcome, all_tasks_page, caught};
use crate::id::TaskId;
use crate::store::TaskStore;

pub const INVALID_ID: &str = "Invalid task ID provided. Please use a valid task.";

/// Read the task, write the opposite flag, and redirect to `next`, the
/// referring page, or `/`.
///
/// The read and the write are separate store calls, so two concurrent
/// toggles of one task may cancel out.
pub fn toggle_done(
    store: &TaskStore,
    raw_id: &str,
    next: Option<&str>,
    referer: Option<&str>,
) -> Result<Outcome, ServiceError> {
    let result = TaskId::decode(raw_id).and_then(|id| {
        if let Some(task) = store.find_by_id(&id)? {
            store.set_done(&id, task.done.toggled())?;
        }
        Ok(())
    });

    match result {
        Ok(()) => Ok(Outcome::Redirect(redirect_target(next, referer))),
        Err(e) => {
            let message = caught("done", e, INVALID_ID, None)?;
            all_tasks_page(store, message)
        }
    }
}

/// The first of `next` and `referer` that is non-empty and valid as a
/// `Location` header value, else `/`.
fn redirect_target(next: Option<&str>, referer: Option<&str>) -> String {
    [next, referer]
        .into_iter()
        .flatten()
        .find(|target| !target.is_empty() && HeaderValue::from_str(target).is_ok())
        .unwrap_or("/")
        .to_string()
}
