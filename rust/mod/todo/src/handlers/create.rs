//! POST /action: add a task.

use todo_core::ServiceError;
use tracing::info;

use super::{Outcome, all_tasks_page, caught};
use crate::store::TaskStore;
use crate::validate::validate_task_input;

pub const ADD_FAILED: &str = "Failed to add task. Please try again.";

/// Raw form fields as submitted; any of them may be absent.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct TaskForm {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub date: Option<String>,
    pub pr: Option<String>,
}

pub fn create(store: &TaskStore, form: &TaskForm) -> Result<Outcome, ServiceError> {
    let fields = match validate_task_input(
        form.name.as_deref(),
        form.desc.as_deref(),
        form.date.as_deref(),
        form.pr.as_deref(),
    ) {
        Ok(fields) => fields,
        Err(ServiceError::MissingField(message)) => return all_tasks_page(store, &message),
        Err(e) => return Err(e),
    };

    match store.insert(&fields) {
        Ok(id) => {
            info!("created task {id}");
            Ok(Outcome::Redirect("/list".into()))
        }
        Err(e) => {
            let message = caught("action", e, ADD_FAILED, Some(ADD_FAILED))?;
            all_tasks_page(store, message)
        }
    }
}
