//! GET /remove?_id=

use todo_core::ServiceError;

use super::{Outcome, caught, incomplete_page};
use crate::id::TaskId;
use crate::store::TaskStore;

pub const INVALID_ID: &str = "Invalid task ID. Cannot delete the specified task.";

/// Delete the task and redirect to `/`. Deleting an id that no longer
/// exists is not an error.
pub fn remove(store: &TaskStore, raw_id: &str) -> Result<Outcome, ServiceError> {
    match TaskId::decode(raw_id).and_then(|id| store.delete(&id)) {
        Ok(_) => Ok(Outcome::Redirect("/".into())),
        Err(e) => {
            let message = caught("remove", e, INVALID_ID, None)?;
            incomplete_page(store, message)
        }
    }
}
