use std::sync::Arc;

use serde_json::Value;
use todo_core::ServiceError;
use todo_docstore::{Document, DocumentStore, Filter, StoreError};
use tracing::debug;

use crate::id::TaskId;
use crate::model::{Done, FIELD_DONE, Task, TaskFields};

pub const STORE_UNAVAILABLE: &str = "Could not connect to the task store. Please try again later.";

/// Which tasks a read selects. Every variant is a single exact-match
/// condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Done(Done),
    Id(TaskId),
    /// Equality on a caller-named document field. The name comes from
    /// the request as-is.
    Field { name: String, value: String },
}

impl TaskFilter {
    fn to_filter(&self) -> Filter {
        match self {
            TaskFilter::All => Filter::All,
            TaskFilter::Done(done) => Filter::field_eq(FIELD_DONE, done.as_str()),
            TaskFilter::Id(id) => Filter::Id(id.as_doc_id().clone()),
            TaskFilter::Field { name, value } => Filter::field_eq(name.as_str(), value.as_str()),
        }
    }
}

/// Task persistence on top of a [`DocumentStore`] collection.
///
/// Holds no cache; every read goes to the store. When the store could
/// not be opened at startup the handle is absent and every call fails
/// with `StoreUnavailable`.
#[derive(Clone)]
pub struct TaskStore {
    db: Option<Arc<dyn DocumentStore>>,
}

fn read_error(e: StoreError) -> ServiceError {
    match e {
        StoreError::Unavailable(msg) => ServiceError::StoreUnavailable(msg),
        other => ServiceError::Internal(other.to_string()),
    }
}

fn write_error(e: StoreError) -> ServiceError {
    match e {
        StoreError::Unavailable(msg) => ServiceError::StoreUnavailable(msg),
        other => ServiceError::StoreOperationFailed(other.to_string()),
    }
}

impl TaskStore {
    pub fn new(db: Arc<dyn DocumentStore>) -> Self {
        Self { db: Some(db) }
    }

    /// A store that was never reached.
    pub fn unavailable() -> Self {
        Self { db: None }
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }

    fn db(&self) -> Result<&dyn DocumentStore, ServiceError> {
        self.db
            .as_deref()
            .ok_or_else(|| ServiceError::StoreUnavailable(STORE_UNAVAILABLE.into()))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All tasks matching `filter`, in insertion order.
    pub fn find_all(&self, filter: &TaskFilter) -> Result<Vec<Task>, ServiceError> {
        let rows = self.db()?.find(&filter.to_filter()).map_err(read_error)?;
        Ok(rows
            .into_iter()
            .map(|(id, doc)| Task::from_document(id.into(), &doc))
            .collect())
    }

    pub fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, ServiceError> {
        let row = self
            .db()?
            .find_one(&Filter::Id(id.as_doc_id().clone()))
            .map_err(read_error)?;
        Ok(row.map(|(id, doc)| Task::from_document(id.into(), &doc)))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new task with `done = "no"`.
    pub fn insert(&self, fields: &TaskFields) -> Result<TaskId, ServiceError> {
        let id = self
            .db()?
            .insert_one(fields.to_new_document())
            .map_err(write_error)?;
        debug!("task {id} created");
        Ok(id.into())
    }

    /// Overwrite the four content fields. Returns whether a task matched.
    pub fn update_fields(&self, id: &TaskId, fields: &TaskFields) -> Result<bool, ServiceError> {
        self.update(id, fields.to_document())
    }

    /// Set only the completion flag. Returns whether a task matched.
    pub fn set_done(&self, id: &TaskId, done: Done) -> Result<bool, ServiceError> {
        let mut set = Document::new();
        set.insert(FIELD_DONE.into(), Value::String(done.as_str().into()));
        self.update(id, set)
    }

    /// Remove a task. Returns whether one existed.
    pub fn delete(&self, id: &TaskId) -> Result<bool, ServiceError> {
        let removed = self
            .db()?
            .delete_one(&Filter::Id(id.as_doc_id().clone()))
            .map_err(write_error)?;
        debug!("task {id} delete: removed={removed}");
        Ok(removed > 0)
    }

    fn update(&self, id: &TaskId, set: Document) -> Result<bool, ServiceError> {
        let matched = self
            .db()?
            .update_one(&Filter::Id(id.as_doc_id().clone()), set)
            .map_err(write_error)?;
        debug!("task {id} update: matched={matched}");
        Ok(matched > 0)
    }
}
