pub mod api;
pub mod handlers;
pub mod id;
pub mod model;
pub mod store;
pub mod validate;
pub mod views;

use std::sync::Arc;

use axum::Router;
use todo_core::{RunMode, ServiceError};
use todo_docstore::DocumentStore;

use api::AppState;
use store::TaskStore;
use views::Views;

/// Collection holding the task documents.
pub const COLLECTION: &str = "todo";

/// The ToDo module: server-rendered task list over one document
/// collection.
///
/// The store handle is opened once by the binary and injected here;
/// `None` means it could not be reached at startup, in which case every
/// data route renders with a "store unavailable" message instead of
/// failing.
pub struct TodoModule {
    state: AppState,
}

impl TodoModule {
    pub fn new(db: Option<Arc<dyn DocumentStore>>, run_mode: RunMode) -> Result<Self, ServiceError> {
        let store = match db {
            Some(db) => TaskStore::new(db),
            None => TaskStore::unavailable(),
        };
        let state = AppState {
            store,
            views: Arc::new(Views::new()?),
            verbose_errors: run_mode.is_development(),
        };
        Ok(Self { state })
    }

    pub fn name(&self) -> &str {
        "todo"
    }

    pub fn store(&self) -> &TaskStore {
        &self.state.store
    }

    pub fn routes(&self) -> Router {
        api::router(self.state.clone())
    }
}
