//! Bootstrap: open the task store once at startup.
//!
//! The store is reached under a single connect timeout. If it cannot be
//! opened the server still starts, and every data route reports the
//! store as unavailable.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use todo_core::{ServiceConfig, StoreLocation};
use todo_docstore::{DocumentStore, MemoryDocStore, RedbDocStore, StoreError};
use tracing::{error, info, warn};

/// Open the configured store, logging the outcome. `None` means the
/// server runs degraded.
pub async fn connect_store(config: &ServiceConfig) -> Option<Arc<dyn DocumentStore>> {
    match open_store(&config.store, config.connect_timeout).await {
        Ok(db) => {
            info!("Connected to task store at {}", config.store);
            Some(db)
        }
        Err(e) => {
            error!("Could not connect to task store at {}", config.store);
            error!("Error: {e}");
            warn!("Serving without a store; data routes will show an error");
            None
        }
    }
}

async fn open_store(
    location: &StoreLocation,
    timeout: Duration,
) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let path = match location {
        StoreLocation::Memory => {
            let db: Arc<dyn DocumentStore> = Arc::new(MemoryDocStore::new());
            return Ok(db);
        }
        StoreLocation::File(path) => path.clone(),
    };

    let open = tokio::task::spawn_blocking(move || {
        ensure_parent(&path);
        RedbDocStore::open(&path, todo::COLLECTION)
    });

    match tokio::time::timeout(timeout, open).await {
        Ok(Ok(result)) => {
            let db: Arc<dyn DocumentStore> = Arc::new(result?);
            Ok(db)
        }
        Ok(Err(join_err)) => Err(StoreError::Unavailable(join_err.to_string())),
        Err(_) => Err(StoreError::Unavailable(format!(
            "timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

/// Create the store's directory if missing. Failure is left for the
/// open call to report.
fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("cannot create {}: {e}", parent.display());
        }
    }
}
