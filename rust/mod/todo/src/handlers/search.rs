//! GET /search?key=&refer=

use todo_core::ServiceError;

use super::{Outcome, caught, task_page};
use crate::id::TaskId;
use crate::store::{TaskFilter, TaskStore};
use crate::views::Template;

pub const KEY_REQUIRED: &str = "Search key is required. Please provide a search term.";
pub const FIELD_REQUIRED: &str = "Search field is required. Please select a search field.";
pub const INVALID_ID: &str = "Invalid ObjectId format. Please provide a valid ObjectId.";

/// `refer` value that searches by task id instead of a document field.
pub const REFER_ID: &str = "id";

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SearchQuery {
    pub key: Option<String>,
    pub refer: Option<String>,
}

/// Exact-match search on one field.
///
/// `refer` names the document field and is used as given; `id` searches
/// by task id. A blank key, an empty field name or a malformed id shows
/// the unfiltered list with an error.
pub fn search(store: &TaskStore, query: &SearchQuery) -> Result<Outcome, ServiceError> {
    let key = query.key.as_deref().unwrap_or_default();
    let refer = query.refer.as_deref().unwrap_or_default();

    if key.trim().is_empty() {
        return unfiltered(store, KEY_REQUIRED);
    }
    if refer.is_empty() {
        return unfiltered(store, FIELD_REQUIRED);
    }

    let filter = if refer == REFER_ID {
        match TaskId::decode(key) {
            Ok(id) => TaskFilter::Id(id),
            Err(e) => {
                let message = caught("search", e, INVALID_ID, None)?;
                return unfiltered(store, message);
            }
        }
    } else {
        TaskFilter::Field {
            name: refer.to_string(),
            value: key.to_string(),
        }
    };

    task_page(store, Template::Search, None, &filter, None)
}

fn unfiltered(store: &TaskStore, error: &str) -> Result<Outcome, ServiceError> {
    task_page(store, Template::Search, None, &TaskFilter::All, Some(error))
}
