//! HTTP surface of the ToDo module.
//!
//! Routes:
//! - `GET  /list`                : all tasks
//! - `GET  /`, `GET /uncompleted`: incomplete tasks
//! - `GET  /completed`           : completed tasks
//! - `GET  /done?_id=`           : toggle completion, redirect back
//! - `POST /action`              : create (`name, desc, date, pr`)
//! - `GET  /remove?_id=`         : delete, redirect to `/`
//! - `GET  /update?_id=`         : edit form
//! - `POST /action3`             : apply edit (`name, desc, date, pr, _id`)
//! - `GET  /search?key=&refer=`  : exact-match search
//! - `GET  /about`               : credits

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use todo_core::ServiceError;

use crate::handlers::{self, EditForm, Outcome, SearchQuery, TaskForm};
use crate::store::TaskStore;
use crate::views::Views;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: TaskStore,
    pub views: Arc<Views>,
    /// Include error details on 500 pages (development mode).
    pub verbose_errors: bool,
}

impl AppState {
    fn respond(&self, result: Result<Outcome, ServiceError>) -> Response {
        match result.and_then(|outcome| self.to_response(outcome)) {
            Ok(resp) => resp,
            Err(e) => self.error_page(&e),
        }
    }

    fn error_page(&self, err: &ServiceError) -> Response {
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!(code = err.error_code(), "request failed: {err}");
        } else {
            tracing::debug!(code = err.error_code(), "{err}");
        }
        match self.views.render_error(err, self.verbose_errors) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("error page failed: {e}");
                status.into_response()
            }
        }
    }

    fn to_response(&self, outcome: Outcome) -> Result<Response, ServiceError> {
        match outcome {
            Outcome::Redirect(location) => Ok(Redirect::to(&location).into_response()),
            Outcome::Page(view) => Ok(Html(self.views.render(&view)?).into_response()),
        }
    }
}

/// Query string carrying a task id, plus the optional `next` target
/// used by `/done`.
#[derive(Debug, Default, serde::Deserialize)]
pub struct IdQuery {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub next: Option<String>,
}

impl IdQuery {
    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/list", get(list_all))
        .route("/", get(list_incomplete))
        .route("/uncompleted", get(list_incomplete))
        .route("/completed", get(list_complete))
        .route("/done", get(done))
        .route("/action", post(create))
        .route("/remove", get(remove))
        .route("/update", get(edit_form))
        .route("/action3", post(apply_edit))
        .route("/search", get(search))
        .route("/about", get(about))
        .fallback(not_found)
        .with_state(state)
}

async fn list_all(State(state): State<AppState>) -> Response {
    state.respond(handlers::list_all(&state.store))
}

async fn list_incomplete(State(state): State<AppState>) -> Response {
    state.respond(handlers::list_incomplete(&state.store))
}

async fn list_complete(State(state): State<AppState>) -> Response {
    state.respond(handlers::list_complete(&state.store))
}

async fn done(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> Response {
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    state.respond(handlers::toggle_done(
        &state.store,
        query.id(),
        query.next.as_deref(),
        referer,
    ))
}

async fn create(State(state): State<AppState>, Form(form): Form<TaskForm>) -> Response {
    state.respond(handlers::create(&state.store, &form))
}

async fn remove(State(state): State<AppState>, Query(query): Query<IdQuery>) -> Response {
    state.respond(handlers::remove(&state.store, query.id()))
}

async fn edit_form(State(state): State<AppState>, Query(query): Query<IdQuery>) -> Response {
    state.respond(handlers::edit_form(&state.store, query.id()))
}

async fn apply_edit(State(state): State<AppState>, Form(form): Form<EditForm>) -> Response {
    state.respond(handlers::apply_edit(&state.store, &form))
}

async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    state.respond(handlers::search(&state.store, &query))
}

async fn about(State(state): State<AppState>) -> Response {
    state.respond(Ok(handlers::about()))
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    state.respond(Err(ServiceError::NotFound(format!("no route for {uri}"))))
}
