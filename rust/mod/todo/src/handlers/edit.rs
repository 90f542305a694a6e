//! GET /update?_id= (edit form) and POST /action3 (apply edit).

use todo_core::ServiceError;
use tracing::info;

use super::{Outcome, caught, incomplete_page};
use crate::id::TaskId;
use crate::store::TaskStore;
use crate::validate::validate_task_input;
use crate::views::{Template, View};

pub const INVALID_ID: &str = "Invalid task ID. Cannot update the specified task.";
pub const INVALID_ID_SHORT: &str = "Invalid task ID.";
pub const UPDATE_FAILED: &str = "Failed to update task. Please try again.";

/// Edit form submission: the four content fields plus the task id.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct EditForm {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub date: Option<String>,
    pub pr: Option<String>,
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Render the edit form pre-filled with the stored task. An unknown id
/// renders the form without a task.
pub fn edit_form(store: &TaskStore, raw_id: &str) -> Result<Outcome, ServiceError> {
    match TaskId::decode(raw_id).and_then(|id| store.find_by_id(&id)) {
        Ok(task) => Ok(edit_page(task, None)),
        Err(e) => {
            let message = caught("update", e, INVALID_ID, None)?;
            incomplete_page(store, message)
        }
    }
}

/// Validate, then overwrite the four fields and redirect to `/`.
///
/// A missing field re-renders the edit form with the stored task and
/// the field message.
pub fn apply_edit(store: &TaskStore, form: &EditForm) -> Result<Outcome, ServiceError> {
    let raw_id = form.id.as_deref().unwrap_or_default();

    let fields = match validate_task_input(
        form.name.as_deref(),
        form.desc.as_deref(),
        form.date.as_deref(),
        form.pr.as_deref(),
    ) {
        Ok(fields) => fields,
        Err(ServiceError::MissingField(field_error)) => {
            return match TaskId::decode(raw_id).and_then(|id| store.find_by_id(&id)) {
                Ok(task) => Ok(edit_page(task, Some(field_error))),
                Err(e) => {
                    let message = caught("action3", e, INVALID_ID_SHORT, None)?;
                    incomplete_page(store, message)
                }
            };
        }
        Err(e) => return Err(e),
    };

    match TaskId::decode(raw_id).and_then(|id| store.update_fields(&id, &fields).map(|_| id)) {
        Ok(id) => {
            info!("updated task {id}");
            Ok(Outcome::Redirect("/".into()))
        }
        Err(e) => {
            let message = caught("action3", e, INVALID_ID, Some(UPDATE_FAILED))?;
            incomplete_page(store, message)
        }
    }
}

fn edit_page(task: Option<crate::model::Task>, error: Option<String>) -> Outcome {
    Outcome::Page(View {
        task,
        error,
        ..View::new(Template::Update)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing;
    use crate::model::Done;
    use crate::validate::DESC_REQUIRED;
    use crate::views::Tab;

    fn form(id: &str, name: &str, desc: &str) -> EditForm {
        EditForm {
            name: Some(name.into()),
            desc: Some(desc.into()),
            date: Some("2025-02-02".into()),
            pr: Some("high".into()),
            id: Some(id.into()),
        }
    }

    #[test]
    fn edit_form_prefills_task() {
        let store = testing::store();
        let id = testing::seed(&store, "a");
        let Outcome::Page(view) = edit_form(&store, id.as_str()).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(view.template, Template::Update);
        assert_eq!(view.task.unwrap().id, id);
    }

    #[test]
    fn edit_form_invalid_id() {
        let store = testing::store();
        let Outcome::Page(view) = edit_form(&store, "zz").unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(view.template, Template::Index);
        assert_eq!(view.tab, Some(Tab::Incomplete));
        assert_eq!(view.error.as_deref(), Some(INVALID_ID));
    }

    #[test]
    fn apply_edit_overwrites_fields_only() {
        let store = testing::store();
        let id = testing::seed(&store, "a");
        store.set_done(&id, Done::Yes).unwrap();

        let outcome = apply_edit(&store, &form(id.as_str(), "renamed", "new desc")).unwrap();
        assert_eq!(outcome, Outcome::Redirect("/".into()));

        let task = store.find_by_id(&id).unwrap().unwrap();
        assert_eq!(task.name, "renamed");
        assert_eq!(task.desc, "new desc");
        assert_eq!(task.date, "2025-02-02");
        assert_eq!(task.pr, "high");
        assert_eq!(task.done, Done::Yes);
    }

    #[test]
    fn apply_edit_missing_field_rerenders_form() {
        let store = testing::store();
        let id = testing::seed(&store, "a");
        let Outcome::Page(view) = apply_edit(&store, &form(id.as_str(), "b", "  ")).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(view.template, Template::Update);
        assert_eq!(view.error.as_deref(), Some(DESC_REQUIRED));
        assert_eq!(view.task.unwrap().name, "a");
    }

    #[test]
    fn apply_edit_missing_field_and_bad_id() {
        let store = testing::store();
        let Outcome::Page(view) = apply_edit(&store, &form("bad", "", "x")).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(view.template, Template::Index);
        assert_eq!(view.error.as_deref(), Some(INVALID_ID_SHORT));
    }

    #[test]
    fn apply_edit_bad_id_leaves_store_unchanged() {
        let store = testing::store();
        testing::seed(&store, "a");
        let before = testing::all(&store);

        let outcome = apply_edit(&store, &form("not-hex", "b", "c")).unwrap();
        assert_eq!(outcome.error(), Some(INVALID_ID));
        assert_eq!(testing::all(&store), before);

        let outcome = apply_edit(
            &store,
            &EditForm {
                id: None,
                ..form("", "b", "c")
            },
        )
        .unwrap();
        assert_eq!(outcome.error(), Some(INVALID_ID));
    }

    #[test]
    fn failed_update_renders_incomplete_list_with_message() {
        let (store, ids) = testing::failing_writes(&["a"]);
        let before = testing::all(&store);

        let Outcome::Page(view) = apply_edit(&store, &form(ids[0].as_str(), "b", "c")).unwrap()
        else {
            panic!("expected a page");
        };
        assert_eq!(view.template, Template::Index);
        assert_eq!(view.tab, Some(Tab::Incomplete));
        assert_eq!(view.error.as_deref(), Some(UPDATE_FAILED));
        assert_eq!(view.todos.len(), 1);
        assert_eq!(testing::all(&store), before);
        assert_eq!(store.find_by_id(&ids[0]).unwrap().unwrap().name, "a");
    }
}
