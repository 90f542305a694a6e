//! GET /list, GET / and /uncompleted, GET /completed

use todo_core::ServiceError;

use super::{Outcome, task_page};
use crate::model::Done;
use crate::store::{TaskFilter, TaskStore};
use crate::views::{Tab, Template};

pub fn list_all(store: &TaskStore) -> Result<Outcome, ServiceError> {
    task_page(store, Template::Index, Some(Tab::All), &TaskFilter::All, None)
}

pub fn list_incomplete(store: &TaskStore) -> Result<Outcome, ServiceError> {
    task_page(
        store,
        Template::Index,
        Some(Tab::Incomplete),
        &TaskFilter::Done(Done::No),
        None,
    )
}

pub fn list_complete(store: &TaskStore) -> Result<Outcome, ServiceError> {
    task_page(
        store,
        Template::Index,
        Some(Tab::Complete),
        &TaskFilter::Done(Done::Yes),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing;

    fn names(outcome: Outcome) -> Vec<String> {
        match outcome {
            Outcome::Page(view) => view.todos.into_iter().map(|t| t.name).collect(),
            other => panic!("expected a page, got {other:?}"),
        }
    }

    #[test]
    fn views_partition_all() {
        let store = testing::store();
        let a = testing::seed(&store, "a");
        testing::seed(&store, "b");
        testing::seed(&store, "c");
        store.set_done(&a, Done::Yes).unwrap();

        assert_eq!(names(list_all(&store).unwrap()), vec!["a", "b", "c"]);
        assert_eq!(names(list_incomplete(&store).unwrap()), vec!["b", "c"]);
        assert_eq!(names(list_complete(&store).unwrap()), vec!["a"]);
    }

    #[test]
    fn tabs() {
        let store = testing::store();
        let tab = |outcome: Outcome| match outcome {
            Outcome::Page(view) => view.tab,
            Outcome::Redirect(_) => None,
        };
        assert_eq!(tab(list_all(&store).unwrap()), Some(Tab::All));
        assert_eq!(tab(list_incomplete(&store).unwrap()), Some(Tab::Incomplete));
        assert_eq!(tab(list_complete(&store).unwrap()), Some(Tab::Complete));
    }
}
