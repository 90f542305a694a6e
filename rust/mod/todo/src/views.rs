//! Page rendering with Tera.
//!
//! Templates are compiled into the binary and registered once when the
//! module is built. Names end in `.html`, so Tera autoescapes every
//! interpolated value.

use tera::{Context, Tera};
use todo_core::ServiceError;

use crate::model::Task;

pub const TITLE: &str = "TODO with Rust";
pub const HEADING: &str = "ToDo Reminder";

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("update.html", include_str!("../templates/update.html")),
    ("searchlist.html", include_str!("../templates/searchlist.html")),
    ("credits.html", include_str!("../templates/credits.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
    ("error.html", include_str!("../templates/error.html")),
];

const ERROR_TEMPLATE: &str = "error.html";

/// Which page to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Index,
    Update,
    Search,
    Credits,
    NotFound,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::Update => "update.html",
            Self::Search => "searchlist.html",
            Self::Credits => "credits.html",
            Self::NotFound => "not_found.html",
        }
    }
}

/// Highlighted navigation tab on the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Incomplete,
    Complete,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
        }
    }
}

/// Everything a page needs: the template plus its data context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub template: Template,
    pub tab: Option<Tab>,
    pub todos: Vec<Task>,
    pub task: Option<Task>,
    pub error: Option<String>,
}

impl View {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            tab: None,
            todos: Vec::new(),
            task: None,
            error: None,
        }
    }
}

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, ServiceError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| ServiceError::Internal(format!("template init: {e}")))?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &View) -> Result<String, ServiceError> {
        let mut ctx = page_context();
        ctx.insert("tab", &view.tab.map(|tab| tab.as_str()));
        ctx.insert("todos", &view.todos);
        ctx.insert("task", &view.task);
        ctx.insert("error", &view.error);
        self.render_named(view.template.name(), &ctx)
    }

    /// Render the page for an error that reached the transport. The
    /// error code and message only appear when `verbose` is set.
    pub fn render_error(&self, err: &ServiceError, verbose: bool) -> Result<String, ServiceError> {
        if let ServiceError::NotFound(_) = err {
            return self.render(&View::new(Template::NotFound));
        }
        let status = err.status_code();
        let mut ctx = page_context();
        ctx.insert("status", &status.as_u16());
        ctx.insert("reason", status.canonical_reason().unwrap_or("Error"));
        ctx.insert("code", err.error_code());
        ctx.insert("detail", &verbose.then(|| err.to_string()));
        self.render_named(ERROR_TEMPLATE, &ctx)
    }

    fn render_named(&self, name: &str, ctx: &Context) -> Result<String, ServiceError> {
        self.tera
            .render(name, ctx)
            .map_err(|e| ServiceError::Internal(format!("render {name}: {e:?}")))
    }
}

/// Values every page reads from the base layout.
fn page_context() -> Context {
    let mut ctx = Context::new();
    ctx.insert("t", TITLE);
    ctx.insert("h", HEADING);
    ctx.insert("tab", &None::<&str>);
    ctx.insert("error", &None::<String>);
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::model::Done;

    fn task(name: &str, done: Done) -> Task {
        Task {
            id: TaskId::decode("0123456789abcdef0123456789abcdef").unwrap(),
            name: name.into(),
            desc: "desc".into(),
            date: "2024-01-01".into(),
            pr: "low".into(),
            done,
        }
    }

    #[test]
    fn every_template_renders_empty() {
        let views = Views::new().unwrap();
        for template in [
            Template::Index,
            Template::Update,
            Template::Search,
            Template::Credits,
            Template::NotFound,
        ] {
            let html = views.render(&View::new(template)).unwrap();
            assert!(html.contains(HEADING), "{} lacks heading", template.name());
        }
    }

    #[test]
    fn index_lists_tasks_and_error() {
        let views = Views::new().unwrap();
        let view = View {
            tab: Some(Tab::Complete),
            todos: vec![task("Buy milk", Done::Yes)],
            error: Some("Something broke.".into()),
            ..View::new(Template::Index)
        };
        let html = views.render(&view).unwrap();
        assert!(html.contains("Buy milk"));
        assert!(html.contains("Something broke."));
        assert!(html.contains("/done?_id=0123456789abcdef0123456789abcdef"));
        assert!(html.contains(r#"class="active" href="/completed""#));
    }

    #[test]
    fn values_are_escaped() {
        let views = Views::new().unwrap();
        let view = View {
            todos: vec![task("<script>alert(1)</script>", Done::No)],
            ..View::new(Template::Index)
        };
        let html = views.render(&view).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn update_form_is_prefilled() {
        let views = Views::new().unwrap();
        let view = View {
            task: Some(task("Buy milk", Done::No)),
            ..View::new(Template::Update)
        };
        let html = views.render(&view).unwrap();
        assert!(html.contains(r#"value="Buy milk""#));
        assert!(html.contains(r#"name="_id" value="0123456789abcdef0123456789abcdef""#));
    }

    #[test]
    fn error_page_hides_detail_unless_verbose() {
        let views = Views::new().unwrap();
        let err = ServiceError::Internal("<b>db exploded</b>".into());

        let html = views.render_error(&err, false).unwrap();
        assert!(html.contains("500 Internal Server Error"));
        assert!(!html.contains("db exploded"));

        let html = views.render_error(&err, true).unwrap();
        assert!(html.contains("INTERNAL"));
        assert!(html.contains("&lt;b&gt;db exploded"));
        assert!(!html.contains("<b>db exploded</b>"));
    }

    #[test]
    fn not_found_error_uses_not_found_page() {
        let views = Views::new().unwrap();
        let html = views
            .render_error(&ServiceError::NotFound("/missing".into()), true)
            .unwrap();
        assert!(html.contains("Page not found"));
        assert!(!html.contains("/missing"));
    }
}
