use serde::Serialize;
use serde_json::Value;
use todo_docstore::Document;

use crate::id::TaskId;

// ---------------------------------------------------------------------------
// Done
// ---------------------------------------------------------------------------

/// Completion flag, persisted as the strings `"yes"` / `"no"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Done {
    Yes,
    #[default]
    No,
}

impl Done {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Anything other than `"yes"` reads as not done.
    pub fn parse(s: &str) -> Self {
        if s == "yes" { Self::Yes } else { Self::No }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl std::fmt::Display for Done {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Document field names
// ---------------------------------------------------------------------------

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESC: &str = "desc";
pub const FIELD_DATE: &str = "date";
pub const FIELD_PRIORITY: &str = "pr";
pub const FIELD_DONE: &str = "done";

// ---------------------------------------------------------------------------
// TaskFields: the four user-editable fields, already validated
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub desc: String,
    pub date: String,
    pub pr: String,
}

impl TaskFields {
    /// The `$set` document for these fields. `done` is left alone.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(FIELD_NAME.into(), Value::String(self.name.clone()));
        doc.insert(FIELD_DESC.into(), Value::String(self.desc.clone()));
        doc.insert(FIELD_DATE.into(), Value::String(self.date.clone()));
        doc.insert(FIELD_PRIORITY.into(), Value::String(self.pr.clone()));
        doc
    }

    /// The full document of a freshly created task.
    pub fn to_new_document(&self) -> Document {
        let mut doc = self.to_document();
        doc.insert(FIELD_DONE.into(), Value::String(Done::No.as_str().into()));
        doc
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A to-do record as stored, with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub desc: String,
    pub date: String,
    pub pr: String,
    pub done: Done,
}

impl Task {
    /// Build a task from a stored document. Missing fields read as empty
    /// text and a missing `done` as not done.
    pub fn from_document(id: TaskId, doc: &Document) -> Self {
        Self {
            id,
            name: text(doc, FIELD_NAME),
            desc: text(doc, FIELD_DESC),
            date: text(doc, FIELD_DATE),
            pr: text(doc, FIELD_PRIORITY),
            done: Done::parse(&text(doc, FIELD_DONE)),
        }
    }
}

fn text(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
