use serde_json::Value;

use crate::id::DocId;
use crate::traits::Document;

/// A query filter: exact-match equality on a single key.
///
/// Field names may come straight from a request, so matching only ever
/// compares a top-level field against a string. Nothing in a field name
/// is interpreted as an operator or a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document.
    All,
    /// The document with this id.
    Id(DocId),
    /// Documents whose top-level `field` is the string `value`.
    FieldEq { field: String, value: String },
}

impl Filter {
    pub fn field_eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldEq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether a stored document matches.
    ///
    /// Ids are not part of the document body, so a `FieldEq` on `_id`
    /// never matches.
    pub fn matches(&self, id: &DocId, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(want) => want == id,
            Filter::FieldEq { field, value } => {
                matches!(doc.get(field), Some(Value::String(s)) if s == value)
            }
        }
    }
}
