//! Conversion between the external string form of a task id and the
//! store's native [`DocId`].

use serde::{Serialize, Serializer};
use todo_core::ServiceError;
use todo_docstore::DocId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(DocId);

impl TaskId {
    /// Decode a request-supplied id.
    ///
    /// Fails with `InvalidIdentifier` when the string does not follow the
    /// store's id grammar; an absent parameter arrives here as `""` and
    /// fails the same way.
    pub fn decode(raw: &str) -> Result<Self, ServiceError> {
        DocId::parse(raw)
            .map(Self)
            .map_err(|e| ServiceError::InvalidIdentifier(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_doc_id(&self) -> &DocId {
        &self.0
    }
}

impl From<DocId> for TaskId {
    fn from(id: DocId) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
