use crate::error::StoreError;
use crate::filter::Filter;
use crate::id::DocId;

/// A stored document body: a JSON object without its id.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// DocumentStore is a single collection of JSON documents addressed by
/// [`DocId`] and queried with [`Filter`].
///
/// Results come back in insertion order. Every call is its own unit of
/// work; there are no multi-call transactions.
pub trait DocumentStore: Send + Sync {
    /// All documents matching the filter.
    fn find(&self, filter: &Filter) -> Result<Vec<(DocId, Document)>, StoreError>;

    /// The first document matching the filter, if any.
    fn find_one(&self, filter: &Filter) -> Result<Option<(DocId, Document)>, StoreError> {
        Ok(self.find(filter)?.into_iter().next())
    }

    /// Insert a new document and return its freshly assigned id.
    fn insert_one(&self, doc: Document) -> Result<DocId, StoreError>;

    /// Merge `set` into the first matching document. Returns the number
    /// of documents matched (0 or 1).
    fn update_one(&self, filter: &Filter, set: Document) -> Result<u64, StoreError>;

    /// Remove the first matching document. Returns the number removed
    /// (0 or 1); removing nothing is not an error.
    fn delete_one(&self, filter: &Filter) -> Result<u64, StoreError>;
}
