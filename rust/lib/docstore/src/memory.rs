use std::sync::RwLock;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::id::DocId;
use crate::traits::{Document, DocumentStore};

/// MemoryDocStore keeps documents in a vector in insertion order.
/// Contents are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryDocStore {
    docs: RwLock<Vec<(DocId, Document)>>,
}

impl MemoryDocStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Storage("memory store lock poisoned".into())
}

impl DocumentStore for MemoryDocStore {
    fn find(&self, filter: &Filter) -> Result<Vec<(DocId, Document)>, StoreError> {
        let docs = self.docs.read().map_err(poisoned)?;
        Ok(docs
            .iter()
            .filter(|(id, doc)| filter.matches(id, doc))
            .cloned()
            .collect())
    }

    fn insert_one(&self, doc: Document) -> Result<DocId, StoreError> {
        let id = DocId::new();
        self.docs.write().map_err(poisoned)?.push((id.clone(), doc));
        Ok(id)
    }

    fn update_one(&self, filter: &Filter, set: Document) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        match docs.iter_mut().find(|(id, doc)| filter.matches(id, doc)) {
            Some((_, doc)) => {
                doc.extend(set);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_one(&self, filter: &Filter) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        match docs.iter().position(|(id, doc)| filter.matches(id, doc)) {
            Some(pos) => {
                docs.remove(pos);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::conformance;

    #[test]
    fn insert_then_find() {
        conformance::insert_then_find(&MemoryDocStore::new());
    }

    #[test]
    fn update_merges_fields() {
        conformance::update_merges_fields(&MemoryDocStore::new());
    }

    #[test]
    fn update_keeps_order() {
        conformance::update_keeps_order(&MemoryDocStore::new());
    }

    #[test]
    fn delete_removes_one() {
        conformance::delete_removes_one(&MemoryDocStore::new());
    }
}
