use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::id::DocId;
use crate::traits::{Document, DocumentStore};

type DocsTable<'a> = TableDefinition<'a, &'static str, &'static [u8]>;
type IdsTable<'a> = TableDefinition<'a, &'static str, &'static str>;

/// RedbDocStore is a DocumentStore backed by redb, a pure-Rust embedded
/// key-value database. One collection uses two tables:
///
/// ```text
/// {collection}.docs   "{seq:016x}:{id}" → JSON body   (scan = insertion order)
/// {collection}.ids    "{id}"            → docs key    (point lookups by id)
/// ```
pub struct RedbDocStore {
    db: Arc<Database>,
    docs_table: String,
    ids_table: String,
}

fn storage<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Storage(e.to_string())
}

fn encode(doc: &Document) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(doc).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Document, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Split a docs-table key into its sequence number and id.
fn split_key(key: &str) -> Result<(u64, DocId), StoreError> {
    let (seq, id) = key
        .split_once(':')
        .ok_or_else(|| StoreError::Storage(format!("malformed key '{key}'")))?;
    let seq = u64::from_str_radix(seq, 16)
        .map_err(|_| StoreError::Storage(format!("malformed key '{key}'")))?;
    Ok((seq, DocId::parse(id)?))
}

impl RedbDocStore {
    /// Open or create the database at `path` and make sure the
    /// collection's tables exist.
    ///
    /// Any failure to open the file (missing directory, file locked by
    /// another process, corrupt header) is reported as `Unavailable`.
    pub fn open(path: &Path, collection: &str) -> Result<Self, StoreError> {
        let db = Database::create(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;

        let store = Self {
            db: Arc::new(db),
            docs_table: format!("{collection}.docs"),
            ids_table: format!("{collection}.ids"),
        };

        let write_txn = store.db.begin_write().map_err(storage)?;
        {
            write_txn.open_table(store.docs()).map_err(storage)?;
            write_txn.open_table(store.ids()).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!("RedbDocStore: opened {} ({})", path.display(), collection);
        Ok(store)
    }

    fn docs(&self) -> DocsTable<'_> {
        TableDefinition::new(&self.docs_table)
    }

    fn ids(&self) -> IdsTable<'_> {
        TableDefinition::new(&self.ids_table)
    }

    /// Resolve the docs-table key of the first document matching `filter`.
    fn locate(&self, filter: &Filter) -> Result<Option<String>, StoreError> {
        let read_txn = self.db.begin_read().map_err(storage)?;

        if let Filter::Id(id) = filter {
            let ids = read_txn.open_table(self.ids()).map_err(storage)?;
            return Ok(ids
                .get(id.as_str())
                .map_err(storage)?
                .map(|key| key.value().to_string()));
        }

        let docs = read_txn.open_table(self.docs()).map_err(storage)?;
        for entry in docs.iter().map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            let key = key.value();
            let (_, id) = split_key(key)?;
            if filter.matches(&id, &decode(value.value())?) {
                return Ok(Some(key.to_string()));
            }
        }
        Ok(None)
    }
}

impl DocumentStore for RedbDocStore {
    fn find(&self, filter: &Filter) -> Result<Vec<(DocId, Document)>, StoreError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let docs = read_txn.open_table(self.docs()).map_err(storage)?;

        if let Filter::Id(id) = filter {
            let ids = read_txn.open_table(self.ids()).map_err(storage)?;
            let Some(key) = ids.get(id.as_str()).map_err(storage)? else {
                return Ok(Vec::new());
            };
            return Ok(match docs.get(key.value()).map_err(storage)? {
                Some(value) => vec![(id.clone(), decode(value.value())?)],
                None => Vec::new(),
            });
        }

        let mut results = Vec::new();
        for entry in docs.iter().map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            let (_, id) = split_key(key.value())?;
            let doc = decode(value.value())?;
            if filter.matches(&id, &doc) {
                results.push((id, doc));
            }
        }
        Ok(results)
    }

    fn insert_one(&self, doc: Document) -> Result<DocId, StoreError> {
        let id = DocId::new();
        let data = encode(&doc)?;

        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut docs = write_txn.open_table(self.docs()).map_err(storage)?;
            let next_seq = match docs.last().map_err(storage)? {
                Some((key, _)) => split_key(key.value())?.0 + 1,
                None => 0,
            };
            let key = format!("{next_seq:016x}:{id}");
            docs.insert(key.as_str(), data.as_slice())
                .map_err(storage)?;

            let mut ids = write_txn.open_table(self.ids()).map_err(storage)?;
            ids.insert(id.as_str(), key.as_str()).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        Ok(id)
    }

    fn update_one(&self, filter: &Filter, set: Document) -> Result<u64, StoreError> {
        let Some(key) = self.locate(filter)? else {
            return Ok(0);
        };

        let write_txn = self.db.begin_write().map_err(storage)?;
        let matched = {
            let mut docs = write_txn.open_table(self.docs()).map_err(storage)?;
            let current = docs
                .get(key.as_str())
                .map_err(storage)?
                .map(|value| decode(value.value()))
                .transpose()?;
            match current {
                Some(mut doc) => {
                    doc.extend(set);
                    let data = encode(&doc)?;
                    docs.insert(key.as_str(), data.as_slice())
                        .map_err(storage)?;
                    1
                }
                // Removed between locate and write.
                None => 0,
            }
        };
        write_txn.commit().map_err(storage)?;

        Ok(matched)
    }

    fn delete_one(&self, filter: &Filter) -> Result<u64, StoreError> {
        let Some(key) = self.locate(filter)? else {
            return Ok(0);
        };
        let (_, id) = split_key(&key)?;

        let write_txn = self.db.begin_write().map_err(storage)?;
        let removed = {
            let mut docs = write_txn.open_table(self.docs()).map_err(storage)?;
            let existed = docs.remove(key.as_str()).map_err(storage)?.is_some();

            let mut ids = write_txn.open_table(self.ids()).map_err(storage)?;
            ids.remove(id.as_str()).map_err(storage)?;
            existed
        };
        write_txn.commit().map_err(storage)?;

        Ok(u64::from(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::conformance;

    fn open_temp() -> (RedbDocStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbDocStore::open(&dir.path().join("test.redb"), "todo").unwrap();
        (store, dir)
    }

    #[test]
    fn insert_then_find() {
        let (store, _dir) = open_temp();
        conformance::insert_then_find(&store);
    }

    #[test]
    fn update_merges_fields() {
        let (store, _dir) = open_temp();
        conformance::update_merges_fields(&store);
    }

    #[test]
    fn update_keeps_order() {
        let (store, _dir) = open_temp();
        conformance::update_keeps_order(&store);
    }

    #[test]
    fn delete_removes_one() {
        let (store, _dir) = open_temp();
        conformance::delete_removes_one(&store);
    }

    #[test]
    fn update_by_field_filter() {
        let (store, _dir) = open_temp();
        let doc = serde_json::json!({"name": "a", "done": "no"})
            .as_object()
            .cloned()
            .unwrap();
        let id = store.insert_one(doc).unwrap();

        let set = serde_json::json!({"done": "yes"}).as_object().cloned().unwrap();
        assert_eq!(store.update_one(&Filter::field_eq("name", "a"), set).unwrap(), 1);

        let (_, body) = store.find_one(&Filter::Id(id)).unwrap().unwrap();
        assert_eq!(body["done"], "yes");
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.redb");

        let id = {
            let store = RedbDocStore::open(&path, "todo").unwrap();
            let doc = serde_json::json!({"name": "keep me"}).as_object().cloned().unwrap();
            store.insert_one(doc).unwrap()
        };

        let store = RedbDocStore::open(&path, "todo").unwrap();
        let (_, body) = store.find_one(&Filter::Id(id)).unwrap().unwrap();
        assert_eq!(body["name"], "keep me");
    }

    #[test]
    fn sequence_continues_after_delete() {
        let (store, _dir) = open_temp();
        let empty = Document::new();
        let a = store.insert_one(empty.clone()).unwrap();
        let b = store.insert_one(empty.clone()).unwrap();
        store.delete_one(&Filter::Id(b.clone())).unwrap();
        let c = store.insert_one(empty).unwrap();

        let ids: Vec<_> = store
            .find(&Filter::All)
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn open_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("todo.redb");
        let result = RedbDocStore::open(&path, "todo");
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
