pub mod error;
pub mod filter;
pub mod id;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::StoreError;
pub use filter::Filter;
pub use id::DocId;
pub use memory::MemoryDocStore;
pub use redb::RedbDocStore;
pub use traits::{Document, DocumentStore};
