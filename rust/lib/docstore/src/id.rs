use std::fmt;

use crate::error::StoreError;

/// Length of the textual id form.
pub const ID_LEN: usize = 32;

/// Native document identifier: 32 lowercase hex digits (a UUIDv4 without dashes).
///
/// Assigned by the store on insert and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(String);

impl DocId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Parse the textual form. Accepts exactly 32 ASCII hex digits in
    /// either case; the result is normalised to lowercase.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        if s.len() != ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidId(format!(
                "'{s}' is not a {ID_LEN}-character hex string"
            )));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
