use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub mod in_memory_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key must not be empty")]
    EmptyKey,
    #[error("ledger backend failure: {0}")]
    Backend(String),
}

pub type StoreIter<'a, T> = Box<dyn Iterator<Item = Result<T, StoreError>> + 'a>;

/// A single row produced by [`LedgerStore::query`].
#[derive(Debug, Clone)]
pub struct QueryRecord {
    pub key: String,
    pub value: Vec<u8>,
}

/// One historical mutation of a key, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub tx_id: String,
    /// `None` for deletions.
    pub value: Option<Vec<u8>>,
    pub timestamp: DateTime<Utc>,
    pub is_delete: bool,
}

/// Field equality selector, serialized the way rich-query ledgers expect it:
/// `{"selector":{"model_type":"event","event_type":"deposit"}}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selector {
    selector: BTreeMap<String, String>,
}

impl Selector {
    pub fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.selector.insert(name.to_owned(), value.to_string());
        self
    }

    pub fn to_query_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Records that are not JSON objects never match.
    pub fn matches(&self, value: &[u8]) -> bool {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(value) else {
            return false;
        };
        self.selector
            .iter()
            .all(|(name, expected)| fields.get(name).and_then(Value::as_str) == Some(expected))
    }
}

/// Per-invocation handle onto the external ledger.
///
/// Point operations are durable once the surrounding invocation commits;
/// cross-key atomicity is the implementation's responsibility.
pub trait LedgerStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    fn delete_state(&mut self, key: &str) -> Result<(), StoreError>;

    /// Lazy, finite sequence of matching records. Dropping it releases it.
    fn query(&self, selector: &Selector) -> Result<StoreIter<'_, QueryRecord>, StoreError>;

    fn history(&self, key: &str) -> Result<StoreIter<'_, HistoryRecord>, StoreError>;
}
