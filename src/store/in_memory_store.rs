use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use super::{HistoryRecord, LedgerStore, QueryRecord, Selector, StoreError, StoreIter};

/// Committed world state plus the full mutation history of every key.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    world: BTreeMap<String, Vec<u8>>,
    history: HashMap<String, Vec<HistoryRecord>>,
    tx_seq: u64,
}

impl InMemoryLedger {
    /// Opens a transaction. Nothing it writes is visible to later
    /// transactions until [`InMemoryTransaction::commit`].
    pub fn begin(&mut self) -> InMemoryTransaction<'_> {
        self.tx_seq += 1;
        InMemoryTransaction {
            tx_id: format!("{:064x}", self.tx_seq),
            ledger: self,
            writes: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.world.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}

pub struct InMemoryTransaction<'l> {
    ledger: &'l mut InMemoryLedger,
    tx_id: String,
    // `None` marks a pending delete
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl InMemoryTransaction<'_> {
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn commit(self) {
        let timestamp = Utc::now();
        let ledger = self.ledger;
        for (key, value) in self.writes {
            let is_delete = value.is_none();
            match &value {
                Some(bytes) => ledger.world.insert(key.clone(), bytes.clone()),
                None => ledger.world.remove(&key),
            };
            ledger.history.entry(key).or_default().push(HistoryRecord {
                tx_id: self.tx_id.clone(),
                value,
                timestamp,
                is_delete,
            });
        }
    }

    pub fn rollback(self) {}
}

impl LedgerStore for InMemoryTransaction<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        Ok(self.ledger.world.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.writes.insert(key.to_owned(), Some(value));
        Ok(())
    }

    fn delete_state(&mut self, key: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.writes.insert(key.to_owned(), None);
        Ok(())
    }

    // rich queries run against committed state only
    fn query(&self, selector: &Selector) -> Result<StoreIter<'_, QueryRecord>, StoreError> {
        let selector = selector.clone();
        Ok(Box::new(
            self.ledger
                .world
                .iter()
                .filter(move |(_, value)| selector.matches(value))
                .map(|(key, value)| {
                    Ok::<_, StoreError>(QueryRecord {
                        key: key.clone(),
                        value: value.clone(),
                    })
                }),
        ))
    }

    fn history(&self, key: &str) -> Result<StoreIter<'_, HistoryRecord>, StoreError> {
        Ok(Box::new(
            self.ledger
                .history
                .get(key)
                .into_iter()
                .flatten()
                .cloned()
                .map(Ok::<_, StoreError>),
        ))
    }
}
