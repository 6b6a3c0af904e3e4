use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    event::{Event, EventType, ModelType},
    outcome::ContractError,
    store::{LedgerStore, Selector},
};

/// One entry of a key's mutation history as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub tx_id: String,
    pub no: String,
    /// `None` when the version is a deletion.
    pub state: Option<Value>,
    pub timestamp: String,
    pub is_delete: bool,
}

/// Runs `selector` and decodes every matching record, draining the result
/// set before returning.
pub fn select<T: DeserializeOwned>(
    store: &dyn LedgerStore,
    selector: &Selector,
) -> Result<Vec<T>, ContractError> {
    let query_string = selector.to_query_string()?;
    tracing::info!("Query string = '{query_string}'");
    store
        .query(selector)?
        .map(|record| -> Result<T, ContractError> {
            Ok(serde_json::from_slice(&record?.value)?)
        })
        .collect()
}

pub fn list_events(
    store: &dyn LedgerStore,
    event_type: Option<EventType>,
) -> Result<Vec<Event>, ContractError> {
    let mut selector = Selector::default().field("model_type", ModelType::Event);
    if let Some(event_type) = event_type {
        selector = selector.field("event_type", event_type);
    }
    select(store, &selector)
}

pub fn list_history(store: &dyn LedgerStore, no: &str) -> Result<Vec<HistoryEntry>, ContractError> {
    store
        .history(no)?
        .map(|record| -> Result<HistoryEntry, ContractError> {
            let record = record?;
            let state = match (&record.value, record.is_delete) {
                (Some(bytes), false) => Some(serde_json::from_slice::<Value>(bytes)?),
                _ => None,
            };
            Ok(HistoryEntry {
                tx_id: record.tx_id,
                no: no.to_owned(),
                state,
                timestamp: record.timestamp.to_rfc3339(),
                is_delete: record.is_delete,
            })
        })
        .collect()
}
