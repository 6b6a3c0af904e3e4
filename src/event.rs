use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::account::Balance;

/// Discriminator stored on every record so heterogeneous records can be
/// told apart by store-side queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Account,
    Event,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModelType::Account => "account",
            ModelType::Event => "event",
            ModelType::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Deposit,
    Remit,
    Withdraw,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventType::Deposit => "deposit",
            EventType::Remit => "remit",
            EventType::Withdraw => "withdraw",
            EventType::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventType(pub String);

/// Only the concrete event kinds parse; `unknown` is never a valid filter.
impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(EventType::Deposit),
            "remit" => Ok(EventType::Remit),
            "withdraw" => Ok(EventType::Withdraw),
            other => Err(UnknownEventType(other.to_owned())),
        }
    }
}

/// Balance of one account before and after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub no: String,
    pub name: String,
    pub previous_balance: Balance,
    pub current_balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub model_type: ModelType,
    pub event_type: EventType,
    pub no: String,
    pub amount: Balance,
    #[serde(rename = "from_account")]
    pub from_account_state: Option<AccountState>,
    #[serde(rename = "to_account")]
    pub to_account_state: Option<AccountState>,
}

impl Event {
    pub fn deposit(no: String, amount: Balance, to: AccountState) -> Self {
        Self::new(EventType::Deposit, no, amount, None, Some(to))
    }

    pub fn withdraw(no: String, amount: Balance, from: AccountState) -> Self {
        Self::new(EventType::Withdraw, no, amount, Some(from), None)
    }

    pub fn remit(no: String, amount: Balance, from: AccountState, to: AccountState) -> Self {
        Self::new(EventType::Remit, no, amount, Some(from), Some(to))
    }

    fn new(
        event_type: EventType,
        no: String,
        amount: Balance,
        from_account_state: Option<AccountState>,
        to_account_state: Option<AccountState>,
    ) -> Self {
        Self {
            model_type: ModelType::Event,
            event_type,
            no,
            amount,
            from_account_state,
            to_account_state,
        }
    }
}
