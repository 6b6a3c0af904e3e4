use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{AccountState, ModelType};

pub type Balance = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error(
        "amount is greater than the fromAccount.Balance, amount = {amount}, fromAccount.Balance = {balance}"
    )]
    InsufficientFunds { amount: Balance, balance: Balance },
    #[error(
        "amount would overflow the toAccount.Balance, amount = {amount}, toAccount.Balance = {balance}"
    )]
    BalanceOverflow { amount: Balance, balance: Balance },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub model_type: ModelType,
    pub no: String,
    pub name: String,
    pub balance: Balance,
}

impl Account {
    pub fn new(no: String, name: String) -> Self {
        Self {
            model_type: ModelType::Account,
            no,
            name,
            balance: 0,
        }
    }

    pub fn ensure_can_debit(&self, amount: Balance) -> Result<(), AccountError> {
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds {
                amount,
                balance: self.balance,
            });
        }
        Ok(())
    }

    pub fn ensure_can_credit(&self, amount: Balance) -> Result<(), AccountError> {
        match self.balance.checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(AccountError::BalanceOverflow {
                amount,
                balance: self.balance,
            }),
        }
    }

    /// Adds `amount` and returns the before/after snapshot.
    pub fn credit(&mut self, amount: Balance) -> Result<AccountState, AccountError> {
        self.ensure_can_credit(amount)?;
        let previous_balance = self.balance;
        self.balance += amount;
        Ok(self.snapshot(previous_balance))
    }

    /// Subtracts `amount` and returns the before/after snapshot.
    pub fn debit(&mut self, amount: Balance) -> Result<AccountState, AccountError> {
        self.ensure_can_debit(amount)?;
        let previous_balance = self.balance;
        self.balance -= amount;
        Ok(self.snapshot(previous_balance))
    }

    fn snapshot(&self, previous_balance: Balance) -> AccountState {
        AccountState {
            no: self.no.clone(),
            name: self.name.clone(),
            previous_balance,
            current_balance: self.balance,
        }
    }
}
