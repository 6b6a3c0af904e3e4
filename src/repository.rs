use serde::Serialize;

use crate::{
    account::Account,
    event::ModelType,
    id_generator::IdGenerator,
    outcome::{ContractError, Warning},
    query,
    store::{LedgerStore, Selector},
};

/// Serializes `record` as JSON and writes it under `key`.
pub fn put_record<T: Serialize>(
    store: &mut dyn LedgerStore,
    key: &str,
    record: &T,
) -> Result<(), ContractError> {
    let bytes = serde_json::to_vec(record)?;
    store.put_state(key, bytes)?;
    Ok(())
}

pub struct AccountRepository<'s> {
    store: &'s mut dyn LedgerStore,
}

impl<'s> AccountRepository<'s> {
    pub fn new(store: &'s mut dyn LedgerStore) -> Self {
        Self { store }
    }

    /// A missing key is a 404 warning; undecodable bytes are a hard failure.
    pub fn get(&self, no: &str) -> Result<Account, ContractError> {
        let Some(bytes) = self.store.get_state(no)? else {
            return Err(Warning::not_found(format!("Account does not exist, no = {no}")).into());
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn put(&mut self, account: &Account) -> Result<(), ContractError> {
        put_record(&mut *self.store, &account.no, account)
    }

    pub fn create(&mut self, ids: &mut IdGenerator, name: &str) -> Result<Account, ContractError> {
        let no = ids.account_no(&*self.store)?;
        let account = Account::new(no, name.to_owned());
        self.put(&account)?;
        tracing::info!(no = %account.no, "account created");
        Ok(account)
    }

    pub fn update_name(&mut self, no: &str, name: &str) -> Result<Account, ContractError> {
        let mut account = self.get(no)?;
        account.name = name.to_owned();
        self.put(&account)?;
        Ok(account)
    }

    pub fn delete(&mut self, no: &str) -> Result<(), ContractError> {
        self.get(no)?;
        self.store.delete_state(no)?;
        tracing::info!(no, "account deleted");
        Ok(())
    }

    /// Order is whatever the store yields.
    pub fn list(&self) -> Result<Vec<Account>, ContractError> {
        query::select(
            &*self.store,
            &Selector::default().field("model_type", ModelType::Account),
        )
    }
}
