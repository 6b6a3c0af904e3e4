//! Deposit, remit and withdraw.
//!
//! Every check that can reject a request (amount, account existence,
//! sufficiency, overflow) runs before an event no is drawn or anything is
//! written. Once writes start they are plain sequential puts: accounts first,
//! the event last.

use crate::{
    account::Balance,
    event::Event,
    id_generator::IdGenerator,
    outcome::{ContractError, Warning},
    repository::{AccountRepository, put_record},
    store::LedgerStore,
};

/// Parses a non-negative integer amount.
pub fn parse_amount(amount: &str) -> Result<Balance, Warning> {
    let Ok(value) = amount.parse::<i128>() else {
        return Err(Warning::bad_request(format!(
            "amount is not integer, amount = {amount}"
        )));
    };
    if value < 0 {
        return Err(Warning::bad_request(format!(
            "amount is less than zero, amount = {value}"
        )));
    }
    Balance::try_from(value).map_err(|_| {
        Warning::bad_request(format!("amount is too large, amount = {value}"))
    })
}

pub struct TransactionEngine<'s> {
    store: &'s mut dyn LedgerStore,
    ids: &'s mut IdGenerator,
}

impl<'s> TransactionEngine<'s> {
    pub fn new(store: &'s mut dyn LedgerStore, ids: &'s mut IdGenerator) -> Self {
        Self { store, ids }
    }

    fn accounts(&mut self) -> AccountRepository<'_> {
        AccountRepository::new(&mut *self.store)
    }

    pub fn deposit(&mut self, to_no: &str, amount: &str) -> Result<Event, ContractError> {
        let amount = parse_amount(amount)?;
        let mut to = self.accounts().get(to_no)?;
        to.ensure_can_credit(amount)?;

        let event_no = self.ids.event_no(&*self.store)?;
        let to_state = to.credit(amount)?;
        let event = Event::deposit(event_no, amount, to_state);

        self.accounts().put(&to)?;
        put_record(&mut *self.store, &event.no, &event)?;
        tracing::info!(no = %event.no, to = %to.no, amount, "deposit committed");
        Ok(event)
    }

    pub fn withdraw(&mut self, from_no: &str, amount: &str) -> Result<Event, ContractError> {
        let amount = parse_amount(amount)?;
        let mut from = self.accounts().get(from_no)?;
        from.ensure_can_debit(amount)?;

        let event_no = self.ids.event_no(&*self.store)?;
        let from_state = from.debit(amount)?;
        let event = Event::withdraw(event_no, amount, from_state);

        self.accounts().put(&from)?;
        put_record(&mut *self.store, &event.no, &event)?;
        tracing::info!(no = %event.no, from = %from.no, amount, "withdraw committed");
        Ok(event)
    }

    /// `from_no == to_no` is a 400 warning.
    pub fn remit(
        &mut self,
        from_no: &str,
        to_no: &str,
        amount: &str,
    ) -> Result<Event, ContractError> {
        let amount = parse_amount(amount)?;
        let mut from = self.accounts().get(from_no)?;
        let mut to = self.accounts().get(to_no)?;
        if from.no == to.no {
            return Err(Warning::bad_request(format!(
                "fromAccount and toAccount are the same, no = {}",
                from.no
            ))
            .into());
        }
        from.ensure_can_debit(amount)?;
        to.ensure_can_credit(amount)?;

        let event_no = self.ids.event_no(&*self.store)?;
        let from_state = from.debit(amount)?;
        let to_state = to.credit(amount)?;
        let event = Event::remit(event_no, amount, from_state, to_state);

        let mut accounts = self.accounts();
        accounts.put(&from)?;
        accounts.put(&to)?;
        put_record(&mut *self.store, &event.no, &event)?;
        tracing::info!(no = %event.no, from = %from.no, to = %to.no, amount, "remit committed");
        Ok(event)
    }
}
