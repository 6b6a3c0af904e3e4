use serde_json::Value;

use crate::{
    command::Command,
    config::PaymentConfig,
    engine::TransactionEngine,
    id_generator::IdGenerator,
    outcome::{ContractError, Outcome},
    query,
    repository::AccountRepository,
    store::LedgerStore,
};

/// Routes named invocations to the repository, engine and query layer.
pub struct Dispatcher {
    ids: IdGenerator,
}

impl Dispatcher {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            ids: IdGenerator::new(config.id_generator.clone()),
        }
    }

    pub fn invoke(
        &mut self,
        store: &mut dyn LedgerStore,
        function: &str,
        args: &[String],
    ) -> Outcome {
        let span = tracing::info_span!("invoke", function);
        let _guard = span.enter();
        tracing::info!(?args, "invoke {function}");

        let outcome = Outcome::from(
            Command::parse(function, args).and_then(|command| self.execute(store, command)),
        );
        match &outcome {
            Outcome::Success(_) => {}
            Outcome::Warning(warning) => tracing::warn!("{warning}"),
            Outcome::Failure(message) => tracing::error!("{message}"),
        }
        outcome
    }

    pub fn execute(
        &mut self,
        store: &mut dyn LedgerStore,
        command: Command,
    ) -> Result<Value, ContractError> {
        let payload = match command {
            Command::ListAccounts => serde_json::to_value(AccountRepository::new(store).list()?)?,
            Command::CreateAccount { name } => {
                serde_json::to_value(AccountRepository::new(store).create(&mut self.ids, &name)?)?
            }
            Command::RetrieveAccount { no } => {
                serde_json::to_value(AccountRepository::new(store).get(&no)?)?
            }
            Command::UpdateAccountName { no, name } => {
                serde_json::to_value(AccountRepository::new(store).update_name(&no, &name)?)?
            }
            Command::DeleteAccount { no } => {
                AccountRepository::new(store).delete(&no)?;
                Value::Null
            }
            Command::ListEvents { event_type } => {
                serde_json::to_value(query::list_events(store, event_type)?)?
            }
            Command::Deposit { to_no, amount } => serde_json::to_value(
                TransactionEngine::new(store, &mut self.ids).deposit(&to_no, &amount)?,
            )?,
            Command::Remit {
                from_no,
                to_no,
                amount,
            } => serde_json::to_value(
                TransactionEngine::new(store, &mut self.ids).remit(&from_no, &to_no, &amount)?,
            )?,
            Command::Withdraw { from_no, amount } => serde_json::to_value(
                TransactionEngine::new(store, &mut self.ids).withdraw(&from_no, &amount)?,
            )?,
            Command::ListHistory { no } => serde_json::to_value(query::list_history(store, &no)?)?,
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        config::IdGeneratorConfig,
        outcome::Warning,
        store::{
            HistoryRecord, QueryRecord, Selector, StoreError, StoreIter,
            in_memory_store::InMemoryLedger,
        },
    };

    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&PaymentConfig {
            id_generator: IdGeneratorConfig {
                seed: Some(5),
                ..Default::default()
            },
        })
    }

    fn call(
        dispatcher: &mut Dispatcher,
        ledger: &mut InMemoryLedger,
        function: &str,
        args: &[&str],
    ) -> Outcome {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut tx = ledger.begin();
        let outcome = dispatcher.invoke(&mut tx, function, &args);
        if outcome.is_failure() {
            tx.rollback();
        } else {
            tx.commit();
        }
        outcome
    }

    /// Forwards to `inner` but fails every `put_state` after the first
    /// `allowed_puts`.
    struct FailingPuts<'s> {
        inner: &'s mut dyn LedgerStore,
        allowed_puts: usize,
    }

    impl LedgerStore for FailingPuts<'_> {
        fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get_state(key)
        }

        fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
            if self.allowed_puts == 0 {
                return Err(StoreError::Backend(format!("put rejected, key = {key}")));
            }
            self.allowed_puts -= 1;
            self.inner.put_state(key, value)
        }

        fn delete_state(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.delete_state(key)
        }

        fn query(&self, selector: &Selector) -> Result<StoreIter<'_, QueryRecord>, StoreError> {
            self.inner.query(selector)
        }

        fn history(&self, key: &str) -> Result<StoreIter<'_, HistoryRecord>, StoreError> {
            self.inner.history(key)
        }
    }

    fn success(outcome: Outcome) -> Value {
        match outcome {
            Outcome::Success(payload) => payload,
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn account_lifecycle() {
        let mut ledger = InMemoryLedger::default();
        let mut d = dispatcher();

        let created = success(call(&mut d, &mut ledger, "createAccount", &["Alice"]));
        let no = created["no"].as_str().unwrap().to_string();
        assert_eq!(created["balance"], json!(0));
        assert_eq!(created["model_type"], json!("account"));

        let renamed = success(call(&mut d, &mut ledger, "updateAccountName", &[&no, "Alicia"]));
        assert_eq!(renamed["name"], json!("Alicia"));

        let listed = success(call(&mut d, &mut ledger, "listAccount", &[]));
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let deleted = success(call(&mut d, &mut ledger, "deleteAccount", &[&no]));
        assert_eq!(deleted, Value::Null);

        assert_eq!(
            call(&mut d, &mut ledger, "retrieveAccount", &[&no]),
            Outcome::Warning(Warning::not_found(format!(
                "Account does not exist, no = {no}"
            )))
        );

        let history = success(call(&mut d, &mut ledger, "listHistory", &[&no]));
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0]["state"]["name"], json!("Alice"));
        assert_eq!(history[1]["state"]["name"], json!("Alicia"));
        assert_eq!(history[2]["state"], Value::Null);
        assert_eq!(history[2]["is_delete"], json!(true));
    }

    #[test]
    fn input_errors_are_failures() {
        let mut ledger = InMemoryLedger::default();
        let mut d = dispatcher();

        assert!(call(&mut d, &mut ledger, "createAccount", &[]).is_failure());
        assert!(call(&mut d, &mut ledger, "listEvent", &["refund"]).is_failure());
        assert!(call(&mut d, &mut ledger, "nope", &[]).is_failure());
        assert!(ledger.is_empty());
    }

    #[test]
    fn list_events_filters_by_type() {
        let mut ledger = InMemoryLedger::default();
        let mut d = dispatcher();
        let a = success(call(&mut d, &mut ledger, "createAccount", &["A"]));
        let b = success(call(&mut d, &mut ledger, "createAccount", &["B"]));
        let a = a["no"].as_str().unwrap();
        let b = b["no"].as_str().unwrap();

        success(call(&mut d, &mut ledger, "deposit", &[a, "50"]));
        success(call(&mut d, &mut ledger, "remit", &[a, b, "20"]));
        success(call(&mut d, &mut ledger, "withdraw", &[b, "5"]));

        let all = success(call(&mut d, &mut ledger, "listEvent", &[]));
        assert_eq!(all.as_array().unwrap().len(), 3);
        let remits = success(call(&mut d, &mut ledger, "listEvent", &["remit"]));
        let remits = remits.as_array().unwrap();
        assert_eq!(remits.len(), 1);
        assert_eq!(remits[0]["from_account"]["current_balance"], json!(30));
        assert_eq!(remits[0]["to_account"]["current_balance"], json!(20));
    }

    #[test]
    fn failed_remit_leaves_nothing_behind() {
        let mut ledger = InMemoryLedger::default();
        let mut d = dispatcher();
        let a = success(call(&mut d, &mut ledger, "createAccount", &["A"]));
        let b = success(call(&mut d, &mut ledger, "createAccount", &["B"]));
        let a = a["no"].as_str().unwrap().to_string();
        let b = b["no"].as_str().unwrap().to_string();
        success(call(&mut d, &mut ledger, "deposit", &[&a, "50"]));

        let args = [a.clone(), b.clone(), "20".to_string()];
        let mut tx = ledger.begin();
        let mut store = FailingPuts {
            inner: &mut tx,
            allowed_puts: 1,
        };
        let outcome = d.invoke(&mut store, "remit", &args);
        match &outcome {
            Outcome::Failure(message) => assert!(message.contains("put rejected"), "{message}"),
            other => panic!("expected failure, got {other:?}"),
        }

        // the debit of `a` reached the transaction before the credit of `b` failed
        let pending: Value = serde_json::from_slice(&tx.get_state(&a).unwrap().unwrap()).unwrap();
        assert_eq!(pending["balance"], json!(30));
        if outcome.is_failure() {
            tx.rollback();
        } else {
            tx.commit();
        }

        let a_now = success(call(&mut d, &mut ledger, "retrieveAccount", &[&a]));
        let b_now = success(call(&mut d, &mut ledger, "retrieveAccount", &[&b]));
        assert_eq!(a_now["balance"], json!(50));
        assert_eq!(b_now["balance"], json!(0));
        let events = success(call(&mut d, &mut ledger, "listEvent", &[]));
        assert_eq!(events.as_array().unwrap().len(), 1);
        let history = success(call(&mut d, &mut ledger, "listHistory", &[&a]));
        assert_eq!(history.as_array().unwrap().len(), 2);
    }
}
