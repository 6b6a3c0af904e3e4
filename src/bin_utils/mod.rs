//! Replays a CSV invocation script against a fresh in-memory ledger. Used by
//! the binary and by the integration tests.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use csv_parser::CsvInvocationParser;
use csv_printer::{ResponseRow, print_responses};

use crate::{
    config::PaymentConfig, dispatcher::Dispatcher, store::in_memory_store::InMemoryLedger,
};

pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: PaymentConfig,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    /// Each row runs in its own ledger transaction, which is rolled back
    /// when the invocation fails.
    pub fn run(self) -> Result<()> {
        let parser = CsvInvocationParser::new(self.input);
        let mut ledger = InMemoryLedger::default();
        let mut dispatcher = Dispatcher::new(&self.config);

        let mut responses = Vec::new();
        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed invocation at line {line}"))?;
            let mut tx = ledger.begin();
            let outcome = dispatcher.invoke(&mut tx, &row.function, &row.args());
            if outcome.is_failure() {
                tx.rollback();
            } else {
                tx.commit();
            }
            responses.push(ResponseRow::new(line, outcome.into_response()));
        }

        print_responses(self.output, responses.into_iter())
    }
}
