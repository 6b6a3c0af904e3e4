/// Account record and its balance rules.
pub mod account;

/// Event records: the immutable trail of deposits, remits and withdrawals.
pub mod event;

/// Warnings, hard failures, and how both reach the caller.
pub mod outcome;

/// Ledger store interface, plus an "in memory" implementation with
/// transactions and per-key history.
pub mod store;

/// Runtime settings, currently the identifier generator's retry policy.
pub mod config;

/// Store-verified random account and event numbers.
pub mod id_generator;

/// Account reads and writes through the ledger store.
pub mod repository;

/// Deposit, remit and withdraw.
pub mod engine;

/// Event listings and key history.
pub mod query;

/// Invocation parsing: function name and raw arguments to a typed command.
pub mod command;

/// Routes invocations to the repository, engine and query layer, and turns
/// their results into outcomes.
pub mod dispatcher;

/// Ideally, this module should exists on its own crate, as a way to
/// bootstrap core logic. However, it is also used by the integration tests,
/// so it lives here.
pub mod bin_utils;
