use std::{fs::File, num::NonZeroU32};

use anyhow::{Context, Result};
use clap::Parser;
use fabric_payment::{
    bin_utils::Service,
    config::{DEFAULT_MAX_ATTEMPTS, IdGeneratorConfig, PaymentConfig},
};

#[derive(Debug, Parser)]
#[command(name = "fabric-payment", about = "Replay payment invocations from a CSV file")]
struct Args {
    /// CSV file with header `function,arg1,arg2,arg3`.
    file: String,
    /// Log filter (e.g. `info`, `fabric_payment=debug`).
    #[arg(long, env = "FABRIC_PAYMENT_LOG", default_value = "warn")]
    log_level: String,
    /// Must be at least 1.
    #[arg(long, env = "FABRIC_PAYMENT_MAX_ID_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_id_attempts: NonZeroU32,
    #[arg(long, env = "FABRIC_PAYMENT_ID_BACKOFF_MS", default_value_t = 0)]
    id_backoff_ms: u64,
    /// Seed for reproducible account and event numbers.
    #[arg(long, env = "FABRIC_PAYMENT_SEED")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let file =
        File::open(&args.file).with_context(|| format!("Failed to open `{}`", args.file))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config: PaymentConfig {
            id_generator: IdGeneratorConfig {
                max_attempts: args.max_id_attempts,
                backoff_ms: args.id_backoff_ms,
                seed: args.seed,
            },
        },
    };
    service.run()
}
