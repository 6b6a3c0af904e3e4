use std::{num::NonZeroU32, time::Duration};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub id_generator: IdGeneratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdGeneratorConfig {
    /// Candidates tried before giving up with a hard failure. Zero is
    /// rejected at deserialization.
    pub max_attempts: NonZeroU32,
    /// Sleep after the n-th collision is `n * backoff_ms`.
    pub backoff_ms: u64,
    /// Fixes the random sequence, e.g. for reproducible replays.
    pub seed: Option<u64>,
}

pub const DEFAULT_MAX_ATTEMPTS: NonZeroU32 = NonZeroU32::new(32).unwrap();

impl Default for IdGeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_ms: 0,
            seed: None,
        }
    }
}

impl IdGeneratorConfig {
    pub fn backoff(&self, collisions: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(collisions)))
    }
}
