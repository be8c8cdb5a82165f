//! Synthetic record generation with an explicit, optionally seeded RNG.

use chrono::{DateTime, Timelike, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use insertbench_core::errors::InputError;
use insertbench_core::{Amount, Record, RecordStatus};

/// Length of the required text field.
pub const PRIMARY_LEN: usize = 50;
/// Length of the optional text field, when present.
pub const SECONDARY_LEN: usize = 100;
/// Upper bound (exclusive) of the generated amount.
pub const AMOUNT_UPPER: f64 = 1_000_000.0;

/// Produces batches of random records.
///
/// Given the same seed, a generator yields the identical sequence of field
/// values across calls; only the batch timestamp differs.
#[derive(Debug)]
pub struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` records sharing one creation timestamp.
    pub fn generate(&mut self, count: i64) -> Result<Vec<Record>, InputError> {
        let count = usize::try_from(count).map_err(|_| InputError::NegativeCount { value: count })?;
        let created_at = now_millis();
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.next_record(created_at)?);
        }
        Ok(records)
    }

    fn next_record(&mut self, created_at: DateTime<Utc>) -> Result<Record, InputError> {
        let primary = self.alphanumeric(PRIMARY_LEN);
        let secondary = if self.rng.gen_bool(0.5) {
            Some(self.alphanumeric(SECONDARY_LEN))
        } else {
            None
        };
        let amount = Amount::from_f64_half_up(self.rng.gen_range(0.0..AMOUNT_UPPER))?;
        let status = RecordStatus::ALL[self.rng.gen_range(0..RecordStatus::ALL.len())];

        Ok(Record::new(primary, created_at)?
            .with_secondary(secondary)
            .with_amount(Some(amount))
            .with_status(status))
    }

    fn alphanumeric(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

impl Default for RecordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate `count` records from a fresh generator seeded with `seed`.
pub fn generate_with_seed(count: i64, seed: u64) -> Result<Vec<Record>, InputError> {
    RecordGenerator::with_seed(seed).generate(count)
}

/// Current time truncated to whole milliseconds, the store's resolution.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000_000 * 1_000_000)
        .unwrap_or(now)
}
