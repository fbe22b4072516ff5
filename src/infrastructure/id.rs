use crate::domain::ports::IdGenerator;
use crate::domain::transaction::TransactionId;
use chrono::{Datelike, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::atomic::{AtomicU64, Ordering};

const SUFFIX_LEN: usize = 4;

/// Generates ids of the form `TXN-<year>-<unix millis>-<sequence><suffix>`.
///
/// The sequence is unique within one generator; the random suffix is drawn
/// once per generator and separates ids minted by different processes in the
/// same millisecond.
pub struct TimestampIdGenerator {
    sequence: AtomicU64,
    suffix: String,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        let suffix = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        Self {
            sequence: AtomicU64::new(1),
            suffix,
        }
    }
}

impl Default for TimestampIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> TransactionId {
        let now = Utc::now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        TransactionId::new(format!(
            "TXN-{}-{}-{seq:04}{}",
            now.year(),
            now.timestamp_millis(),
            self.suffix
        ))
    }
}

/// Deterministic ids (`<prefix>-000001`, `<prefix>-000002`, ...).
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TransactionId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        TransactionId::new(format!("{}-{n:06}", self.prefix))
    }
}
