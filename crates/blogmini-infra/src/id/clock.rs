use std::sync::atomic::{AtomicI64, Ordering};

use blogmini_core::ports::IdGenerator;
use chrono::Utc;

/// Millisecond wall-clock ids, e.g. `"1718000000000"`.
///
/// Strictly increasing within a process: when two ids are requested in the
/// same millisecond (or the clock steps back) the previous value plus one is
/// used instead.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose first id is greater than `last`, so ids already
    /// stored (possibly by an earlier run with a faster clock) are skipped.
    pub fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    /// Seed from existing ids, ignoring any that are not plain numbers.
    pub fn after_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let last = ids
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self::starting_after(last)
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}
