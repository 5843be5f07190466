const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Converts coarse second-resolution input timestamps into a strictly
/// increasing nanosecond sequence for the life of the process.
///
/// The ingestion API rejects out-of-order timestamps within a session, so a
/// burst of records sharing one raw second is spread across consecutive
/// nanoseconds starting from the last emitted value.
#[derive(Debug, Default)]
pub struct TimestampSequencer {
    last_emitted: u64,
}

impl TimestampSequencer {
    pub fn new() -> Self {
        Self { last_emitted: 0 }
    }

    /// Returns the next timestamp in nanoseconds. Output is strictly greater
    /// than every previously returned value, regardless of input ordering,
    /// duplicates, or clock skew in the raw input.
    pub fn next(&mut self, raw_seconds: u64) -> u64 {
        let candidate = raw_seconds.saturating_mul(NANOS_PER_SECOND);
        let timestamp = candidate.max(self.last_emitted + 1);
        self.last_emitted = timestamp;
        timestamp
    }

    pub fn last_emitted(&self) -> u64 {
        self.last_emitted
    }
}
