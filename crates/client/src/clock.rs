// Path: crates/client/src/clock.rs
//! Wall-clock source for transaction valid-start times, plus the [`Deadline`]
//! that bounds one logical operation.

use hgsdk_api::clock::Clock;
use hgsdk_types::app::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tokio::time::Instant;

/// Nodes reject a valid start that lies in their future, so ids are
/// backdated by this much to absorb small clock skew.
pub const VALID_START_BACKDATE: Duration = Duration::from_secs(10);

/// The system clock, made strictly increasing.
///
/// Two calls never return the same timestamp: if the wall clock has not moved
/// (or moved backwards) since the last call, the previous value plus one
/// nanosecond is returned instead.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_nanos: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_nanos() -> u64 {
        let now = SystemTime::now()
            .checked_sub(VALID_START_BACKDATE)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let nanos = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}

impl Clock for SystemClock {
    fn valid_start(&self) -> Timestamp {
        let now = Self::now_nanos();
        let mut prev = self.last_nanos.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev.saturating_add(1));
            match self.last_nanos.compare_exchange_weak(
                prev,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Timestamp::from_unix_nanos(u128::from(next)),
                Err(observed) => prev = observed,
            }
        }
    }
}

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365);

/// The time budget of one logical operation.
///
/// A single deadline is threaded through submission retries and receipt
/// polling, and through every chunk of a chunked operation, so cancelling by
/// timeout is one top-level control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        Self {
            at: now
                .checked_add(budget)
                .or_else(|| now.checked_add(FAR_FUTURE))
                .unwrap_or(now),
        }
    }

    /// A deadline at a fixed instant.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Caps `timeout` at the time left.
    pub fn clamp(&self, timeout: Duration) -> Duration {
        timeout.min(self.remaining())
    }
}
