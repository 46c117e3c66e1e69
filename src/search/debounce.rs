//! Trailing-edge debounce for the query input.
//!
//! Callers feed every keystroke through [`QueryDebouncer::input`] and poll on
//! each tick; a committed query is handed out once the input has been idle for
//! the configured delay. Instants are passed in rather than read from the
//! clock so the event loop and tests drive time explicitly.

use std::time::{Duration, Instant};

/// Default idle window before a query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    raw: String,
    since: Instant,
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an input change; any pending window restarts from `now`.
    pub fn input(&mut self, raw: &str, now: Instant) {
        self.pending = Some(Pending {
            raw: raw.to_string(),
            since: now,
        });
    }

    /// Hand out the trimmed query once the idle window has elapsed.
    ///
    /// Returns `Some` exactly once per settled input.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.since) >= self.delay);
        if !ready {
            return None;
        }
        self.pending.take().map(|p| p.raw.trim().to_string())
    }

    /// Instant at which the pending window expires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.since + self.delay)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending emission without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
