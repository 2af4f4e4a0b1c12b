use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Position of one evaluation in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

struct TrackerState<T> {
    issued: u64,
    latest: Option<(Ticket, T)>,
}

/// Last-request-wins slot for evaluation results. A result is only kept when
/// no newer evaluation has started since its ticket was issued.
pub struct EvaluationTracker<T> {
    state: Mutex<TrackerState<T>>,
}

impl<T: Clone> EvaluationTracker<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TrackerState {
                issued: 0,
                latest: None,
            }),
        }
    }

    pub fn begin(&self) -> Ticket {
        let mut state = self.lock();
        state.issued += 1;
        Ticket(state.issued)
    }

    /// Stores `value` if `ticket` is still the newest. Returns whether it was
    /// stored.
    pub fn commit(&self, ticket: Ticket, value: T) -> bool {
        let mut state = self.lock();
        if ticket.0 != state.issued {
            return false;
        }
        state.latest = Some((ticket, value));
        true
    }

    /// Clears the stored result when `ticket` is still the newest, so a failed
    /// request does not leave an older result standing.
    pub fn discard(&self, ticket: Ticket) -> bool {
        let mut state = self.lock();
        if ticket.0 != state.issued {
            return false;
        }
        state.latest = None;
        true
    }

    pub fn latest(&self) -> Option<(Ticket, T)> {
        self.lock().latest.clone()
    }

    /// Drops the stored result and invalidates every outstanding ticket.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.issued += 1;
        state.latest = None;
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for EvaluationTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_wins() {
        let tracker = EvaluationTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(tracker.commit(second, "second"));
        assert!(!tracker.commit(first, "first"));
        assert_eq!(tracker.latest(), Some((second, "second")));
    }

    #[test]
    fn stale_result_is_dropped_when_nothing_is_stored() {
        let tracker = EvaluationTracker::new();
        let first = tracker.begin();
        let _second = tracker.begin();
        assert!(!tracker.commit(first, 1));
        assert!(tracker.latest().is_none());
    }

    #[test]
    fn failed_newest_request_clears_older_result() {
        let tracker = EvaluationTracker::new();
        let first = tracker.begin();
        assert!(tracker.commit(first, "first"));
        let stale = tracker.begin();
        let newest = tracker.begin();
        assert!(!tracker.discard(stale));
        assert_eq!(tracker.latest(), Some((first, "first")));
        assert!(tracker.discard(newest));
        assert!(tracker.latest().is_none());
    }

    #[test]
    fn reset_invalidates_in_flight_tickets() {
        let tracker = EvaluationTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.commit(ticket, 1));
        let in_flight = tracker.begin();
        tracker.reset();
        assert!(!tracker.commit(in_flight, 2));
        assert!(tracker.latest().is_none());
        assert!(tracker.begin() > in_flight);
    }
}
