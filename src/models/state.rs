//! Per-view load state.
//!
//! Each view owns one [`LoadSlot`]. A load takes a [`Ticket`] when it starts and
//! hands it back with its outcome; outcomes carrying an older ticket than the
//! latest one issued are discarded, so overlapping loads never let a slow,
//! superseded response overwrite a newer one.

use serde::Serialize;

/// Lifecycle of a single view's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_loaded(self) -> Option<T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Sequence number identifying one load of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// State holder for one view, tracking which load is current.
#[derive(Debug)]
pub struct LoadSlot<T> {
    issued: u64,
    state: LoadState<T>,
}

impl<T> Default for LoadSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LoadSlot<T> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            state: LoadState::Idle,
        }
    }

    /// Start a new load, superseding any load still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.state = LoadState::Loading;
        Ticket(self.issued)
    }

    /// Apply an outcome. Returns `false` if the ticket was superseded.
    pub fn finish(&mut self, ticket: Ticket, outcome: LoadState<T>) -> bool {
        if ticket.0 != self.issued {
            log::debug!(
                "Discarding stale load result (ticket {}, latest {})",
                ticket.0,
                self.issued
            );
            return false;
        }
        self.state = outcome;
        true
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Drop the current data, e.g. when the view goes away.
    pub fn reset(&mut self) {
        self.issued += 1;
        self.state = LoadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_sets_loading() {
        let mut slot: LoadSlot<u32> = LoadSlot::new();
        assert_eq!(slot.state(), &LoadState::Idle);

        let ticket = slot.begin();
        assert!(slot.state().is_loading());
        assert!(slot.finish(ticket, LoadState::Loaded(7)));
        assert_eq!(slot.state().loaded(), Some(&7));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut slot = LoadSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.finish(second, LoadState::Loaded("new")));
        assert!(!slot.finish(first, LoadState::Loaded("old")));
        assert_eq!(slot.state().loaded(), Some(&"new"));
    }

    #[test]
    fn test_stale_failure_does_not_clobber_loading() {
        let mut slot: LoadSlot<&str> = LoadSlot::new();
        let first = slot.begin();
        let _second = slot.begin();

        assert!(!slot.finish(first, LoadState::Failed("boom".into())));
        assert!(slot.state().is_loading());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut slot = LoadSlot::new();
        let ticket = slot.begin();
        slot.reset();

        assert!(!slot.is_current(ticket));
        assert!(!slot.finish(ticket, LoadState::Loaded(1)));
        assert_eq!(slot.state(), &LoadState::Idle);
    }

    #[test]
    fn test_state_accessors() {
        let failed: LoadState<()> = LoadState::Failed("nope".into());
        assert_eq!(failed.failure(), Some("nope"));
        assert_eq!(LoadState::Loaded(3).into_loaded(), Some(3));
    }
}
