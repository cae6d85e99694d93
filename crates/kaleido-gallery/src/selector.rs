//! Sample selection state machine.
//!
//! Replaces the "current sample drives a table of initializers" shape with an
//! explicit state type. Two rules it enforces by construction:
//! - at most one session exists; selecting a new sample hands the previous
//!   session back to the caller for teardown before anything else happens
//! - a selection that cannot be completed (no device) resolves to `Inactive`,
//!   which is the no-op outcome: no session, no draws, blank surface

use crate::samples::SampleKind;

#[derive(Debug)]
pub enum SelectorState<S> {
    /// Nothing selected, or the last selection degraded to the no-op.
    Inactive,
    /// A sample was chosen; its session has not been built yet.
    Loading(SampleKind),
    /// A live session driving frames.
    Active(SampleKind, S),
}

impl<S> SelectorState<S> {
    pub fn new() -> Self {
        Self::Inactive
    }

    /// Requests `kind`, returning the torn-down previous session, if any.
    ///
    /// Re-selecting the sample that is already active is ignored; the running
    /// session keeps its accumulated frame state.
    pub fn select(&mut self, kind: SampleKind) -> Option<S> {
        if let Self::Active(current, _) = self {
            if *current == kind {
                return None;
            }
        }

        match std::mem::replace(self, Self::Loading(kind)) {
            Self::Active(_, session) => Some(session),
            _ => None,
        }
    }

    /// The selection waiting for a session, if any.
    pub fn pending(&self) -> Option<SampleKind> {
        match self {
            Self::Loading(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Completes a pending selection with a live session.
    pub fn activate(&mut self, session: S) {
        match *self {
            Self::Loading(kind) => *self = Self::Active(kind, session),
            _ => debug_assert!(false, "activate without a pending selection"),
        }
    }

    /// Resolves a pending selection to the no-op outcome.
    pub fn abort(&mut self) {
        if matches!(self, Self::Loading(_)) {
            *self = Self::Inactive;
        }
    }

    /// The active sample and its session, if any.
    pub fn active_mut(&mut self) -> Option<(SampleKind, &mut S)> {
        match self {
            Self::Active(kind, session) => Some((*kind, session)),
            _ => None,
        }
    }
}

impl<S> Default for SelectorState<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        let selector: SelectorState<u32> = SelectorState::new();
        assert!(matches!(selector, SelectorState::Inactive));
    }

    #[test]
    fn select_then_activate_reaches_active() {
        let mut selector: SelectorState<u32> = SelectorState::new();
        assert!(selector.select(SampleKind::Triangle).is_none());
        assert_eq!(selector.pending(), Some(SampleKind::Triangle));

        selector.activate(7);
        let (kind, session) = selector.active_mut().expect("active");
        assert_eq!(kind, SampleKind::Triangle);
        assert_eq!(*session, 7);
    }

    #[test]
    fn aborted_selection_is_the_noop_outcome_for_every_sample() {
        for kind in SampleKind::ALL {
            let mut selector: SelectorState<u32> = SelectorState::new();
            selector.select(kind);
            selector.abort();
            assert!(matches!(selector, SelectorState::Inactive));
            assert!(selector.active_mut().is_none());
        }
    }

    #[test]
    fn switching_samples_returns_the_previous_session() {
        let mut selector: SelectorState<&'static str> = SelectorState::new();
        selector.select(SampleKind::RotatingCube);
        selector.activate("cube session");

        let torn_down = selector.select(SampleKind::TwoCube);
        assert_eq!(torn_down, Some("cube session"));
        assert_eq!(selector.pending(), Some(SampleKind::TwoCube));
    }

    #[test]
    fn reselecting_the_active_sample_is_ignored() {
        let mut selector: SelectorState<u32> = SelectorState::new();
        selector.select(SampleKind::TwoCube);
        selector.activate(1);

        assert!(selector.select(SampleKind::TwoCube).is_none());
        let (kind, session) = selector.active_mut().expect("still active");
        assert_eq!(kind, SampleKind::TwoCube);
        assert_eq!(*session, 1);
    }

    #[test]
    fn pending_is_empty_outside_loading() {
        let mut selector: SelectorState<u32> = SelectorState::new();
        assert_eq!(selector.pending(), None);
        selector.select(SampleKind::Triangle);
        selector.activate(0);
        assert_eq!(selector.pending(), None);
    }
}
