//! Unsaved-changes navigation guard.
//!
//! Wraps navigation attempts made while the form is dirty. The guard is
//! deliberately decoupled from any routing layer: the pending transition
//! is an opaque value `T` that the host hands in and gets back on
//! confirmation. Both in-app "Cancel" actions and externally triggered
//! navigation (back/forward, link clicks) flow through [`NavigationGuard::request`]
//! with identical behavior.

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Nothing unsaved; the host should navigate immediately.
    Proceed,
    /// The attempt was intercepted; a confirmation dialog should be shown.
    Blocked,
}

/// Guard state machine: `Idle` until a navigation is attempted while
/// dirty, then `AwaitingConfirmation` holding the queued transition.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GuardState<T> {
    Idle,
    AwaitingConfirmation(T),
}

#[derive(Debug, Clone)]
pub struct NavigationGuard<T> {
    state: GuardState<T>,
}

impl<T> Default for NavigationGuard<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigationGuard<T> {
    pub fn new() -> Self {
        Self {
            state: GuardState::Idle,
        }
    }

    /// True while a confirmation dialog should be visible.
    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.state, GuardState::AwaitingConfirmation(_))
    }

    /// Intercept a navigation attempt.
    ///
    /// Clean forms navigate straight through. Dirty forms queue the
    /// target and await confirmation; only one queued transition is
    /// tracked, so a second blocked attempt while a dialog is already
    /// pending replaces the queued target (last wins — only one dialog
    /// can be visible).
    pub fn request(&mut self, dirty: bool, target: T) -> NavigationDecision {
        if !dirty {
            // A clean form never blocks; also drop any stale queued target.
            self.state = GuardState::Idle;
            return NavigationDecision::Proceed;
        }
        self.state = GuardState::AwaitingConfirmation(target);
        NavigationDecision::Blocked
    }

    /// The user chose to leave: return the queued transition for the host
    /// to resume, and fall back to idle.
    pub fn confirm(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, GuardState::Idle) {
            GuardState::AwaitingConfirmation(target) => Some(target),
            GuardState::Idle => None,
        }
    }

    /// The user chose to stay: suppress the queued navigation.
    pub fn cancel(&mut self) {
        self.state = GuardState::Idle;
    }

    /// Page-unload contract: while the form is dirty, closing or
    /// refreshing the tab must trigger the host environment's native
    /// confirmation rather than being silently allowed. Independent of
    /// any in-app confirmation in flight.
    pub fn blocks_unload(&self, dirty: bool) -> bool {
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_form_navigates_immediately() {
        let mut guard: NavigationGuard<&str> = NavigationGuard::new();
        assert_eq!(guard.request(false, "/recipes"), NavigationDecision::Proceed);
        assert!(!guard.is_awaiting_confirmation());
    }

    #[test]
    fn dirty_form_blocks_and_awaits_confirmation() {
        let mut guard = NavigationGuard::new();
        assert_eq!(guard.request(true, "/recipes"), NavigationDecision::Blocked);
        assert!(guard.is_awaiting_confirmation());
    }

    #[test]
    fn confirm_returns_queued_target_and_resets() {
        let mut guard = NavigationGuard::new();
        guard.request(true, "/recipes");
        assert_eq!(guard.confirm(), Some("/recipes"));
        assert!(!guard.is_awaiting_confirmation());
        // A second confirm has nothing queued.
        assert_eq!(guard.confirm(), None);
    }

    #[test]
    fn cancel_suppresses_navigation_and_returns_to_idle() {
        let mut guard = NavigationGuard::new();
        guard.request(true, "/recipes");
        guard.cancel();
        assert!(!guard.is_awaiting_confirmation());
        assert_eq!(guard.confirm(), None);
    }

    #[test]
    fn second_blocked_attempt_replaces_queued_target() {
        let mut guard = NavigationGuard::new();
        guard.request(true, "/recipes");
        guard.request(true, "/recipes/42");
        assert_eq!(guard.confirm(), Some("/recipes/42"));
    }

    #[test]
    fn clean_request_drops_stale_queue() {
        let mut guard = NavigationGuard::new();
        guard.request(true, "/recipes");
        // The draft was saved in the meantime; navigation proceeds and the
        // stale queued target is dropped.
        assert_eq!(guard.request(false, "/home"), NavigationDecision::Proceed);
        assert_eq!(guard.confirm(), None);
    }

    #[test]
    fn unload_blocked_exactly_while_dirty() {
        let guard: NavigationGuard<()> = NavigationGuard::new();
        assert!(guard.blocks_unload(true));
        assert!(!guard.blocks_unload(false));
    }
}
