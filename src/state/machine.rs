/// Lifecycle shared by the pointer gesture handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandlerState {
    #[default]
    Disabled,
    Inactive,
    /// Down seen, waiting for the first qualifying move.
    Pending,
    Active,
}

/// The four-state gesture lifecycle. Wrong-state transitions are silent
/// no-ops; `Active` is only reachable through `Pending`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureMachine {
    state: HandlerState,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HandlerState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != HandlerState::Disabled
    }

    pub fn is_active(&self) -> bool {
        self.state == HandlerState::Active
    }

    pub fn is_inactive(&self) -> bool {
        self.state == HandlerState::Inactive
    }

    pub fn is_engaged(&self) -> bool {
        matches!(self.state, HandlerState::Pending | HandlerState::Active)
    }

    pub fn enable(&mut self) -> bool {
        if self.is_enabled() {
            return false;
        }
        self.state = HandlerState::Inactive;
        true
    }

    /// Forces `Disabled` from any state. `on_abort` runs first when a gesture
    /// was in progress, so the handler can release what it holds.
    pub fn disable(&mut self, on_abort: impl FnOnce(HandlerState)) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if self.is_engaged() {
            on_abort(self.state);
        }
        self.state = HandlerState::Disabled;
        true
    }

    pub fn begin(&mut self) -> bool {
        if self.state != HandlerState::Inactive {
            return false;
        }
        self.state = HandlerState::Pending;
        true
    }

    /// `Pending -> Active`, running `on_activate` on the transition only.
    /// Returns whether the machine is active afterwards.
    pub fn activate(&mut self, on_activate: impl FnOnce()) -> bool {
        match self.state {
            HandlerState::Pending => {
                self.state = HandlerState::Active;
                on_activate();
                true
            }
            HandlerState::Active => true,
            _ => false,
        }
    }

    pub fn release(&mut self) -> Option<HandlerState> {
        if !self.is_engaged() {
            return None;
        }
        let prev = self.state;
        self.state = HandlerState::Inactive;
        Some(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_is_idempotent() {
        let mut m = GestureMachine::new();
        assert!(m.enable());
        assert!(!m.enable());
        assert_eq!(m.state(), HandlerState::Inactive);
    }

    #[test]
    fn active_only_through_pending() {
        let mut m = GestureMachine::new();
        m.enable();
        let mut ran = 0;
        assert!(!m.activate(|| ran += 1));
        assert!(m.begin());
        assert!(!m.begin());
        assert!(m.activate(|| ran += 1));
        assert!(m.activate(|| ran += 1));
        assert_eq!(ran, 1);
        assert!(m.is_active());
        assert_eq!(m.release(), Some(HandlerState::Active));
        assert_eq!(m.release(), None);
    }

    #[test]
    fn disable_aborts_engaged_gesture() {
        let mut m = GestureMachine::new();
        m.enable();
        m.begin();
        m.activate(|| {});
        let mut aborted = None;
        assert!(m.disable(|s| aborted = Some(s)));
        assert_eq!(aborted, Some(HandlerState::Active));
        assert_eq!(m.state(), HandlerState::Disabled);
        assert!(!m.disable(|_| panic!("already disabled")));
    }

    #[test]
    fn disabled_machine_ignores_begin() {
        let mut m = GestureMachine::new();
        assert!(!m.begin());
        assert_eq!(m.state(), HandlerState::Disabled);
    }
}
