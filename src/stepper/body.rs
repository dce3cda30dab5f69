//! Collapsible step body.
//!
//! A body is either collapsed (no state exists) or expanded (state was
//! created fresh on mount). Collapsing drops the state, so anything the
//! body held is gone the next time it expands.

/// Whether a body is currently part of the rendered tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPresence {
    Collapsed,
    Expanded,
}

/// Result of syncing a body with its step's derived state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTransition {
    Mounted,
    Unmounted,
    Unchanged,
}

#[derive(Debug)]
pub struct StepBody<S> {
    state: Option<S>,
}

impl<S> Default for StepBody<S> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<S: Default> StepBody<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presence(&self) -> BodyPresence {
        if self.state.is_some() {
            BodyPresence::Expanded
        } else {
            BodyPresence::Collapsed
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_some()
    }

    /// Expand or collapse to match `should_render`.
    pub fn sync(&mut self, should_render: bool) -> BodyTransition {
        match (self.state.is_some(), should_render) {
            (false, true) => {
                self.state = Some(S::default());
                BodyTransition::Mounted
            }
            (true, false) => {
                self.state = None;
                BodyTransition::Unmounted
            }
            _ => BodyTransition::Unchanged,
        }
    }

    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut S> {
        self.state.as_mut()
    }
}
