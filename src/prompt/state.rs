//! Prompt loop state machine

use crate::{Error, Result};

/// Prompt loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    /// Waiting for user input
    #[default]
    Idle,

    /// A request has been dispatched and its response is pending
    Busy,

    /// The loop has ended
    Terminal,
}

impl PromptState {
    /// Check if transition is valid
    pub fn can_transition_to(&self, next: PromptState) -> bool {
        use PromptState::*;

        matches!(
            (self, next),
            (Idle, Busy) | (Busy, Idle) | (Idle, Terminal) | (Busy, Terminal)
        )
    }

    /// Transition to new state
    pub fn transition(&mut self, next: PromptState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(Error::InvalidState {
                expected: format!("valid transition from {}", self),
                actual: next.to_string(),
            });
        }
        *self = next;
        Ok(())
    }
}

impl std::fmt::Display for PromptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Busy => write!(f, "busy"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}
