//! State of a single view transition.

use serde::Serialize;

use crate::dom::ListenerId;
use crate::mvi::UiState;

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleOutcome {
    Completed,
    Interrupted,
    TimedOut,
    Cancelled,
}

/// Transition state machine.
///
/// `Idle → Entering → Settled` for the incoming view and
/// `Idle → Leaving → Settled` for the outgoing one. The listener id lives
/// in the running state, so it is released exactly once: on the step into
/// `Settled`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,

    Entering {
        listener: ListenerId,
    },

    Leaving {
        listener: ListenerId,
    },

    Settled {
        outcome: SettleOutcome,
    },
}

impl UiState for TransitionState {}

impl TransitionState {
    /// Listener owned by a running transition.
    pub fn listener(&self) -> Option<ListenerId> {
        match self {
            Self::Entering { listener } | Self::Leaving { listener } => Some(*listener),
            Self::Idle | Self::Settled { .. } => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Entering { .. } | Self::Leaving { .. })
    }

    pub fn outcome(&self) -> Option<SettleOutcome> {
        match self {
            Self::Settled { outcome } => Some(*outcome),
            _ => None,
        }
    }
}
