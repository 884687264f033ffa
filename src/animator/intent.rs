//! Intents for a single view transition.

use crate::dom::ListenerId;
use crate::mvi::Intent;

/// Which half of a view swap a transition drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The incoming view.
    Enter,
    /// The outgoing view.
    Exit,
}

#[derive(Debug)]
pub enum TransitionIntent {
    /// The completion listener is registered and the state classes are
    /// about to be toggled.
    Begin {
        direction: Direction,
        listener: ListenerId,
    },

    /// The host reported the end of the transition.
    Complete,

    /// The node was detached while its transition was still running.
    Interrupted,

    /// No completion arrived within the settle timeout.
    TimedOut,

    /// The activation that started the transition was torn down.
    Cancel,
}

impl Intent for TransitionIntent {}
