//! Reducer for view transitions.

use crate::mvi::Reducer;

use super::intent::{Direction, TransitionIntent};
use super::state::{SettleOutcome, TransitionState};

/// Pure transition reducer. Class toggles and listener removal happen in
/// the driver around each dispatch.
pub struct TransitionReducer;

impl Reducer for TransitionReducer {
    type State = TransitionState;
    type Intent = TransitionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (TransitionState::Settled { outcome }, _) => TransitionState::Settled { outcome },

            (
                TransitionState::Idle,
                TransitionIntent::Begin {
                    direction,
                    listener,
                },
            ) => match direction {
                Direction::Enter => TransitionState::Entering { listener },
                Direction::Exit => TransitionState::Leaving { listener },
            },
            // Already running: a second Begin is ignored.
            (running, TransitionIntent::Begin { .. }) => running,

            // Nothing was started, so only teardown can end an idle transition.
            (TransitionState::Idle, TransitionIntent::Cancel) => TransitionState::Settled {
                outcome: SettleOutcome::Cancelled,
            },
            (TransitionState::Idle, _) => TransitionState::Idle,

            (_, TransitionIntent::Complete) => TransitionState::Settled {
                outcome: SettleOutcome::Completed,
            },
            (_, TransitionIntent::Interrupted) => TransitionState::Settled {
                outcome: SettleOutcome::Interrupted,
            },
            (_, TransitionIntent::TimedOut) => TransitionState::Settled {
                outcome: SettleOutcome::TimedOut,
            },
            (_, TransitionIntent::Cancel) => TransitionState::Settled {
                outcome: SettleOutcome::Cancelled,
            },
        }
    }
}
