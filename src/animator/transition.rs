use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::dom::ViewNode;
use crate::lifecycle::LifetimeHandle;
use crate::mvi::Reducer;

use super::intent::{Direction, TransitionIntent};
use super::reducer::TransitionReducer;
use super::state::{SettleOutcome, TransitionState};
use super::StatsCounters;

/// Class names and timing shared by every transition of one animator.
pub(super) struct TransitionSettings {
    pub event: String,
    pub in_class: String,
    pub out_class: String,
    pub settle_timeout: Duration,
}

/// Driver of one transition: owns the node's completion listener and feeds
/// host events through [`TransitionReducer`].
pub(super) struct Transition {
    node: ViewNode,
    direction: Direction,
    state: TransitionState,
    finished: oneshot::Receiver<bool>,
    settings: Arc<TransitionSettings>,
    stats: Arc<StatsCounters>,
    lifetime: LifetimeHandle,
}

impl Transition {
    /// Register the completion listener and apply the synchronous half of
    /// the class sequence. Everything after the next tick runs in
    /// [`run`](Self::run).
    pub fn begin(
        node: ViewNode,
        direction: Direction,
        settings: Arc<TransitionSettings>,
        stats: Arc<StatsCounters>,
        lifetime: LifetimeHandle,
    ) -> Self {
        let (sender, finished) = oneshot::channel();
        let sender = Mutex::new(Some(sender));
        let listener = node.add_transition_listener(&settings.event, move |event| {
            if let Some(sender) = sender.lock().take() {
                let _ = sender.send(event.cancelled);
            }
        });

        match direction {
            Direction::Enter => {
                node.add_class(&settings.in_class);
            }
            Direction::Exit => {
                node.remove_class(&settings.in_class);
            }
        }

        let mut transition = Self {
            node,
            direction,
            state: TransitionState::default(),
            finished,
            settings,
            stats,
            lifetime,
        };
        transition.dispatch(TransitionIntent::Begin {
            direction,
            listener,
        });
        transition
    }

    pub fn spawn(self) -> JoinHandle<SettleOutcome> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) -> SettleOutcome {
        // The previous class change has to reach a style recalculation on
        // its own, otherwise both changes collapse into one and nothing
        // animates.
        self.node.force_style();
        match self.direction {
            Direction::Enter => {
                self.node.remove_class(&self.settings.in_class);
            }
            Direction::Exit => {
                self.node.add_class(&self.settings.out_class);
            }
        }
        tracing::trace!(
            node = %self.node.id(),
            direction = ?self.direction,
            "Transition classes applied"
        );

        let timeout = tokio::time::sleep(self.settings.settle_timeout);
        let intent = tokio::select! {
            biased;
            _ = self.lifetime.wait() => TransitionIntent::Cancel,
            event = &mut self.finished => match event {
                Ok(false) => TransitionIntent::Complete,
                Ok(true) | Err(_) => TransitionIntent::Interrupted,
            },
            _ = timeout => TransitionIntent::TimedOut,
        };
        self.dispatch(intent);

        self.state.outcome().unwrap_or(SettleOutcome::Cancelled)
    }

    fn dispatch(&mut self, intent: TransitionIntent) {
        let listener = self.state.listener();
        self.state = TransitionReducer::reduce(self.state, intent);
        if let Some(outcome) = self.state.outcome() {
            if let Some(listener) = listener {
                self.node.remove_transition_listener(listener);
                self.settle(outcome);
            }
        }
    }

    fn settle(&self, outcome: SettleOutcome) {
        self.stats.record(outcome);
        match outcome {
            SettleOutcome::TimedOut => tracing::warn!(
                node = %self.node.id(),
                direction = ?self.direction,
                timeout = ?self.settings.settle_timeout,
                "Transition never completed, settling anyway"
            ),
            _ => tracing::debug!(
                node = %self.node.id(),
                direction = ?self.direction,
                ?outcome,
                "Transition settled"
            ),
        }

        match self.direction {
            Direction::Enter => {
                self.node.remove_class(&self.settings.in_class);
                if let Some(stale) = self.node.next_sibling() {
                    stale.detach();
                }
            }
            Direction::Exit => {
                self.node.detach();
            }
        }
    }
}
