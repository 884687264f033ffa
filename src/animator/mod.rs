//! Enter/exit transitions between successive views.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Per-transition state (Idle → Entering/Leaving → Settled)
//! - `intent.rs` - Host events (Begin, Complete, Interrupted, TimedOut, Cancel)
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `transition.rs` - Driver toggling classes and owning the listener
//!
//! ```text
//! enter: +in ─tick─→ -in ──transitionend──→ detach stale sibling
//! exit:  -in ─tick─→ +out ─transitionend──→ detach self
//! ```
//!
//! Without a transition event the animator is a pass-through and the
//! caller swaps views synchronously.

mod intent;
mod reducer;
mod state;
mod transition;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::AnimationConfig;
use crate::dom::{Platform, ViewNode};
use crate::lifecycle::LifetimeHandle;

pub use intent::{Direction, TransitionIntent};
pub use reducer::TransitionReducer;
pub use state::{SettleOutcome, TransitionState};

use transition::{Transition, TransitionSettings};

/// Settlement counters, by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnimatorStats {
    pub completed: u64,
    pub interrupted: u64,
    pub timed_out: u64,
    pub cancelled: u64,
}

impl AnimatorStats {
    pub fn total(&self) -> u64 {
        self.completed + self.interrupted + self.timed_out + self.cancelled
    }
}

#[derive(Default)]
pub(crate) struct StatsCounters {
    completed: AtomicU64,
    interrupted: AtomicU64,
    timed_out: AtomicU64,
    cancelled: AtomicU64,
}

impl StatsCounters {
    fn record(&self, outcome: SettleOutcome) {
        let counter = match outcome {
            SettleOutcome::Completed => &self.completed,
            SettleOutcome::Interrupted => &self.interrupted,
            SettleOutcome::TimedOut => &self.timed_out,
            SettleOutcome::Cancelled => &self.cancelled,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> AnimatorStats {
        AnimatorStats {
            completed: self.completed.load(Ordering::Relaxed),
            interrupted: self.interrupted.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }
}

/// One running transition.
pub struct TransitionHandle {
    direction: Direction,
    task: JoinHandle<SettleOutcome>,
}

impl TransitionHandle {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub async fn settled(self) -> SettleOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "Transition task failed");
                SettleOutcome::Cancelled
            }
        }
    }
}

/// Transitions started by one render. Empty for pass-through renders.
#[derive(Default)]
pub struct RenderHandle {
    transitions: Vec<TransitionHandle>,
}

impl RenderHandle {
    pub fn is_animated(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.transitions
            .iter()
            .all(|transition| transition.task.is_finished())
    }

    /// Wait for every transition, returning outcomes in start order
    /// (exit before enter).
    pub async fn settled(self) -> Vec<SettleOutcome> {
        let mut outcomes = Vec::with_capacity(self.transitions.len());
        for transition in self.transitions {
            outcomes.push(transition.settled().await);
        }
        outcomes
    }
}

/// Sequences the state classes of incoming and outgoing views.
#[derive(Clone)]
pub struct Animator {
    settings: Option<Arc<TransitionSettings>>,
    stats: Arc<StatsCounters>,
}

impl Animator {
    /// Animated when the config enables it and the host exposes a
    /// transition-completion event.
    pub fn new(config: &AnimationConfig, platform: &Platform) -> Self {
        let event = platform.transition_event().filter(|_| config.enabled);
        if event.is_none() {
            tracing::debug!("No transition event, views swap without animation");
        }
        let settings = event.map(|event| {
            Arc::new(TransitionSettings {
                event: event.to_string(),
                in_class: config.in_class.clone(),
                out_class: config.out_class.clone(),
                settle_timeout: config.settle_timeout(),
            })
        });
        Self {
            settings,
            stats: Arc::new(StatsCounters::default()),
        }
    }

    pub fn is_animated(&self) -> bool {
        self.settings.is_some()
    }

    pub fn stats(&self) -> AnimatorStats {
        self.stats.snapshot()
    }

    /// Start the exit transition of `previous` and the enter transition of
    /// `next`. `next` must already be in the mount, ahead of `previous`.
    ///
    /// Both transitions settle early when `lifetime` ends; cleanup still
    /// runs. In pass-through mode nothing is touched and the returned handle
    /// is empty.
    ///
    /// Must be called from within a tokio runtime.
    pub fn animate(
        &self,
        previous: Option<&ViewNode>,
        next: &ViewNode,
        lifetime: &LifetimeHandle,
    ) -> RenderHandle {
        let Some(settings) = &self.settings else {
            return RenderHandle::default();
        };

        let mut transitions = Vec::with_capacity(2);
        let mut start = |node: &ViewNode, direction: Direction| {
            let transition = Transition::begin(
                node.clone(),
                direction,
                Arc::clone(settings),
                Arc::clone(&self.stats),
                lifetime.clone(),
            );
            transitions.push(TransitionHandle {
                direction,
                task: transition.spawn(),
            });
        };
        if let Some(previous) = previous.filter(|previous| *previous != next) {
            start(previous, Direction::Exit);
        }
        start(next, Direction::Enter);

        RenderHandle { transitions }
    }
}
