use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;

use super::node::{TransitionEvent, ViewNode};
use super::platform::Platform;

/// Recalculates node styles and fires transition-end events.
///
/// Class changes are coalesced: the first change after a recalculation
/// schedules the next one on a spawned task, later changes in the same tick
/// ride along. Without a running tokio runtime recalculation happens
/// immediately and no transitions are started.
#[derive(Clone)]
pub struct StyleEngine {
    platform: Arc<Platform>,
    started: Arc<AtomicU64>,
}

impl StyleEngine {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform: Arc::new(platform),
            started: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Number of transitions started so far.
    pub fn transitions_started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    pub(super) fn schedule(&self, node: ViewNode) {
        match Handle::try_current() {
            Ok(handle) => {
                let engine = self.clone();
                handle.spawn(async move { engine.recalc(&node) });
            }
            Err(_) => self.recalc(&node),
        }
    }

    /// Apply a pending recalculation of `node`, starting a transition when
    /// a transition-bearing class changed.
    pub fn recalc(&self, node: &ViewNode) {
        let Some(changed) = node.take_style_change() else {
            return;
        };
        let Some(event) = self.platform.transition_event() else {
            return;
        };
        let duration = self
            .platform
            .stylesheet()
            .duration_for(changed.iter().map(String::as_str));
        if duration.is_zero() {
            tracing::trace!(node = %node.id(), ?changed, "Style change without transition");
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            tracing::trace!(node = %node.id(), "No runtime, transition not started");
            return;
        };

        self.started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(node = %node.id(), ?changed, ?duration, "Transition started");
        let event = TransitionEvent {
            name: event.to_string(),
            cancelled: false,
        };
        let node = node.clone();
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            // Detached nodes stop transitioning; their listeners were
            // already told when they were removed.
            if node.is_attached() {
                node.dispatch_transition(&event);
            }
        });
    }
}
