//! Teardown signalling for controller activations.
//!
//! Every route activation owns a [`Lifetime`]. When the dispatcher leaves the
//! route it ends the lifetime; pending gateway calls and transitions holding a
//! [`LifetimeHandle`] observe that and stop instead of touching a detached view.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

pub struct Lifetime {
    ended: Arc<AtomicBool>,
    notify: Arc<Notify>,
    generation: u64,
}

impl Lifetime {
    pub fn new() -> Self {
        Self {
            ended: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// End the lifetime. Only the first call wakes waiters.
    pub fn end(&self) {
        if !self.ended.swap(true, Ordering::SeqCst) {
            tracing::debug!(generation = self.generation, "Activation torn down");
            self.notify.notify_waiters();
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handle(&self) -> LifetimeHandle {
        LifetimeHandle {
            ended: Arc::clone(&self.ended),
            notify: Arc::clone(&self.notify),
            generation: self.generation,
        }
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.end();
    }
}

/// Cloneable, read-only view of a [`Lifetime`].
#[derive(Clone)]
pub struct LifetimeHandle {
    ended: Arc<AtomicBool>,
    notify: Arc<Notify>,
    generation: u64,
}

impl LifetimeHandle {
    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn wait(&self) {
        // Register interest before checking the flag, otherwise an `end()`
        // between the check and the await would be lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_ended() {
            return;
        }
        notified.await;
    }
}

impl std::fmt::Debug for LifetimeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifetimeHandle")
            .field("generation", &self.generation)
            .field("ended", &self.is_ended())
            .finish()
    }
}

/// Redraw requests raised by controllers when their async data arrives.
///
/// Requests coalesce: any number of `request()` calls between two
/// `take()` calls produce a single redraw.
#[derive(Clone, Default)]
pub struct RedrawSignal {
    requested: Arc<AtomicBool>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Consume a pending request, returning whether there was one.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for RedrawSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedrawSignal")
            .field("requested", &self.is_requested())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn end_is_idempotent() {
        let lifetime = Lifetime::new();
        let handle = lifetime.handle();
        assert!(!handle.is_ended());
        lifetime.end();
        lifetime.end();
        assert!(handle.is_ended());
    }

    #[test]
    fn generations_are_unique() {
        let a = Lifetime::new();
        let b = Lifetime::new();
        assert_ne!(a.generation(), b.generation());
        assert_eq!(a.handle().generation(), a.generation());
    }

    #[test]
    fn drop_ends_lifetime() {
        let handle = {
            let lifetime = Lifetime::new();
            lifetime.handle()
        };
        assert!(handle.is_ended());
    }

    #[tokio::test]
    async fn wait_returns_after_end() {
        let lifetime = Lifetime::new();
        let handle = lifetime.handle();
        let waiter = tokio::spawn(async move { handle.wait().await });
        tokio::task::yield_now().await;
        lifetime.end();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_on_ended_lifetime_is_immediate() {
        let lifetime = Lifetime::new();
        lifetime.end();
        tokio::time::timeout(Duration::from_millis(100), lifetime.handle().wait())
            .await
            .expect("already ended");
    }

    #[test]
    fn redraw_requests_coalesce() {
        let signal = RedrawSignal::new();
        signal.request();
        signal.request();
        assert!(signal.take());
        assert!(!signal.take());
    }
}
