use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::error::GatewayError;
use crate::lifecycle::LifetimeHandle;

/// Create a linked settle/observe pair.
pub fn deferred<T>() -> (Deferred<T>, Pending<T>) {
    let (sender, receiver) = oneshot::channel();
    (Deferred { sender }, Pending { receiver })
}

/// Settling side of a [`Pending`].
///
/// Settlement consumes the `Deferred`, so a value can be delivered at most
/// once. Dropping it unsettled rejects the `Pending` with
/// [`GatewayError::Abandoned`].
pub struct Deferred<T> {
    sender: oneshot::Sender<Result<T, GatewayError>>,
}

impl<T> Deferred<T> {
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: GatewayError) {
        self.settle(Err(error));
    }

    pub fn settle(self, result: Result<T, GatewayError>) {
        if self.sender.send(result).is_err() {
            tracing::trace!("Gateway result dropped (receiver gone)");
        }
    }

    /// True once the observing `Pending` has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Eventual result of a gateway call.
///
/// Awaiting yields the settled result; awaiting after settlement completes
/// on the next poll.
#[must_use = "a Pending does nothing unless awaited or chained with `then`"]
pub struct Pending<T> {
    receiver: oneshot::Receiver<Result<T, GatewayError>>,
}

impl<T> Future for Pending<T> {
    type Output = Result<T, GatewayError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(GatewayError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T: Send + 'static> Pending<T> {
    /// Wait for the result unless `lifetime` ends first, in which case the
    /// result is discarded and `Cancelled` is returned.
    pub async fn guarded(self, lifetime: &LifetimeHandle) -> Result<T, GatewayError> {
        if lifetime.is_ended() {
            return Err(GatewayError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = lifetime.wait() => {
                tracing::debug!(generation = lifetime.generation(), "Gateway wait cancelled");
                Err(GatewayError::Cancelled)
            }
            result = self => result,
        }
    }

    /// Run `continuation` with the result on a spawned task.
    pub fn then<F>(self, continuation: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<T, GatewayError>) + Send + 'static,
    {
        tokio::spawn(async move { continuation(self.await) })
    }
}
