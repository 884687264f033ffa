use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::error::GatewayError;
use super::transport::{Record, Transport};

/// In-memory stand-in for a backend.
///
/// Every operation first waits on a timer (zero by default) to model
/// network latency. `create` assigns `id = len + 1` and appends under one
/// lock, so ids stay unique even if two creates overlap.
pub struct InMemoryTransport<E> {
    records: Arc<Mutex<Vec<E>>>,
    latency: Duration,
}

impl<E: Record> InMemoryTransport<E> {
    pub fn new(seed: Vec<E>) -> Self {
        Self {
            records: Arc::new(Mutex::new(seed)),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl<E: Record> Transport for InMemoryTransport<E> {
    type Entity = E;

    async fn fetch_all(&self) -> Result<Vec<E>, GatewayError> {
        tokio::time::sleep(self.latency).await;
        Ok(self.records.lock().clone())
    }

    async fn create(&self, draft: E::Draft) -> Result<E, GatewayError> {
        tokio::time::sleep(self.latency).await;
        let mut records = self.records.lock();
        let id = records.len() as u64 + 1;
        let record = E::from_draft(id, draft);
        records.push(record.clone());
        tracing::debug!(id, total = records.len(), "Record created");
        Ok(record)
    }
}
