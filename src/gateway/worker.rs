use std::sync::Arc;

use tokio::sync::mpsc;

use super::pending::{deferred, Deferred, Pending};
use super::transport::{Record, Transport};

type Draft<T> = <<T as Transport>::Entity as Record>::Draft;

enum GatewayCommand<T: Transport> {
    List {
        respond_to: Deferred<Vec<T::Entity>>,
    },
    Save {
        draft: Draft<T>,
        respond_to: Deferred<T::Entity>,
    },
}

/// Client handle of a gateway. Cheap to clone; all clones feed the same
/// worker, which is the only owner of the transport.
pub struct Gateway<T: Transport> {
    sender: mpsc::UnboundedSender<GatewayCommand<T>>,
}

impl<T: Transport> Clone for Gateway<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Transport> Gateway<T> {
    /// Spawn the worker owning `transport`. Must be called from within a
    /// tokio runtime. The worker exits once every handle is dropped.
    pub fn spawn(transport: T) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = GatewayWorker {
            receiver,
            transport: Arc::new(transport),
        };
        tokio::spawn(worker.run());
        Self { sender }
    }

    /// Fetch the whole collection.
    pub fn list(&self) -> Pending<Vec<T::Entity>> {
        let (respond_to, pending) = deferred();
        self.submit(GatewayCommand::List { respond_to });
        pending
    }

    /// Store `draft` as a new entity; resolves with the stored entity,
    /// including its assigned id.
    pub fn save(&self, draft: Draft<T>) -> Pending<T::Entity> {
        let (respond_to, pending) = deferred();
        self.submit(GatewayCommand::Save { draft, respond_to });
        pending
    }

    fn submit(&self, command: GatewayCommand<T>) {
        // On failure the command (and its Deferred) is dropped, which
        // settles the caller's Pending as Abandoned.
        if self.sender.send(command).is_err() {
            tracing::warn!("Gateway worker gone, request abandoned");
        }
    }
}

struct GatewayWorker<T: Transport> {
    receiver: mpsc::UnboundedReceiver<GatewayCommand<T>>,
    transport: Arc<T>,
}

impl<T: Transport> GatewayWorker<T> {
    async fn run(mut self) {
        while let Some(command) = self.receiver.recv().await {
            match command {
                GatewayCommand::List { respond_to } => {
                    let result = self.transport.fetch_all().await;
                    if let Ok(records) = &result {
                        tracing::debug!(count = records.len(), "Gateway list resolved");
                    }
                    respond_to.settle(result);
                }
                GatewayCommand::Save { draft, respond_to } => {
                    let result = self.transport.create(draft).await;
                    if let Err(err) = &result {
                        tracing::warn!(error = %err, "Gateway save rejected");
                    }
                    respond_to.settle(result);
                }
            }
        }
        tracing::debug!("Gateway worker stopped");
    }
}
