//! Asynchronous resource gateway.
//!
//! Controllers talk to a [`Gateway`], never to the backing collection. The
//! gateway forwards each call to a single worker task that owns the
//! [`Transport`], so operations complete in the order they were issued and
//! never before the issuing call has returned.
//!
//! ```text
//! Gateway::save(draft) ──→ mpsc ──→ GatewayWorker ──→ Transport::create
//!        │                                 │
//!        └── Pending<Contact> ←── oneshot ─┘
//! ```

mod contact;
mod error;
mod memory;
mod pending;
mod transport;
mod worker;

pub use contact::{Contact, ContactDraft};
pub use error::GatewayError;
pub use memory::InMemoryTransport;
pub use pending::{deferred, Deferred, Pending};
pub use transport::{Record, Transport};
pub use worker::Gateway;

/// Gateway over the in-memory contacts collection.
pub type ContactGateway = Gateway<InMemoryTransport<Contact>>;
