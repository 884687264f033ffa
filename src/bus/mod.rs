//! Typed publish/subscribe bus for cross-component notification.
//!
//! ```text
//! ┌──────────────┐  trigger::<ContactUpdated>(&contact)  ┌───────────────┐
//! │  Controller  │ ─────────────────────────────────────→│   EventBus    │
//! └──────────────┘                                        └───────┬───────┘
//!                                         synchronous fan-out,    │
//!                                         registration order      ▼
//!                                                  handler(&contact) ...
//! ```
//!
//! Topics are types, each naming its payload type, so publishing the wrong
//! payload for a topic does not compile.

mod registry;
mod topic;

pub use registry::{EventBus, SubscriptionId};
pub use topic::{ContactUpdated, RouteChange, RouteChanged, Topic};
