//! Marker trait for intents.

/// Something that happened to a state machine: a transition being started,
/// a scheduling tick, a platform completion event, a teardown.
pub trait Intent: Send + 'static {}
