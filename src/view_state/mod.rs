//! Ephemeral, per-key view state that lives beside the domain model.
//!
//! A list view asks for the state of row `key` on every render; the first
//! request builds it, later requests get the very same instance back, so a
//! toggle flipped in one render is still flipped in the next.

mod prop;
mod store;

pub use prop::Prop;
pub use store::{ViewShape, ViewStateMap};
