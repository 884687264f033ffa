//! In-memory document the shell renders into.
//!
//! This stands in for the browser: a root element with attributes, a mount
//! point holding view nodes, and a style engine that recalculates styles on
//! the next scheduling tick and fires transition-end events after the
//! stylesheet's duration.

mod document;
mod node;
mod platform;
mod style;

pub use document::{Document, DocumentSnapshot, Mount, PAGE_NAME_ATTRIBUTE};
pub use node::{ListenerId, NodeId, NodeSnapshot, TransitionEvent, ViewNode};
pub use platform::{Platform, Stylesheet};
pub use style::StyleEngine;
