//! Model-View-Intent primitives shared by the shell's state machines.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ side effects (class toggles, listeners)
//!    ↑                                  │
//!    └──────────────────────────────────┘
//! ```
//!
//! Reducers stay pure: the animator performs DOM work around each dispatch
//! and feeds the outcome back in as the next intent.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
