//! Single-page application shell.
//!
//! Routes map to pages (an optional controller plus a view); views are
//! swapped inside an in-memory [`dom::Document`] with enter/exit class
//! transitions. Controllers keep per-row UI state in a
//! [`view_state::ViewStateMap`], fetch data through an asynchronous
//! [`gateway::Gateway`] and notify each other over a typed [`bus::EventBus`].

pub mod animator;
pub mod app;
pub mod bus;
pub mod config;
pub mod dom;
pub mod error;
pub mod gateway;
pub mod lifecycle;
pub mod logging;
pub mod mvi;
pub mod pages;
pub mod router;
pub mod view_state;

pub use app::App;
pub use error::ShellError;
