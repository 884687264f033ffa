//! Route table and dispatcher.
//!
//! A location is matched against the registered patterns (most specific
//! first), the page's controller is built, its view inserted into the
//! mount point and handed to the animator. Leaving a route tears its
//! controller down and ends its [`Lifetime`](crate::lifecycle::Lifetime).

mod dispatcher;
mod error;
mod page;
mod pattern;

pub use dispatcher::{AppContext, Dispatcher, NavigationOutcome};
pub use error::RouteError;
pub use page::{Controller, Page, Route, RouteContext};
pub use pattern::{normalize_path, RouteParams, RoutePattern};
