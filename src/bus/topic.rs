use serde::Serialize;

use crate::gateway::Contact;
use crate::router::RouteParams;

/// A notification channel with a fixed payload type.
pub trait Topic: 'static {
    type Payload: 'static;

    /// Stable name used in logs.
    const NAME: &'static str;
}

/// A contact was created or edited.
pub struct ContactUpdated;

impl Topic for ContactUpdated {
    type Payload = Contact;
    const NAME: &'static str = "UPDATE_CONTACT";
}

/// The dispatcher activated a route.
pub struct RouteChanged;

impl Topic for RouteChanged {
    type Payload = RouteChange;
    const NAME: &'static str = "ROUTE_CHANGED";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteChange {
    pub path: String,
    pub pattern: String,
    pub name: String,
    pub params: RouteParams,
    /// True when the requested path did not match and the default route
    /// was activated instead.
    pub fell_back: bool,
}
