use thiserror::Error;

use crate::config::ConfigError;
use crate::gateway::GatewayError;
use crate::router::RouteError;

/// Errors surfaced by [`App`](crate::app::App).
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Page at '{route}' has no controller")]
    PageUnavailable { route: String },
}
