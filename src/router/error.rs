use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route pattern '{pattern}' registered twice")]
    DuplicatePattern { pattern: String },

    #[error("Default route '{path}' matches no registered pattern")]
    UnknownDefault { path: String },
}

impl RouteError {
    pub(super) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
