use thiserror::Error;

/// Ways a gateway call can fail to produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The transport refused the operation.
    #[error("Request rejected: {reason}")]
    Rejected { reason: String },

    /// The operation was dropped before it settled (worker gone, transport
    /// task aborted).
    #[error("Request abandoned before it settled")]
    Abandoned,

    /// The controller waiting on the result was torn down.
    #[error("Request cancelled by teardown")]
    Cancelled,
}

impl GatewayError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        GatewayError::Rejected {
            reason: reason.into(),
        }
    }
}
