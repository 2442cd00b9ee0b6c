use thiserror::Error;

/// Failure kinds surfaced by the handlers.
///
/// `Validation` and `NotFound` are client-facing outcomes and are translated
/// into 4xx responses locally. The remaining variants wrap failures reported
/// by an external collaborator or by the triggering event itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Missing or unusable request input.
    #[error("{0}")]
    Validation(String),

    /// Lookup miss.
    #[error("{0}")]
    NotFound(String),

    /// Key-value store failure (connectivity, permission, malformed data).
    #[error("store error: {0}")]
    Store(String),

    /// Notification topic failure.
    #[error("publish error: {0}")]
    Publish(String),

    /// Request body or trigger payload that cannot be decoded.
    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

impl HandlerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store(_) | Self::Publish(_) | Self::MalformedEvent(_) => 500,
        }
    }

    /// Description without the kind prefix, used as the `details` field of
    /// internal error bodies.
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Store(message)
            | Self::Publish(message)
            | Self::MalformedEvent(message) => message,
        }
    }
}
