use std::fmt;

use super::ValidationError;

/// External system an upstream failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Database,
    BlobStore,
    Formatter,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Database => write!(f, "database"),
            Backend::BlobStore => write!(f, "blob store"),
            Backend::Formatter => write!(f, "formatter"),
        }
    }
}

/// Stable tag for each error class, used by whatever transport sits on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    BadInput,
    Conflict,
    Canceled,
    Upstream,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::BadInput => "bad_input",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Canceled => "canceled",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Errors surfaced by every controller operation
#[derive(Debug, Clone, thiserror::Error)]
pub enum ControllerError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("user '{user_id}' is not the author of {entity} {id}")]
    Forbidden {
        entity: &'static str,
        id: String,
        user_id: String,
    },

    #[error("Bad input: {message}")]
    BadInput { message: String },

    #[error("Version conflict on {entity} {id}: expected version {expected}")]
    Conflict {
        entity: &'static str,
        id: String,
        expected: i64,
    },

    #[error("Operation canceled")]
    Canceled,

    #[error("Upstream {backend} error: {message}")]
    Upstream { backend: Backend, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ControllerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ControllerError::NotFound { .. } => ErrorKind::NotFound,
            ControllerError::Forbidden { .. } => ErrorKind::Forbidden,
            ControllerError::BadInput { .. } => ErrorKind::BadInput,
            ControllerError::Conflict { .. } => ErrorKind::Conflict,
            ControllerError::Canceled => ErrorKind::Canceled,
            ControllerError::Upstream { .. } => ErrorKind::Upstream,
            ControllerError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Upstream failures are the only ones worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, ControllerError::Upstream { .. })
    }

    pub fn bad_input(message: impl Into<String>) -> Self {
        ControllerError::BadInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ControllerError::Internal {
            message: message.into(),
        }
    }

    pub fn upstream(backend: Backend, message: impl Into<String>) -> Self {
        ControllerError::Upstream {
            backend,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ControllerError {
    fn from(err: ValidationError) -> Self {
        ControllerError::BadInput {
            message: err.to_string(),
        }
    }
}

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_bad_input() {
        let err: ControllerError = ValidationError::InvalidVisibility("7".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::BadInput);
        assert!(err.to_string().contains("'7'"));
    }

    #[test]
    fn test_only_upstream_is_retryable() {
        assert!(ControllerError::upstream(Backend::Database, "down").is_retryable());
        assert!(!ControllerError::Canceled.is_retryable());
        assert_eq!(ErrorKind::Forbidden.as_str(), "forbidden");
    }
}
