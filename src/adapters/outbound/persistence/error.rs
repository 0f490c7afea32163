use crate::domain::errors::{Backend, ControllerError};

/// Convert driver errors to domain errors. Every driver failure is an
/// upstream failure; absent rows are modelled with `Option`, not errors.
impl From<sqlx::Error> for ControllerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { index, source } => ControllerError::Internal {
                message: format!("Failed to decode column {}: {}", index, source),
            },
            sqlx::Error::ColumnNotFound(column) => ControllerError::Internal {
                message: format!("Column missing from result set: {}", column),
            },
            other => ControllerError::Upstream {
                backend: Backend::Database,
                message: other.to_string(),
            },
        }
    }
}
