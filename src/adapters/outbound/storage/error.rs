use crate::domain::errors::{Backend, ControllerError};

/// Convert object_store errors to domain errors
impl From<object_store::Error> for ControllerError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => ControllerError::NotFound {
                entity: "blob",
                id: path,
            },
            object_store::Error::NotSupported { .. } | object_store::Error::NotImplemented => {
                ControllerError::Internal {
                    message: format!("Blob store operation not supported: {}", err),
                }
            }
            _ => ControllerError::Upstream {
                backend: Backend::BlobStore,
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;

    #[test]
    fn test_missing_object_maps_to_not_found() {
        let err: ControllerError = object_store::Error::NotFound {
            path: "sprites/a.png".to_string(),
            source: "gone".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_generic_failure_is_upstream() {
        let err: ControllerError = object_store::Error::Generic {
            store: "S3",
            source: "connection reset".into(),
        }
        .into();
        assert!(matches!(
            err,
            ControllerError::Upstream {
                backend: Backend::BlobStore,
                ..
            }
        ));
    }
}
