/// Validation errors for domain value objects and request arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // BlobKey validation errors
    EmptyBlobKey,
    BlobKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidBlobKeyCharacter(char),
    BlobKeyStartsWithSlash,
    BlobKeyContainsDoubleSlash,

    // Flag and enum validation errors
    InvalidVisibility(String),
    InvalidAssetType(String),
    InvalidStatus(i64),

    // Pagination errors
    InvalidPageIndex(String),
    InvalidPageSize {
        value: String,
        max: u32,
    },

    // Query DSL errors
    ColumnNotAllowed {
        table: &'static str,
        column: &'static str,
    },

    InvalidField {
        field: String,
        value: String,
        expected: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyBlobKey => write!(f, "Blob key cannot be empty"),
            ValidationError::BlobKeyTooLong { actual, max } => {
                write!(f, "Blob key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidBlobKeyCharacter(c) => {
                write!(f, "Invalid character in blob key: {:?}", c)
            }
            ValidationError::BlobKeyStartsWithSlash => {
                write!(f, "Blob key cannot start with '/'")
            }
            ValidationError::BlobKeyContainsDoubleSlash => {
                write!(f, "Blob key cannot contain '//'")
            }

            ValidationError::InvalidVisibility(value) => {
                write!(f, "Invalid visibility '{}' (expected 0 or 1)", value)
            }
            ValidationError::InvalidAssetType(value) => {
                write!(f, "Invalid asset type '{}' (expected 0, 1 or 2)", value)
            }
            ValidationError::InvalidStatus(value) => {
                write!(f, "Invalid row status {}", value)
            }

            ValidationError::InvalidPageIndex(value) => {
                write!(f, "Invalid page index '{}' (must be an integer >= 1)", value)
            }
            ValidationError::InvalidPageSize { value, max } => {
                write!(f, "Invalid page size '{}' (must be between 1 and {})", value, max)
            }

            ValidationError::ColumnNotAllowed { table, column } => {
                write!(f, "Column '{}' is not queryable on table '{}'", column, table)
            }

            ValidationError::InvalidField {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected: {})",
                    field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
