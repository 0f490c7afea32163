use uuid::Uuid;

use crate::domain::errors::ValidationError;

const MAX_KEY_LEN: usize = 1024;

/// A validated relative key in the blob store, e.g. `sprites/3f2c...a1.png`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    /// Create a new BlobKey with validation
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::EmptyBlobKey);
        }

        if value.len() > MAX_KEY_LEN {
            return Err(ValidationError::BlobKeyTooLong {
                actual: value.len(),
                max: MAX_KEY_LEN,
            });
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidBlobKeyCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::BlobKeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::BlobKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Build a fresh `<prefix>/<random>.<ext>` key.
    ///
    /// The extension is taken from `filename`; a filename without one yields
    /// a key without a dot. The token is a v4 UUID (122 random bits).
    pub fn generate(prefix: &str, filename: &str) -> Result<Self, ValidationError> {
        let token = Uuid::new_v4().simple().to_string();
        let prefix = prefix.trim_matches('/');

        let mut key = String::with_capacity(prefix.len() + token.len() + 8);
        if !prefix.is_empty() {
            key.push_str(prefix);
            key.push('/');
        }
        key.push_str(&token);
        if let Some(ext) = extension_of(filename) {
            key.push('.');
            key.push_str(&ext);
        }

        Self::new(key)
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Get the file name part of the key (everything after the last '/')
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Extension of the key's file name, if any
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.')
            .filter(|idx| *idx > 0 && *idx + 1 < name.len())
            .map(|idx| &name[idx + 1..])
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let name = filename.rsplit(&['/', '\\'][..]).next().unwrap_or(filename);
    let idx = name.rfind('.')?;
    let ext = &name[idx + 1..];
    if idx == 0 || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl std::fmt::Display for BlobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BlobKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_blob_key() {
        assert!(BlobKey::new("a.zip").is_ok());
        assert!(BlobKey::new("projects/a.zip").is_ok());
    }

    #[test]
    fn test_invalid_blob_key() {
        assert_eq!(BlobKey::new(""), Err(ValidationError::EmptyBlobKey));
        assert!(BlobKey::new("/leading-slash").is_err());
        assert!(BlobKey::new("double//slash").is_err());
        assert!(BlobKey::new("null\0byte").is_err());
        assert!(BlobKey::new("x".repeat(1025)).is_err());
    }

    #[test]
    fn test_generate_uses_prefix_and_extension() {
        let key = BlobKey::generate("projects/", "My Game.ZIP").unwrap();
        assert!(key.as_str().starts_with("projects/"));
        assert_eq!(key.extension(), Some("zip"));
        assert_eq!(key.file_name().len(), 32 + ".zip".len());
    }

    #[test]
    fn test_generate_without_extension() {
        let key = BlobKey::generate("sounds", "README").unwrap();
        assert!(!key.file_name().contains('.'));
        assert_eq!(key.extension(), None);

        let hidden = BlobKey::generate("sounds", ".env").unwrap();
        assert_eq!(hidden.extension(), None);
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let a = BlobKey::generate("sprites", "a.png").unwrap();
        let b = BlobKey::generate("sprites", "a.png").unwrap();
        assert_ne!(a, b);
    }
}
