use std::fmt;
use std::sync::Arc;

use crate::domain::errors::ValidationError;

/// A validated object key (path) in the storage system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey using the default naming contract
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        KeyConstraint::default().validate(value)
    }

    /// Bypass validation. Reserved for keys the crate itself makes up,
    /// such as the availability probe key.
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The key naming contract shared by every backend of a store.
///
/// The maximum length and permitted character set are backend-defined,
/// so both are injectable; the defaults match the strictest bundled
/// backend. Validation is side-effect free and runs once per key
/// resolution, before any backend is touched.
#[derive(Clone)]
pub struct KeyConstraint {
    max_len: usize,
    permitted: Arc<dyn Fn(char) -> bool + Send + Sync>,
}

impl Default for KeyConstraint {
    fn default() -> Self {
        Self {
            max_len: 1024,
            permitted: Arc::new(|c| c != '\0'),
        }
    }
}

impl KeyConstraint {
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_char_predicate(
        mut self,
        permitted: impl Fn(char) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.permitted = Arc::new(permitted);
        self
    }

    /// Validate a candidate key against this contract
    pub fn validate(&self, value: impl Into<String>) -> Result<ObjectKey, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::EmptyKey);
        }

        if value.starts_with('/') {
            return Err(ValidationError::KeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::KeyContainsDoubleSlash);
        }

        if value.len() > self.max_len {
            return Err(ValidationError::KeyTooLong {
                actual: value.len(),
                max: self.max_len,
            });
        }

        if let Some(character) = value.chars().find(|c| !(self.permitted)(*c)) {
            return Err(ValidationError::InvalidKeyCharacter { character });
        }

        Ok(ObjectKey(value))
    }
}

impl fmt::Debug for KeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyConstraint")
            .field("max_len", &self.max_len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object_key() {
        assert!(ObjectKey::new("file.txt").is_ok());
        assert!(ObjectKey::new("folder/file.txt").is_ok());
        assert!(ObjectKey::new("deep/folder/structure/file.txt").is_ok());
    }

    #[test]
    fn test_invalid_object_key() {
        assert!(ObjectKey::new("").is_err());
        assert!(ObjectKey::new("/leading-slash").is_err());
        assert!(ObjectKey::new("double//slash").is_err());
        assert!(ObjectKey::new("null\0byte").is_err());
        assert!(ObjectKey::new("x".repeat(1025)).is_err());
    }

    #[test]
    fn test_custom_max_len() {
        let constraint = KeyConstraint::default().with_max_len(8);
        assert!(constraint.validate("12345678").is_ok());
        assert_eq!(
            constraint.validate("123456789"),
            Err(ValidationError::KeyTooLong { actual: 9, max: 8 })
        );
    }

    #[test]
    fn test_custom_char_predicate() {
        let constraint = KeyConstraint::default().with_char_predicate(|c| c.is_ascii_alphanumeric());
        assert!(constraint.validate("abc123").is_ok());
        assert_eq!(
            constraint.validate("abc 123"),
            Err(ValidationError::InvalidKeyCharacter { character: ' ' })
        );
    }
}
