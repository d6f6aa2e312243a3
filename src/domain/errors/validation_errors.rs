use thiserror::Error;

/// Key validation errors, raised before any backend I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("object key cannot be empty")]
    EmptyKey,

    #[error("object key cannot start with '/'")]
    KeyStartsWithSlash,

    #[error("object key cannot contain '//'")]
    KeyContainsDoubleSlash,

    #[error("object key too long: {actual} bytes (max: {max})")]
    KeyTooLong { actual: usize, max: usize },

    #[error("invalid character in object key: {character:?}")]
    InvalidKeyCharacter { character: char },
}
