//! Shared error type across tally crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Empty or otherwise unusable key.
    InvalidKey,
    /// Bounded store is full.
    CapacityExceeded,
    /// Stored value has a different kind than the caller expected.
    TypeMismatch,
    /// Integer arithmetic left the representable range.
    Overflow,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidKey => "INVALID_KEY",
            ClientCode::CapacityExceeded => "CAPACITY_EXCEEDED",
            ClientCode::TypeMismatch => "TYPE_MISMATCH",
            ClientCode::Overflow => "OVERFLOW",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status the transport layer reports for this code.
    ///
    /// Kept as a bare `u16` so this crate stays free of HTTP dependencies.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::BadRequest | ClientCode::InvalidKey | ClientCode::UnsupportedVersion => 400,
            ClientCode::CapacityExceeded => 507,
            ClientCode::TypeMismatch | ClientCode::Overflow | ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by the store core and the server.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("store capacity exceeded ({capacity} entries)")]
    CapacityExceeded { capacity: usize },
    #[error("type mismatch for key {key:?}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("overflow: {0}")]
    Overflow(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::BadRequest(_) => ClientCode::BadRequest,
            TallyError::InvalidKey(_) => ClientCode::InvalidKey,
            TallyError::CapacityExceeded { .. } => ClientCode::CapacityExceeded,
            TallyError::TypeMismatch { .. } => ClientCode::TypeMismatch,
            TallyError::Overflow(_) => ClientCode::Overflow,
            TallyError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_maps_to_insufficient_storage() {
        let err = TallyError::CapacityExceeded { capacity: 2 };
        assert_eq!(err.client_code(), ClientCode::CapacityExceeded);
        assert_eq!(err.client_code().http_status(), 507);
        assert_eq!(err.to_string(), "store capacity exceeded (2 entries)");
    }

    #[test]
    fn key_errors_are_client_errors() {
        let err = TallyError::InvalidKey("key must not be empty".into());
        assert_eq!(err.client_code().as_str(), "INVALID_KEY");
        assert_eq!(err.client_code().http_status(), 400);
    }
}
