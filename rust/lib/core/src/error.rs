use axum::http::StatusCode;
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Logs and tests match on these,
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const INVALID_IDENTIFIER: &str = "INVALID_IDENTIFIER";
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const STORE_OPERATION_FAILED: &str = "STORE_OPERATION_FAILED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type.
///
/// The first four variants are expected at the route boundary and are
/// turned into a message on the next rendered page. `NotFound` and
/// `Internal` reach the transport as a rendered error page carrying
/// [`ServiceError::status_code`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The document store could not be reached at startup. HTTP 503.
    #[error("{0}")]
    StoreUnavailable(String),

    /// A malformed identifier string was supplied. HTTP 400.
    #[error("{0}")]
    InvalidIdentifier(String),

    /// A required form field was blank or absent. HTTP 400.
    #[error("{0}")]
    MissingField(String),

    /// A mutating store call failed. HTTP 500.
    #[error("{0}")]
    StoreOperationFailed(String),

    /// No such route or resource. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::StoreUnavailable(_) => error_code::STORE_UNAVAILABLE,
            ServiceError::InvalidIdentifier(_) => error_code::INVALID_IDENTIFIER,
            ServiceError::MissingField(_) => error_code::MISSING_FIELD,
            ServiceError::StoreOperationFailed(_) => error_code::STORE_OPERATION_FAILED,
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ServiceError::MissingField(_) => StatusCode::BAD_REQUEST,
            ServiceError::StoreOperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is caught at the route boundary and shown inline.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ServiceError::StoreUnavailable(_)
                | ServiceError::InvalidIdentifier(_)
                | ServiceError::MissingField(_)
                | ServiceError::StoreOperationFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            ServiceError::StoreUnavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ServiceError::InvalidIdentifier("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::MissingField("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::StoreOperationFailed("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(ServiceError::StoreUnavailable("x".into()).error_code(), "STORE_UNAVAILABLE");
        assert_eq!(ServiceError::InvalidIdentifier("x".into()).error_code(), "INVALID_IDENTIFIER");
        assert_eq!(ServiceError::MissingField("x".into()).error_code(), "MISSING_FIELD");
        assert_eq!(
            ServiceError::StoreOperationFailed("x".into()).error_code(),
            "STORE_OPERATION_FAILED"
        );
        assert_eq!(ServiceError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(ServiceError::Internal("x".into()).error_code(), "INTERNAL");
    }

    #[test]
    fn user_facing_kinds() {
        assert!(ServiceError::StoreUnavailable("x".into()).is_user_facing());
        assert!(ServiceError::InvalidIdentifier("x".into()).is_user_facing());
        assert!(ServiceError::MissingField("x".into()).is_user_facing());
        assert!(ServiceError::StoreOperationFailed("x".into()).is_user_facing());
        assert!(!ServiceError::NotFound("x".into()).is_user_facing());
        assert!(!ServiceError::Internal("x".into()).is_user_facing());
    }

    #[test]
    fn error_display_is_just_message() {
        assert_eq!(ServiceError::MissingField("name".into()).to_string(), "name");
        assert_eq!(ServiceError::InvalidIdentifier("bad id".into()).to_string(), "bad id");
    }
}
