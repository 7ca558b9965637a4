/// Unified error types for the PDS locator service
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pipeline step at which a resolution failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// Handle -> DID discovery (DNS TXT / well-known)
    Discovery,
    /// DID -> DID document fetch
    Document,
    /// Service endpoint extraction from the document
    Endpoint,
    /// Handle -> DID confirmation against the discovered PDS
    Verification,
}

impl fmt::Display for ResolveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolveStep::Discovery => "handle discovery",
            ResolveStep::Document => "DID document resolution",
            ResolveStep::Endpoint => "service endpoint extraction",
            ResolveStep::Verification => "PDS verification",
        };
        write!(f, "{}", name)
    }
}

/// Failure taxonomy for a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveErrorKind {
    /// No DID, document, or endpoint could be discovered
    NotFound,
    /// A response was present but structurally invalid
    Malformed,
    /// Network or timeout failure
    Unreachable,
    /// Verification DID disagrees with the discovery DID
    Mismatch,
}

impl fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolveErrorKind::NotFound => "NotFound",
            ResolveErrorKind::Malformed => "Malformed",
            ResolveErrorKind::Unreachable => "Unreachable",
            ResolveErrorKind::Mismatch => "Mismatch",
        };
        write!(f, "{}", name)
    }
}

/// Step-local failure produced by a pipeline component.
///
/// Components report only the kind and a reason; the orchestrator attaches
/// the handle and the step via [`StepError::at`].
#[derive(Debug, Clone, Error)]
#[error("{kind}: {reason}")]
pub struct StepError {
    pub kind: ResolveErrorKind,
    pub reason: String,
}

impl StepError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::NotFound,
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::Malformed,
            reason: reason.into(),
        }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            kind: ResolveErrorKind::Unreachable,
            reason: reason.into(),
        }
    }

    /// Attach handle and step context, producing a terminal resolution error
    pub fn at(self, handle: &str, step: ResolveStep) -> ResolutionError {
        ResolutionError {
            handle: handle.to_string(),
            step,
            kind: self.kind,
            reason: self.reason,
        }
    }
}

/// Terminal failure of one resolution, carrying the handle and the step at
/// which it occurred. The reason never includes document contents.
#[derive(Debug, Clone, Error)]
#[error("{kind} during {step} for {handle}: {reason}")]
pub struct ResolutionError {
    pub handle: String,
    pub step: ResolveStep,
    pub kind: ResolveErrorKind,
    pub reason: String,
}

impl ResolutionError {
    /// Discovery DID and verification DID disagree
    pub fn mismatch(handle: &str, discovered: &str, verified: &str) -> Self {
        Self {
            handle: handle.to_string(),
            step: ResolveStep::Verification,
            kind: ResolveErrorKind::Mismatch,
            reason: format!(
                "PDS asserted {} but discovery produced {}",
                verified, discovered
            ),
        }
    }
}

/// Main error type for the locator service
#[derive(Error, Debug)]
pub enum LocatorError {
    /// Resolution pipeline failures
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert LocatorError to HTTP response
impl IntoResponse for LocatorError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            LocatorError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidRequest".to_string(),
                self.to_string(),
            ),
            LocatorError::Resolution(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.kind.to_string(),
                self.to_string(),
            ),
            LocatorError::Internal(_) | LocatorError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError".to_string(),
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code,
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for locator operations
pub type LocatorResult<T> = Result<T, LocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_context() {
        let err = StepError::not_found("no TXT record").at("alice.test", ResolveStep::Discovery);
        assert_eq!(err.kind, ResolveErrorKind::NotFound);
        assert_eq!(err.step, ResolveStep::Discovery);
        assert_eq!(err.handle, "alice.test");
        assert_eq!(
            err.to_string(),
            "NotFound during handle discovery for alice.test: no TXT record"
        );
    }

    #[test]
    fn test_mismatch_error() {
        let err = ResolutionError::mismatch("alice.test", "did:plc:aaa", "did:plc:bbb");
        assert_eq!(err.kind, ResolveErrorKind::Mismatch);
        assert_eq!(err.step, ResolveStep::Verification);
        assert!(err.to_string().contains("did:plc:aaa"));
        assert!(err.to_string().contains("did:plc:bbb"));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response =
            LocatorError::Validation("Handle parameter is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_resolution_maps_to_500() {
        let err = StepError::unreachable("connect refused").at("bob.test", ResolveStep::Document);
        let response = LocatorError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
