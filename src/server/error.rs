use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use super::response::{self, Response};

pub const ADMIN_ONLY: &str = "Admin access only";
pub const SUBSCRIBER_ONLY: &str = "Subscriber access only";
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";

/// Rejection raised by a guard. Every variant is terminal for the request.
#[derive(Error, Debug)]
pub enum GuardError {
    /// No valid credential, raised by the authentication gate.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The caller is known but its role or permissions do not fit the route.
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("Internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl GuardError {
    pub fn unauthenticated(reason: impl ToString) -> Self {
        Self::Unauthenticated(reason.to_string())
    }

    /// The human-readable reason, without the kind prefix.
    pub fn reason(&self) -> String {
        match self {
            Self::Unauthenticated(reason) => reason.clone(),
            Self::Unauthorized(reason) => String::from(*reason),
            Self::Internal(_) => String::from(response::AUTHN_ERROR),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

impl From<&GuardError> for Response {
    fn from(err: &GuardError) -> Self {
        match err {
            GuardError::Unauthenticated(reason) => Response::unauthenticated(reason),
            GuardError::Unauthorized(reason) => Response::unauthorized(reason),
            GuardError::Internal(_) => Response::error(response::AUTHN_ERROR),
        }
    }
}

impl ResponseError for GuardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        Response::from(self).into()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_status() {
        let err = GuardError::Unauthorized(ADMIN_ONLY);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.reason(), "Admin access only");
        assert_eq!(err.to_string(), "Unauthorized: Admin access only");
        assert!(err.is_unauthorized());

        let err = GuardError::unauthenticated("Invalid token");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.reason(), "Invalid token");
        assert!(err.is_unauthenticated());

        let err = GuardError::from(anyhow!("lookup failed"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
