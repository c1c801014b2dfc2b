//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Fallible route handlers return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use thiserror::Error;

use crate::routes::notice::Notice;
use crate::services::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart slot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::Storage(e) => Self::Storage(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage(_) => "Internal server error".to_string(),
            Self::EmptyCart | Self::NotFound(_) => self.to_string(),
        };

        if matches!(self, Self::EmptyCart) {
            let notice = Notice::empty_cart_checkout();
            return (
                status,
                AppendHeaders([("HX-Trigger", notice.trigger_header())]),
                message,
            )
                .into_response();
        }

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        assert_eq!(AppError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::EmptyCart),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Storage(StorageError::Poisoned)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_cart_carries_notice() {
        let response = AppError::EmptyCart.into_response();
        let trigger = response.headers().get("HX-Trigger").unwrap();
        assert!(trigger.to_str().unwrap().contains("\"notice\""));
    }

    #[test]
    fn test_checkout_error_conversion() {
        assert!(matches!(
            AppError::from(CheckoutError::EmptyCart),
            AppError::EmptyCart
        ));
    }
}
