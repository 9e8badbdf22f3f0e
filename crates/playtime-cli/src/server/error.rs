// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Handler errors and their HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use playtime::{PlaytimeError, StoreError};
use thiserror::Error;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reconciliation, rendering or catalog failure.
    #[error(transparent)]
    Playtime(#[from] PlaytimeError),

    /// Settings store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The submission did not carry the session's token.
    #[error("Invalid or missing CSRF token")]
    Csrf,

    /// Unreadable request body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matches the path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Status code sent for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Playtime(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Playtime(PlaytimeError::Parse { .. })
            | AppError::Playtime(PlaytimeError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Playtime(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Csrf => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Marker left in the response extensions of a failed request.
///
/// The error page middleware replaces such responses with the rendered
/// `error` template.
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    /// Status of the failed response.
    pub status: StatusCode,
    /// Error message shown on the error page.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let failure = HandlerFailure {
            status: self.status(),
            message: self.to_string(),
        };

        let mut response = (failure.status, failure.message.clone()).into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::from(PlaytimeError::PlatformNotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(PlaytimeError::TemplateNotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(PlaytimeError::parse("volume", "x", "bad")),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(PlaytimeError::InvalidInput("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(PlaytimeError::Asset("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(StoreError::Storage("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Csrf, StatusCode::FORBIDDEN),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("/x".into()), StatusCode::NOT_FOUND),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status, "{}", error);
        }
    }

    #[test]
    fn test_response_carries_failure() {
        let response = AppError::Csrf.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let failure = response.extensions().get::<HandlerFailure>().unwrap();
        assert_eq!(failure.status, StatusCode::FORBIDDEN);
        assert_eq!(failure.message, "Invalid or missing CSRF token");
    }
}
