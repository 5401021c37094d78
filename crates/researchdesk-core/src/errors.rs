//! HTTP-facing application error.
//!
//! The navigation permission API fails with one of four statuses:
//!
//! | Status | Constructor | Cause |
//! |--------|-------------|-------|
//! | 400 | [`AppError::bad_request`] | body is not the expected JSON |
//! | 422 | [`AppError::unprocessable`] | record rules or a repeated pair |
//! | 503 | [`AppError::store_unavailable`] | the durable store failed the call |
//! | 500 | [`AppError::internal`] | anything else, including `?` on foreign errors |
//!
//! The body is always `{"error": "<message>"}`.

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    fn with_status(status: StatusCode, err: impl Into<Error>) -> Self {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn bad_request(err: impl Into<Error>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable(err: impl Into<Error>) -> Self {
        Self::with_status(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn store_unavailable(err: impl Into<Error>) -> Self {
        Self::with_status(StatusCode::SERVICE_UNAVAILABLE, err)
    }

    pub fn internal(err: impl Into<Error>) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// Message sent to the client.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store outages are already logged where they happen.
        if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = ?self.error, "Unhandled error in request");
        }

        let body = Json(json!({ "error": self.message() }));
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_constructors_pick_their_status() {
        let cases = [
            (AppError::bad_request(anyhow!("x")), StatusCode::BAD_REQUEST),
            (AppError::unprocessable(anyhow!("x")), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::store_unavailable(anyhow!("x")), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::internal(anyhow!("x")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status, status);
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_question_mark_on_foreign_error_is_internal() {
        fn read() -> Result<(), AppError> {
            let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
            io?;
            Ok(())
        }
        let err = read().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "disk");
    }

    #[test]
    fn test_display_carries_status_code() {
        let err = AppError::store_unavailable(anyhow!("connection refused"));
        assert_eq!(err.to_string(), "503 connection refused");
    }
}
