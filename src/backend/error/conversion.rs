/**
 * Error Conversion
 *
 * `IntoResponse` implementations for backend errors, so handlers can return
 * them directly.
 *
 * # Response Format
 *
 * Auth errors answer with `{"message": ...}`. Token rejections additionally
 * carry `"valid": false`:
 * ```json
 * { "valid": false, "message": "Invalid or expired token" }
 * ```
 *
 * Other backend errors answer with:
 * ```json
 * { "message": "Item not found", "status": 404 }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::backend::error::types::{AuthError, BackendError};

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Auth request failed: {}", self);
        }

        let body = if self.is_token_rejection() {
            json!({ "valid": false, "message": self.message() })
        } else {
            json!({ "message": self.message() })
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = json!({
            "message": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::TokenError;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_token_rejection_body() {
        let response = AuthError::Token(TokenError::Expired).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "valid": false, "message": "Invalid or expired token" })
        );
    }

    #[tokio::test]
    async fn test_no_credential_body() {
        let response = AuthError::NoCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "message": "No token provided" }));
    }

    #[tokio::test]
    async fn test_backend_error_body() {
        let response = BackendError::not_found("item", "42").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Item not found", "status": 404 })
        );
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let response = BackendError::validation("name", "Item name is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Item name is required", "status": 400 })
        );
    }
}
