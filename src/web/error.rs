//! Web Error Types
//!
//! Defines error types for the web layer and implements conversion
//! to HTML error pages with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views::ViewError;

/// Web error types
#[derive(Error, Debug)]
pub enum WebError {
    /// Data file could not be read or written
    #[error("Storage error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// Stored data cannot be presented
    #[error("View error: {0}")]
    View(#[from] ViewError),

    /// Session handling failed
    #[error("Authentication error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    /// Page rendering failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            WebError::View(ViewError::InvalidCoordinate { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            WebError::View(_) => (StatusCode::INTERNAL_SERVER_ERROR, "VIEW_ERROR"),
            WebError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            WebError::Auth(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ERROR"),
            WebError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
            WebError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            WebError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Request failed"
        );

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"de\"><head><meta charset=\"utf-8\"><title>Urlaubsgruppe</title></head>\
             <body><h1>{status}</h1><p>{message}</p><p><small>{code} &middot; {request_id}</small></p>\
             <p><a href=\"/\">Zurück</a></p></body></html>",
            status = status,
            message = minijinja::HtmlEscape(&self.to_string()),
            code = code,
            request_id = request_id,
        );

        (status, Html(body)).into_response()
    }
}

/// Result type for web handlers
pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = WebError::View(ViewError::InsufficientHistory { found: 1 }).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = WebError::View(ViewError::InvalidCoordinate {
            field: "latitude",
            value: "x".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_error_page_escapes_message() {
        let response = WebError::Internal("<script>alert('x')</script> & more".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(body.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2f;script&gt; &amp; more"));
        assert!(!body.contains("<script>"));
    }
}
