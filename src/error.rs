//! Error types for the blog service.
//!
//! Page routes render errors as simple HTML error pages; the preview
//! endpoint answers an invalid token with a JSON body, matching what the
//! CMS toolbar expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Blog service error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The request was malformed (e.g., a pagination cursor pointing at a
    /// foreign host).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The preview token did not resolve to any document.
    #[error("invalid preview token")]
    InvalidPreviewToken,

    /// The content API could not be reached or returned an error status.
    #[error("content api error: {0}")]
    Cms(#[from] reqwest::Error),

    /// Internal server error (rendering, serialization, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad Request",
                format!("The request could not be processed: {msg}"),
            ),
            Self::InvalidPreviewToken => {
                // The preview endpoint is consumed by the CMS toolbar, which
                // expects a JSON error body rather than an HTML page.
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "message": "Invalid token" })),
                )
                    .into_response();
            }
            Self::Cms(err) => {
                tracing::error!(error = %err, "content api error");
                (
                    StatusCode::BAD_GATEWAY,
                    "Content Unavailable",
                    "The content service is temporarily unavailable. Please try again later."
                        .to_string(),
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) " — spacetraveling" }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to the blog" }
                    }
                }
            }
        };

        (status, Html(markup.into_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_bad_request() {
        let err = SiteError::BadRequest("bad cursor".to_string());
        assert_eq!(err.to_string(), "bad request: bad cursor");
    }

    #[test]
    fn error_display_invalid_preview_token() {
        let err = SiteError::InvalidPreviewToken;
        assert_eq!(err.to_string(), "invalid preview token");
    }

    #[test]
    fn error_display_internal() {
        let err = SiteError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }

    #[test]
    fn error_into_response_bad_request() {
        let err = SiteError::BadRequest("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_into_response_invalid_preview_token_is_json_401() {
        let err = SiteError::InvalidPreviewToken;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"));
    }

    #[test]
    fn error_into_response_internal() {
        let err = SiteError::Internal(anyhow::anyhow!("boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
