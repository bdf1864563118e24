//! JSON endpoint backing in-place pagination on the listing page.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::cms::format::{self, PostPagination};
use crate::error::SiteError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoadMoreParams {
    /// Opaque next-page cursor from a previous response.
    pub url: String,
}

/// GET /api/load-more?url={cursor}
///
/// Follows a pagination cursor and returns the next page as JSON. The
/// cursor embeds the ref it was issued under, so pages fetched during a
/// preview session keep reading the preview snapshot without any extra
/// plumbing here.
///
/// Errors come back as JSON with a non-2xx status; the page's script
/// shows a retry message instead of breaking the listing.
pub async fn load_more(
    State(state): State<AppState>,
    Query(params): Query<LoadMoreParams>,
) -> Response {
    match fetch(&state, &params.url).await {
        Ok(page) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            Json(page),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn fetch(state: &AppState, cursor: &str) -> Result<PostPagination, SiteError> {
    let raw = state.cms.fetch_page(cursor).await?;
    Ok(format::format_response(raw))
}

/// Map an error to the `{error, message}` JSON shape.
fn error_response(err: SiteError) -> Response {
    let (status, code) = match &err {
        SiteError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        SiteError::InvalidPreviewToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
        SiteError::Cms(inner) => {
            tracing::warn!(error = %inner, "pagination fetch failed upstream");
            (StatusCode::BAD_GATEWAY, "upstream_error")
        }
        SiteError::Internal(inner) => {
            tracing::error!(error = %inner, "pagination fetch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };
    let message = match &err {
        SiteError::Cms(_) | SiteError::Internal(_) => "Could not load more posts".to_string(),
        other => other.to_string(),
    };
    (
        status,
        Json(json!({ "error": code, "message": message })),
    )
        .into_response()
}
