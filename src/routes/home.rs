//! Home page: paginated listing of published posts.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use crate::cms::format;
use crate::error::SiteError;
use crate::render::listing;
use crate::routes::{page_response, preview};
use crate::state::{AppState, CachedHtml};

const CACHE_KEY: &str = "home";

/// GET / — the post listing.
///
/// Published renders are cached; preview sessions always re-query the
/// content API against the preview ref and are never cached.
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    let preview_ref = preview::preview_ref(&headers);
    let preview = preview_ref.is_some();

    if !preview {
        if let Some(cached) = state.cache.get(CACHE_KEY).await {
            let age = chrono::Utc::now() - cached.cached_at;
            tracing::debug!(age_secs = age.num_seconds(), "listing cache hit");
            return Ok(page_response(&cached.html, false));
        }
    }

    let reference = match preview_ref {
        Some(reference) => reference,
        None => state.cms.master_ref().await?,
    };
    let raw = state.cms.latest_posts(&reference).await?;
    let page = format::format_response(raw);

    let html = listing::render(
        &page,
        preview,
        &state.config.base_url,
        &state.config.site_name,
    )
    .into_string();

    if !preview {
        state
            .cache
            .insert(CACHE_KEY.to_string(), CachedHtml::new(html.clone()))
            .await;
    }
    Ok(page_response(&html, preview))
}
