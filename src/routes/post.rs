//! Post detail page with neighbor navigation and reading time.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};

use crate::cms::document::QueryResponse;
use crate::cms::format::{self, Post, PostLink};
use crate::error::SiteError;
use crate::render::article;
use crate::routes::{page_response, preview};
use crate::state::{AppState, CachedHtml};

/// GET /post/{slug}
///
/// An unknown slug redirects to the listing rather than surfacing a bare
/// 404, matching how the site treats unpublished or deleted posts.
pub async fn post_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    let preview_ref = preview::preview_ref(&headers);
    let preview = preview_ref.is_some();
    let cache_key = format!("post:{slug}");

    if !preview {
        if let Some(cached) = state.cache.get(&cache_key).await {
            tracing::debug!(slug = %slug, "post cache hit");
            return Ok(page_response(&cached.html, false));
        }
    }

    let reference = match preview_ref {
        Some(reference) => reference,
        None => state.cms.master_ref().await?,
    };

    let Some(document) = state.cms.get_by_uid(&reference, &slug).await? else {
        tracing::info!(slug = %slug, "post not found, redirecting to listing");
        return Ok(Redirect::to("/").into_response());
    };
    let post = Post::from_document(document);

    let (previous, next) = match post.first_publication_date.as_deref() {
        Some(date) => {
            let (before, after) = tokio::try_join!(
                state.cms.latest_before(&reference, date),
                state.cms.earliest_after(&reference, date),
            )?;
            (neighbor_link(before), neighbor_link(after))
        }
        None => (None, None),
    };

    let minutes = format::reading_minutes(&post.content);
    let html = article::render(
        &post,
        previous.as_ref(),
        next.as_ref(),
        preview,
        minutes,
        &state.config.base_url,
        &state.config.site_name,
    )
    .into_string();

    if !preview {
        state
            .cache
            .insert(cache_key, CachedHtml::new(html.clone()))
            .await;
    }
    Ok(page_response(&html, preview))
}

/// First result of a neighbor query as a link, if it points anywhere.
fn neighbor_link(page: QueryResponse) -> Option<PostLink> {
    page.results.first().and_then(PostLink::from_document)
}
