//! HTTP route handlers.

pub mod api;
pub mod health;
pub mod home;
pub mod post;
pub mod preview;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use hex_fmt::HexFmt;
use xxhash_rust::xxh3::xxh3_64;

use crate::render::components::CSP_HEADER;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/post/{slug}", get(post::post_detail))
        .route("/api/load-more", get(api::load_more))
        .route("/api/preview", get(preview::enter_preview))
        .route("/api/exit-preview", get(preview::exit_preview))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots))
        .with_state(state)
}

async fn robots() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
        .into_response()
}

/// Cache-Control for published pages, tuned for a CDN in front.
const PUBLISHED_CACHE_CONTROL: &str =
    "public, max-age=60, s-maxage=300, stale-while-revalidate=600";

/// Wrap rendered HTML in a response with security and caching headers.
///
/// Preview responses are marked no-store so a shared cache never serves
/// draft content to another visitor.
pub(crate) fn page_response(html: &str, preview: bool) -> Response {
    let etag = format!("\"{}\"", HexFmt(&xxh3_64(html.as_bytes()).to_be_bytes()));
    let cache_control = if preview {
        "no-store"
    } else {
        PUBLISHED_CACHE_CONTROL
    };
    let mut response = (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, cache_control),
            (header::ETAG, etag.as_str()),
            (header::CONTENT_SECURITY_POLICY, CSP_HEADER),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            (header::X_FRAME_OPTIONS, "DENY"),
        ],
        html.to_string(),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn page_response_sets_security_headers() {
        let response = page_response("<html></html>", false);
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
    }

    #[test]
    fn etag_is_stable_for_identical_bodies() {
        let a = page_response("<html>same</html>", false);
        let b = page_response("<html>same</html>", false);
        assert_eq!(
            a.headers().get(header::ETAG),
            b.headers().get(header::ETAG)
        );
    }

    #[test]
    fn etag_differs_for_different_bodies() {
        let a = page_response("<html>one</html>", false);
        let b = page_response("<html>two</html>", false);
        assert_ne!(
            a.headers().get(header::ETAG),
            b.headers().get(header::ETAG)
        );
    }

    #[test]
    fn preview_pages_are_never_stored() {
        let response = page_response("<html></html>", true);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[test]
    fn published_pages_allow_shared_caching() {
        let response = page_response("<html></html>", false);
        let value = response
            .headers()
            .get(header::CACHE_CONTROL)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(value.contains("s-maxage=300"));
    }
}
