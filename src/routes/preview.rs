//! Preview session endpoints and cookie handling.
//!
//! Entering preview resolves a CMS-issued token to a destination page and
//! stores the token (itself a ref) in an HttpOnly cookie. While the cookie
//! is present every page queries the preview ref instead of the master ref
//! and skips the rendered-page cache.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{PreEscaped, html};
use serde::Deserialize;

use crate::error::SiteError;
use crate::state::AppState;

/// Cookie carrying the preview ref.
pub const PREVIEW_COOKIE: &str = "preview_ref";

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// Preview token issued by the CMS; doubles as the ref to query.
    pub token: Option<String>,
    /// Document the author asked to preview.
    #[serde(rename = "documentId")]
    pub document_id: Option<String>,
}

/// GET /api/preview?token={token}&documentId={id}
///
/// Validates the token against the CMS, sets the session cookie, and
/// redirects to the previewed document. An unresolvable token gets a 401
/// and no cookie.
pub async fn enter_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> Result<Response, SiteError> {
    let Some(token) = params.token.as_deref().filter(|t| !t.is_empty()) else {
        return Err(SiteError::InvalidPreviewToken);
    };
    let document_id = params.document_id.as_deref().unwrap_or_default();
    let Some(destination) = state.cms.resolve_preview(token, document_id).await else {
        return Err(SiteError::InvalidPreviewToken);
    };

    tracing::info!(destination = %destination, "preview session started");

    let cookie = format!(
        "{PREVIEW_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        encode_cookie_value(token)
    );

    // Meta-refresh plus a script fallback; the cookie must be committed by
    // the browser before the destination page is requested.
    let body = html! {
        (maud::DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta http-equiv="refresh" content={ "0; url=" (destination) };
                script {
                    (PreEscaped(format!(
                        "window.location.replace({});",
                        serde_json::json!(&destination)
                    )))
                }
            }
            body { p { "Entering preview…" } }
        }
    };

    Ok((
        StatusCode::OK,
        [
            (header::SET_COOKIE, cookie.as_str()),
            (header::CACHE_CONTROL, "no-store"),
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
        ],
        body.into_string(),
    )
        .into_response())
}

/// GET /api/exit-preview — clear the session cookie and return to the
/// listing.
pub async fn exit_preview() -> Response {
    let cookie = format!("{PREVIEW_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    (
        StatusCode::SEE_OTHER,
        [
            (header::SET_COOKIE, cookie.as_str()),
            (header::CACHE_CONTROL, "no-store"),
            (header::LOCATION, "/"),
        ],
    )
        .into_response()
}

/// Extract the preview ref from a request's Cookie headers, if present.
pub fn preview_ref(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            let pair = pair.trim();
            if let Some(encoded) = pair.strip_prefix(PREVIEW_COOKIE) {
                if let Some(encoded) = encoded.strip_prefix('=') {
                    let decoded = decode_cookie_value(encoded);
                    if !decoded.is_empty() {
                        return Some(decoded);
                    }
                }
            }
        }
    }
    None
}

/// Percent-encode a token for storage in a cookie value. Refs can contain
/// characters (`=`, `;`, spaces) that are not cookie-safe.
fn encode_cookie_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn decode_cookie_value(value: &str) -> String {
    url::form_urlencoded::parse(value.as_bytes())
        .map(|(k, v)| format!("{k}{v}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn cookie_value_roundtrip() {
        let token = "WyJibG9nIl0=  token;with:odd chars";
        let encoded = encode_cookie_value(token);
        assert!(!encoded.contains(';'));
        assert!(!encoded.contains('='));
        assert_eq!(decode_cookie_value(&encoded), token);
    }

    #[test]
    fn preview_ref_found_among_other_cookies() {
        let headers =
            headers_with_cookie("theme=dark; preview_ref=abc123; session=zzz");
        assert_eq!(preview_ref(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn preview_ref_decodes_encoded_token() {
        let encoded = encode_cookie_value("ref=with=equals");
        let headers = headers_with_cookie(&format!("preview_ref={encoded}"));
        assert_eq!(preview_ref(&headers).as_deref(), Some("ref=with=equals"));
    }

    #[test]
    fn preview_ref_absent_without_cookie() {
        let headers = headers_with_cookie("theme=dark");
        assert!(preview_ref(&headers).is_none());
    }

    #[test]
    fn preview_ref_ignores_empty_value() {
        let headers = headers_with_cookie("preview_ref=");
        assert!(preview_ref(&headers).is_none());
    }

    #[test]
    fn preview_ref_does_not_match_prefixed_names() {
        let headers = headers_with_cookie("preview_reformed=abc");
        assert!(preview_ref(&headers).is_none());
    }
}
