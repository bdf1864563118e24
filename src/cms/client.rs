//! HTTP adapter for the headless CMS query API.
//!
//! The CMS exposes a versioned REST interface: the API root advertises the
//! current refs (a ref names an immutable snapshot of the repository), and
//! `documents/search` answers predicate queries against a ref. Preview
//! tokens are themselves refs, so draft reads are just queries against a
//! different ref.

use std::time::Duration;

use url::Url;

use crate::cms::document::{ApiRoot, Document, QueryResponse};
use crate::config::Config;
use crate::error::SiteError;

/// Fixed page size for listing queries.
pub const PAGE_SIZE: u32 = 20;

/// The document type holding blog posts.
pub const POST_TYPE: &str = "posts";

/// Request timeout for all CMS calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the CMS query API.
///
/// Holds immutable configuration plus a shared connection pool; cloning is
/// cheap and safe, so one instance serves all concurrent requests.
#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl CmsClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: config.cms_endpoint.clone(),
            access_token: config.cms_access_token.clone(),
        }
    }

    /// Fetch the current master ref from the API root.
    ///
    /// The master ref changes whenever content is published, so it is
    /// resolved per request rather than cached.
    pub async fn master_ref(&self) -> Result<String, SiteError> {
        let url = self.api_url("api/v2", &[])?;
        let root: ApiRoot = self.get_json(url).await?;

        root.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.clone())
            .ok_or_else(|| {
                SiteError::Internal(anyhow::anyhow!("api root did not advertise a master ref"))
            })
    }

    /// Fetch the newest page of posts (type `posts`, newest first).
    pub async fn latest_posts(&self, reference: &str) -> Result<QueryResponse, SiteError> {
        let url = self.search_url(
            reference,
            &[at("document.type", POST_TYPE)],
            Some("document.first_publication_date desc"),
            PAGE_SIZE,
        )?;
        self.get_json(url).await
    }

    /// Follow a next-page cursor URL from a previous query response.
    ///
    /// The cursor is opaque but must point back at the configured CMS
    /// endpoint; cursors naming any other host are rejected.
    pub async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse, SiteError> {
        let url = self.validate_cursor(cursor)?;
        self.get_json(url).await
    }

    /// Fetch a single post by its UID (slug). `None` when no post matches.
    pub async fn get_by_uid(
        &self,
        reference: &str,
        uid: &str,
    ) -> Result<Option<Document>, SiteError> {
        let url = self.search_url(
            reference,
            &[at(&format!("my.{POST_TYPE}.uid"), uid)],
            None,
            1,
        )?;
        let page: QueryResponse = self.get_json(url).await?;
        Ok(page.results.into_iter().next())
    }

    /// Fetch the most recent post published strictly before `date`.
    ///
    /// Ordered descending so the first result is the closest earlier post
    /// regardless of how many older posts exist.
    pub async fn latest_before(
        &self,
        reference: &str,
        date: &str,
    ) -> Result<QueryResponse, SiteError> {
        let url = self.search_url(
            reference,
            &[
                at("document.type", POST_TYPE),
                date_before("document.first_publication_date", date),
            ],
            Some("document.first_publication_date desc"),
            1,
        )?;
        self.get_json(url).await
    }

    /// Fetch the earliest post published strictly after `date`.
    pub async fn earliest_after(
        &self,
        reference: &str,
        date: &str,
    ) -> Result<QueryResponse, SiteError> {
        let url = self.search_url(
            reference,
            &[
                at("document.type", POST_TYPE),
                date_after("document.first_publication_date", date),
            ],
            Some("document.first_publication_date"),
            1,
        )?;
        self.get_json(url).await
    }

    /// Resolve a preview token to a redirect destination.
    ///
    /// Looks the document up against the preview ref and maps it through
    /// [`link_resolver`]. Any failure (expired token, unknown document,
    /// unreachable CMS) collapses to `None` — the caller answers 401 either
    /// way, without leaking why the token was refused.
    pub async fn resolve_preview(&self, token: &str, document_id: &str) -> Option<String> {
        let url = self
            .search_url(token, &[at("document.id", document_id)], None, 1)
            .ok()?;

        match self.get_json::<QueryResponse>(url).await {
            Ok(page) => page.results.first().map(link_resolver),
            Err(err) => {
                tracing::warn!(error = %err, "preview token resolution failed");
                None
            }
        }
    }

    /// Build an endpoint-relative URL with query pairs.
    fn api_url(&self, path: &str, pairs: &[(&str, &str)]) -> Result<Url, SiteError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|e| SiteError::Internal(anyhow::anyhow!("bad api url: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
            if let Some(token) = &self.access_token {
                query.append_pair("access_token", token);
            }
        }

        Ok(url)
    }

    /// Build a `documents/search` URL for a ref, predicates, and paging.
    fn search_url(
        &self,
        reference: &str,
        predicates: &[String],
        orderings: Option<&str>,
        page_size: u32,
    ) -> Result<Url, SiteError> {
        let page_size = page_size.to_string();
        let mut pairs: Vec<(&str, &str)> = vec![("ref", reference)];

        let qs: Vec<String> = predicates.iter().map(|p| format!("[[{p}]]")).collect();
        for q in &qs {
            pairs.push(("q", q));
        }

        let ordering_value;
        if let Some(o) = orderings {
            ordering_value = format!("[{o}]");
            pairs.push(("orderings", &ordering_value));
        }
        pairs.push(("pageSize", &page_size));

        self.api_url("api/v2/documents/search", &pairs)
    }

    /// Validate that a pagination cursor points at the configured endpoint.
    fn validate_cursor(&self, cursor: &str) -> Result<Url, SiteError> {
        let url = Url::parse(cursor)
            .map_err(|_| SiteError::BadRequest("malformed pagination cursor".to_string()))?;

        let same_origin = url.scheme() == self.endpoint.scheme()
            && url.host_str() == self.endpoint.host_str()
            && url.port_or_known_default() == self.endpoint.port_or_known_default();

        if !same_origin {
            return Err(SiteError::BadRequest(
                "pagination cursor does not point at the content api".to_string(),
            ));
        }

        Ok(url)
    }

    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, SiteError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Map a document to its public path.
///
/// Post documents live under `/post/{uid}`; everything else falls back to
/// the listing page.
pub fn link_resolver(doc: &Document) -> String {
    match (&doc.doc_type, &doc.uid) {
        (t, Some(uid)) if t == POST_TYPE => format!("/post/{uid}"),
        _ => "/".to_string(),
    }
}

/// `at(path, value)` equality predicate.
fn at(path: &str, value: &str) -> String {
    format!("at({path},\"{value}\")")
}

/// `date.before(path, value)` strict predicate.
fn date_before(path: &str, value: &str) -> String {
    format!("date.before({path},\"{value}\")")
}

/// `date.after(path, value)` strict predicate.
fn date_after(path: &str, value: &str) -> String {
    format!("date.after({path},\"{value}\")")
}
