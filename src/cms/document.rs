//! Wire types for the CMS query API.
//!
//! Only the fields the blog reads are modeled; everything else in the
//! payload is ignored by serde. All fields are tolerant of absence so a
//! partially filled document never fails deserialization.

use serde::Deserialize;

/// Response from the API root: the set of available refs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRoot {
    #[serde(default)]
    pub refs: Vec<ApiRef>,
}

/// One ref advertised by the API root.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    /// Ref label (e.g., "Master").
    #[serde(default)]
    pub label: String,
    /// The opaque ref value passed to queries.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Whether this is the master (published content) ref.
    #[serde(default, rename = "isMasterRef")]
    pub is_master_ref: bool,
}

/// One page of a documents-search query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    /// Ordered result documents.
    #[serde(default)]
    pub results: Vec<Document>,
    /// Opaque URL of the next page, absent on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
}

/// A raw CMS document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Internal document ID.
    pub id: String,
    /// URL-friendly unique identifier (the post slug).
    #[serde(default)]
    pub uid: Option<String>,
    /// Custom type name (the blog queries type "posts").
    #[serde(rename = "type")]
    pub doc_type: String,
    /// RFC 3339 timestamp of first publication.
    #[serde(default)]
    pub first_publication_date: Option<String>,
    /// RFC 3339 timestamp of the latest publication.
    #[serde(default)]
    pub last_publication_date: Option<String>,
    /// The type-specific data bag.
    #[serde(default)]
    pub data: DocumentData,
}

/// The data bag of a post document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub banner: Banner,
    /// Ordered content sections.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A banner image reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub url: Option<String>,
}

/// A content section: a heading plus rich-text body fragments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

/// One rich-text block (paragraph, heading, list item, image, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextBlock {
    /// Block kind, e.g. "paragraph", "heading2", "list-item", "image".
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Plain text content of the block.
    #[serde(default)]
    pub text: String,
    /// Inline annotations over `text`.
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image URL for "image" blocks.
    #[serde(default)]
    pub url: Option<String>,
    /// Alt text for "image" blocks.
    #[serde(default)]
    pub alt: Option<String>,
}

/// An inline annotation over a block's text.
///
/// `start` and `end` are character offsets (not bytes) into the block text,
/// end-exclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// Span kind: "strong", "em", or "hyperlink".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<SpanData>,
}

/// Extra payload for spans that carry one (hyperlink targets).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
}
