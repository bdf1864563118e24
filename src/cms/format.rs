//! Normalization of raw CMS pages into the blog's post shapes.
//!
//! The formatter is a pure function over deserialized wire data: it never
//! fails on well-formed input, preserves result order, and passes the
//! next-page cursor through untouched.

use serde::{Deserialize, Serialize};

use crate::cms::document::{ContentBlock, Document, QueryResponse};

/// Fixed words-per-minute assumption for the reading-time estimate.
const WORDS_PER_MINUTE: u64 = 200;

/// A post as shown on the listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One formatted page of posts plus the cursor to the next page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPagination {
    pub results: Vec<PostSummary>,
    pub next_page: Option<String>,
}

/// A full post as shown on the detail page.
#[derive(Debug, Clone)]
pub struct Post {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub title: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub content: Vec<ContentBlock>,
}

/// Identifier/title pair for prev/next navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub uid: String,
    pub title: String,
}

/// Map a raw query page into the listing shape.
///
/// Extracts only `uid`, `first_publication_date`, and the title/subtitle/
/// author fields from each document's data bag, discarding the rest of the
/// CMS metadata. Missing fields degrade to empty strings.
pub fn format_response(raw: QueryResponse) -> PostPagination {
    let results = raw
        .results
        .into_iter()
        .map(|doc| PostSummary {
            uid: doc.uid.unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            title: doc.data.title,
            subtitle: doc.data.subtitle,
            author: doc.data.author,
        })
        .collect();

    PostPagination {
        results,
        next_page: raw.next_page,
    }
}

impl Post {
    /// Extract the detail-page fields from a raw document.
    pub fn from_document(doc: Document) -> Self {
        Self {
            uid: doc.uid.unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: doc.data.title,
            author: doc.data.author,
            banner_url: doc.data.banner.url,
            content: doc.data.content,
        }
    }
}

impl PostLink {
    /// Build a navigation link from a document; `None` without a uid.
    pub fn from_document(doc: &Document) -> Option<Self> {
        doc.uid.as_ref().map(|uid| Self {
            uid: uid.clone(),
            title: doc.data.title.clone(),
        })
    }
}

/// Estimate reading time in minutes from a post's content blocks.
///
/// Word count sums whitespace-delimited tokens across every heading and
/// every body-fragment text; minutes = ceil(words / 200). A heuristic, not
/// a measurement.
pub fn reading_minutes(content: &[ContentBlock]) -> u64 {
    let words: usize = content
        .iter()
        .map(|block| {
            block.heading.split_whitespace().count()
                + block
                    .body
                    .iter()
                    .map(|fragment| fragment.text.split_whitespace().count())
                    .sum::<usize>()
        })
        .sum();

    (words as u64).div_ceil(WORDS_PER_MINUTE)
}
