//! spacetraveling - Server-rendered blog pages over a headless content API.
//!
//! This crate provides a lightweight HTTP server that fetches blog posts from
//! a headless CMS and renders a paginated listing page plus individual post
//! pages. It is designed to be placed behind a CDN for edge caching.
//!
//! # Architecture
//!
//! - **Cms**: reqwest client for the CMS query API (refs, document search,
//!   pagination cursors, preview token resolution)
//! - **Render**: HTML generation with maud (compile-time templates); the CMS
//!   rich-text payload is converted to markup by a dedicated converter
//! - **Cache**: in-process moka cache for published pages + Cache-Control
//!   headers for CDN caching; preview mode bypasses the cache
//!
//! # Routes
//!
//! ```text
//! GET /                  listing page
//! GET /post/{slug}       post detail page
//! GET /api/load-more     next page of posts (JSON)
//! GET /api/preview       enter preview mode (CMS token)
//! GET /api/exit-preview  leave preview mode
//! ```
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - URLs are validated (HTTPS/HTTP only) before use in attributes
//! - Pagination cursors are only followed when they point at the configured
//!   CMS endpoint
//! - Strict Content-Security-Policy on every rendered page

pub mod cms;
pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
