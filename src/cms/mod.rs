//! Headless CMS integration: HTTP client, wire types, and the response
//! formatter that maps raw query pages into the blog's post shapes.

pub mod client;
pub mod document;
pub mod format;
