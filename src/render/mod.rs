//! HTML rendering with maud.

pub mod article;
pub mod components;
pub mod listing;
pub mod richtext;
