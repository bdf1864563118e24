//! Post detail page rendering.

use maud::{Markup, PreEscaped, html};

use crate::cms::format::{Post, PostLink};
use crate::render::components::{self, OpenGraphData, is_safe_url};
use crate::render::{listing, richtext};

/// Render a full post page: banner, title, meta bar, rich text content,
/// neighbor navigation, and the preview toggle.
pub fn render(
    post: &Post,
    previous: Option<&PostLink>,
    next: Option<&PostLink>,
    preview: bool,
    reading_minutes: u64,
    base_url: &str,
    site_name: &str,
) -> Markup {
    let canonical = format!("{base_url}/post/{}", post.uid);
    let description = post
        .content
        .first()
        .and_then(|block| block.body.first())
        .map(|frag| components::truncate(&frag.text, 160))
        .unwrap_or_default();
    let og = OpenGraphData {
        title: &post.title,
        description: &description,
        og_type: "article",
        image: post.banner_url.as_deref().filter(|u| is_safe_url(u)),
        twitter_card_type: "summary_large_image",
    };
    let body = html! {
        article class="post" {
            @if let Some(banner) = post.banner_url.as_deref().filter(|u| is_safe_url(u)) {
                img class="banner" src=(banner) alt=(post.title);
            }
            h1 { (post.title) }
            (components::post_meta(
                post.first_publication_date.as_deref(),
                &post.author,
                Some(reading_minutes),
            ))
            (edited_note(post))
            div class="post-content" {
                @for block in &post.content {
                    @if !block.heading.is_empty() {
                        h2 { (block.heading) }
                    }
                    (richtext::render_blocks(&block.body))
                }
            }
        }
        (neighbor_nav(previous, next))
        (listing::preview_aside(preview))
    };
    components::page_shell(
        &format!("{} | {site_name}", post.title),
        &description,
        &canonical,
        og,
        body,
        site_name,
    )
}

/// "* edited on ..." line, shown only when the post was revised after
/// first publication.
fn edited_note(post: &Post) -> Markup {
    let edited = match (&post.first_publication_date, &post.last_publication_date) {
        (Some(first), Some(last)) if first != last => components::format_datetime(last),
        _ => None,
    };
    html! {
        @if let Some(stamp) = edited {
            em class="post-edited" { "* edited on " (stamp) }
        }
    }
}

fn neighbor_nav(previous: Option<&PostLink>, next: Option<&PostLink>) -> Markup {
    if previous.is_none() && next.is_none() {
        return PreEscaped(String::new());
    }
    html! {
        nav class="nav-posts" {
            @if let Some(prev) = previous {
                a class="nav-prev" href={ "/post/" (prev.uid) } {
                    strong { (prev.title) }
                    span { "Previous post" }
                }
            }
            @if let Some(next) = next {
                a class="nav-next" href={ "/post/" (next.uid) } {
                    strong { (next.title) }
                    span { "Next post" }
                }
            }
        }
    }
}
