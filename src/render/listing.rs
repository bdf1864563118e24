//! Listing page rendering.

use maud::{Markup, PreEscaped, html};

use crate::cms::format::{PostPagination, PostSummary};
use crate::render::components::{self, OpenGraphData};

/// Inline client script for in-place pagination.
///
/// Fetches the next page as JSON from /api/load-more and appends entries
/// to the existing list. Constraints: at most one fetch in flight at a
/// time (button disabled while pending), and a failed fetch leaves the
/// page usable with the button re-armed for a retry.
pub const LOAD_MORE_JS: &str = r#"
(function () {
  var button = document.getElementById('load-more');
  if (!button) return;
  var list = document.getElementById('post-list');
  var status = document.getElementById('load-more-status');
  var pending = false;

  function formatDate(raw) {
    if (!raw) return '';
    var d = new Date(raw);
    if (isNaN(d.getTime())) return '';
    return d.toLocaleDateString('en-GB', { day: '2-digit', month: 'short', year: 'numeric' });
  }

  function meta(parent, svg, text) {
    var span = document.createElement('span');
    span.innerHTML = svg;
    span.appendChild(document.createTextNode(' ' + text));
    parent.appendChild(span);
  }

  function entry(post) {
    var a = document.createElement('a');
    a.className = 'post-item';
    a.href = '/post/' + encodeURIComponent(post.uid);
    var title = document.createElement('strong');
    title.textContent = post.title;
    a.appendChild(title);
    var subtitle = document.createElement('p');
    subtitle.textContent = post.subtitle;
    a.appendChild(subtitle);
    var bar = document.createElement('div');
    bar.className = 'post-meta';
    var date = formatDate(post.first_publication_date);
    if (date) meta(bar, ICON_CALENDAR, date);
    if (post.author) meta(bar, ICON_USER, post.author);
    a.appendChild(bar);
    return a;
  }

  button.addEventListener('click', function () {
    if (pending) return;
    var cursor = button.getAttribute('data-cursor');
    if (!cursor) return;
    pending = true;
    button.disabled = true;
    status.textContent = '';
    fetch('/api/load-more?url=' + encodeURIComponent(cursor))
      .then(function (res) {
        if (!res.ok) throw new Error('load-more failed: ' + res.status);
        return res.json();
      })
      .then(function (page) {
        page.results.forEach(function (post) {
          list.appendChild(entry(post));
        });
        if (page.next_page) {
          button.setAttribute('data-cursor', page.next_page);
        } else {
          button.parentNode.removeChild(button);
        }
      })
      .catch(function () {
        status.textContent = 'Could not load more posts. Try again.';
      })
      .then(function () {
        pending = false;
        if (button.parentNode) button.disabled = false;
      });
  });
})();
"#;

/// Render the home page: post listing, optional load-more control, and
/// the preview toggle.
pub fn render(
    page: &PostPagination,
    preview: bool,
    base_url: &str,
    site_name: &str,
) -> Markup {
    let og = OpenGraphData {
        title: site_name,
        description: "Thoughts on software, space, and everything in between.",
        og_type: "website",
        image: None,
        twitter_card_type: "summary",
    };
    let body = html! {
        div class="post-list" id="post-list" {
            @for post in &page.results {
                (post_entry(post))
            }
        }
        @if let Some(cursor) = &page.next_page {
            div class="load-more" {
                button id="load-more" data-cursor=(cursor) { "Load more posts" }
                p class="load-more-status" id="load-more-status" {}
            }
        }
        (preview_aside(preview))
        script {
            (PreEscaped(format!(
                "var ICON_CALENDAR = {};\nvar ICON_USER = {};\n",
                serde_json::json!(components::ICON_CALENDAR),
                serde_json::json!(components::ICON_USER),
            )))
            (PreEscaped(LOAD_MORE_JS))
        }
    };
    components::page_shell(site_name, "Home", base_url, og, body, site_name)
}

fn post_entry(post: &PostSummary) -> Markup {
    html! {
        a class="post-item" href={ "/post/" (post.uid) } {
            strong { (post.title) }
            p { (post.subtitle) }
            (components::post_meta(
                post.first_publication_date.as_deref(),
                &post.author,
                None,
            ))
        }
    }
}

/// Preview session toggle, rendered on every page.
pub fn preview_aside(preview: bool) -> Markup {
    html! {
        aside class="preview-aside" {
            @if preview {
                a href="/api/exit-preview" { "Exit preview mode" }
            } @else {
                a href="/api/preview" { "Enter preview mode" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(uid: &str, title: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            title: title.to_string(),
            subtitle: "a subtitle".to_string(),
            author: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn renders_one_entry_per_post() {
        let page = PostPagination {
            results: vec![summary("first", "First"), summary("second", "Second")],
            next_page: None,
        };
        let html = render(&page, false, "https://blog.example.com", "spacetraveling")
            .into_string();
        assert!(html.contains(r#"href="/post/first""#));
        assert!(html.contains(r#"href="/post/second""#));
        assert!(html.contains("15 Mar 2021"));
        assert!(html.contains("Jane Doe"));
    }

    #[test]
    fn load_more_present_only_with_cursor() {
        let mut page = PostPagination {
            results: vec![summary("a", "A")],
            next_page: Some("https://cms.example.com/api/v2/documents/search?page=2".to_string()),
        };
        let with = render(&page, false, "https://blog.example.com", "s").into_string();
        assert!(with.contains("Load more posts"));
        assert!(with.contains("data-cursor=\"https://cms.example.com/api/v2/documents/search?page=2\""));

        page.next_page = None;
        let without = render(&page, false, "https://blog.example.com", "s").into_string();
        assert!(!without.contains("Load more posts"));
    }

    #[test]
    fn entry_titles_are_escaped() {
        let page = PostPagination {
            results: vec![summary("x", "<img onerror=x>")],
            next_page: None,
        };
        let html = render(&page, false, "https://blog.example.com", "s").into_string();
        assert!(!html.contains("<img onerror"));
    }

    #[test]
    fn preview_toggle_follows_session_state() {
        let page = PostPagination {
            results: vec![],
            next_page: None,
        };
        let on = render(&page, true, "https://blog.example.com", "s").into_string();
        assert!(on.contains("Exit preview mode"));
        let off = render(&page, false, "https://blog.example.com", "s").into_string();
        assert!(off.contains("Enter preview mode"));
    }

    #[test]
    fn load_more_script_guards_reentry() {
        // The in-flight flag and the retry path are part of the script's
        // contract with the listing page.
        assert!(LOAD_MORE_JS.contains("if (pending) return;"));
        assert!(LOAD_MORE_JS.contains("Could not load more posts. Try again."));
    }
}
