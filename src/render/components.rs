//! Shared HTML components used across all blog pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

/// Inline CSS for all blog pages.
///
/// Flat, modern design. No borders/shadows — uses spacing and subtle
/// background shifts for hierarchy. Phosphor icons via inline SVG.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#1a1d23;--fg:#f8f8f8;--fg2:#bbbbbb;--fg3:#888;--accent:#ff57b2;--accent-hover:#ff80c5;--surface:#252932;--border:rgba(255,87,178,.18);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:0 1rem 1.5rem}
main{max-width:720px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
svg.icon{width:20px;height:20px;fill:currentColor;stroke:none;vertical-align:-4px;flex-shrink:0}

.site-header{width:100%;max-width:720px;padding:2rem 0 3rem}
.site-header a{font-size:1.35rem;font-weight:700;color:var(--fg);letter-spacing:-.02em}
.site-header a:hover{text-decoration:none}
.site-header .dot{color:var(--accent)}

.post-list{display:flex;flex-direction:column;gap:2.5rem}
.post-item{display:block;color:var(--fg)}
.post-item:hover{text-decoration:none}
.post-item strong{font-size:1.5rem;font-weight:700;letter-spacing:-.01em}
.post-item:hover strong{color:var(--accent)}
.post-item p{color:var(--fg2);margin:.35rem 0 .75rem;font-size:1.05rem}
.post-meta{display:flex;gap:1.5rem;flex-wrap:wrap;font-size:.9rem;color:var(--fg3)}
.post-meta span,.post-meta time{display:flex;align-items:center;gap:.4rem}
.post-meta svg.icon{width:18px;height:18px}

.load-more{margin-top:3rem}
.load-more button{background:none;border:none;cursor:pointer;color:var(--accent);font-size:1rem;font-weight:700;padding:0}
.load-more button:hover{color:var(--accent-hover)}
.load-more button:disabled{color:var(--fg3);cursor:wait}
.load-more-status{margin-top:.5rem;font-size:.9rem;color:var(--fg3)}

.banner{width:100%;max-height:400px;object-fit:cover;display:block;margin-bottom:2rem;border-radius:0}
.post h1{font-size:2rem;font-weight:700;letter-spacing:-.02em;margin-bottom:.75rem}
.post-edited{display:block;margin-top:.5rem;font-size:.85rem;font-style:italic;color:var(--fg3)}
.post-content{margin-top:2.5rem;font-size:1.05rem;line-height:1.75}
.post-content h2{font-size:1.4rem;font-weight:700;margin:2rem 0 .75rem;letter-spacing:-.01em}
.post-content h3,.post-content h4{font-weight:700;margin:1.5rem 0 .75rem}
.post-content p{margin:.75rem 0}
.post-content ul,.post-content ol{margin:.75rem 0;padding-left:1.5rem}
.post-content li{margin:.3rem 0}
.post-content pre{background:var(--surface);border:1px solid var(--border);border-radius:6px;padding:.75rem 1rem;overflow-x:auto;margin:.75rem 0;font-family:var(--mono);font-size:.85rem;line-height:1.5}
.post-content img{border-radius:6px;margin:.75rem 0}
.post-content a{color:var(--accent)}

.nav-posts{display:flex;justify-content:space-between;gap:1rem;margin-top:3rem;padding-top:1.5rem;border-top:1px solid var(--border)}
.nav-posts a{display:flex;flex-direction:column;gap:.25rem;color:var(--fg2);max-width:45%}
.nav-posts a strong{color:var(--fg)}
.nav-posts a:hover{text-decoration:none;color:var(--accent)}
.nav-posts .nav-next{text-align:right;margin-left:auto}

.preview-aside{margin-top:3rem;display:flex;justify-content:center}
.preview-aside a{display:inline-block;background:var(--surface);color:var(--fg);padding:.7rem 2rem;border-radius:8px;font-size:.9rem;font-weight:700}
.preview-aside a:hover{text-decoration:none;background:var(--border)}

.footer{text-align:center;margin-top:2rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);letter-spacing:.01em;width:100%;max-width:720px}
.footer a{color:var(--accent);text-decoration:none}
.footer a:hover{text-decoration:underline}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#1a1d23;color:#f8f8f8;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#bbb;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#ff57b2}
"#;

/// Content-Security-Policy header value.
///
/// Allows inline styles and the inline load-more script. No external
/// scripts, no iframes, only HTTPS images, fetches back to this origin only.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src https: data:; connect-src 'self'; form-action 'none'; frame-ancestors 'none'";

/// Render the full HTML page shell with `<head>`, OG tags, and body content.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    body_content: Markup,
    site_name: &str,
) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical_url);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                @if let Some(image) = og.image {
                    meta property="og:image" content=(image);
                }

                // Twitter Card
                meta name="twitter:card" content=(og.twitter_card_type);
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);
                @if let Some(image) = og.image {
                    meta name="twitter:image" content=(image);
                }

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                (site_header(site_name))
                main { (body_content) }
                footer class="footer" {
                    (site_name)
                }
            }
        }
    }
}

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "article", "website").
    pub og_type: &'a str,
    /// OG image URL (must be HTTPS).
    pub image: Option<&'a str>,
    /// Twitter card type ("summary", "summary_large_image").
    pub twitter_card_type: &'a str,
}

/// Site header with the logo link back to the listing page.
pub fn site_header(site_name: &str) -> Markup {
    html! {
        header class="site-header" {
            a href="/" { (site_name) span class="dot" { "." } }
        }
    }
}

// -- Phosphor icon SVGs (fill variants) --

/// Calendar icon (Phosphor calendar-blank, fill)
pub const ICON_CALENDAR: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M208,32H184V24a8,8,0,0,0-16,0v8H88V24a8,8,0,0,0-16,0v8H48A16,16,0,0,0,32,48V208a16,16,0,0,0,16,16H208a16,16,0,0,0,16-16V48A16,16,0,0,0,208,32ZM72,48v8a8,8,0,0,0,16,0V48h80v8a8,8,0,0,0,16,0V48h24V80H48V48ZM208,208H48V96H208V208Z"/></svg>"#;

/// User icon (Phosphor user, fill)
pub const ICON_USER: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M230.92,212c-15.23-26.33-38.7-45.21-66.09-54.16a72,72,0,1,0-73.66,0C63.78,166.78,40.31,185.66,25.08,212a8,8,0,1,0,13.85,8c18.84-32.56,52.14-52,89.07-52s70.23,19.44,89.07,52a8,8,0,1,0,13.85-8Z"/></svg>"#;

/// Clock icon (Phosphor clock, fill)
pub const ICON_CLOCK: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M128,24A104,104,0,1,0,232,128,104.11,104.11,0,0,0,128,24Zm56,112H128a8,8,0,0,1-8-8V72a8,8,0,0,1,16,0v48h48a8,8,0,0,1,0,16Z"/></svg>"#;

/// Parse an RFC 3339-ish publication timestamp from the CMS.
///
/// The CMS emits numeric offsets without a colon ("+0000"), which strict
/// RFC 3339 parsing rejects, so fall back to an explicit format.
pub fn parse_date(value: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .or_else(|_| chrono::DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Format a publication timestamp as "15 Mar 2021".
pub fn format_date(value: &str) -> Option<String> {
    parse_date(value).map(|ts| ts.format("%d %b %Y").to_string())
}

/// Format a publication timestamp as "15 Mar 2021, at 19:25".
pub fn format_datetime(value: &str) -> Option<String> {
    parse_date(value).map(|ts| ts.format("%d %b %Y, at %H:%M").to_string())
}

/// Render the date/author/reading-time meta bar shown under post titles.
pub fn post_meta(date: Option<&str>, author: &str, minutes: Option<u64>) -> Markup {
    html! {
        div class="post-meta" {
            @if let Some(raw) = date {
                @if let Some(display) = format_date(raw) {
                    time datetime=(raw) {
                        (PreEscaped(ICON_CALENDAR)) " " (display)
                    }
                }
            }
            @if !author.is_empty() {
                span {
                    (PreEscaped(ICON_USER)) " " (author)
                }
            }
            @if let Some(min) = minutes {
                span {
                    (PreEscaped(ICON_CLOCK)) " " (min) " min"
                }
            }
        }
    }
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Truncate text to a maximum number of characters, appending an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    }
}
