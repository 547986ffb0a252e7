//! Open Graph / meta-tag extraction from raw HTML
//!
//! Each field resolves in priority order: Open Graph meta tag, then a named
//! meta tag, then a fallback element (page `<title>`, first `<img>`,
//! `<link rel="icon">`). Relative image and logo URLs are resolved against a
//! canonical base derived from `og:url`, `<link rel="canonical">`, or the
//! requested URL, in that order.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::models::PreviewData;

// Selectors are static and known-valid; a parse failure here is a bug.
macro_rules! selector {
    ($s:expr) => {
        LazyLock::new(|| Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s)))
    };
}

static META: LazyLock<Selector> = selector!("meta");
static TITLE: LazyLock<Selector> = selector!("title");
static IMG: LazyLock<Selector> = selector!("img");
static ICON: LazyLock<Selector> = selector!(r#"link[rel="icon"]"#);
static SHORTCUT_ICON: LazyLock<Selector> = selector!(r#"link[rel="shortcut icon"]"#);
static CANONICAL: LazyLock<Selector> = selector!(r#"link[rel="canonical"]"#);

/// Extract preview metadata from a page's HTML
///
/// `requested_url` is the URL the page was fetched from; it is the canonical
/// base of last resort.
pub fn extract_preview(html: &str, requested_url: &str) -> PreviewData {
    let document = Html::parse_document(html);

    let title = meta_content(&document, "og:title")
        .or_else(|| title_text(&document))
        .or_else(|| meta_content(&document, "twitter:title"));

    let description = meta_content(&document, "og:description")
        .or_else(|| meta_content(&document, "description"))
        .or_else(|| meta_content(&document, "twitter:description"));

    let image = meta_content(&document, "og:image")
        .or_else(|| meta_content(&document, "twitter:image"))
        .or_else(|| first_attr(&document, &IMG, "src"));

    let logo = first_attr(&document, &ICON, "href")
        .or_else(|| first_attr(&document, &SHORTCUT_ICON, "href"))
        .or_else(|| meta_content(&document, "og:logo"));

    let canonical = meta_content(&document, "og:url")
        .or_else(|| first_attr(&document, &CANONICAL, "href"))
        .unwrap_or_else(|| requested_url.to_string());

    PreviewData {
        title,
        description,
        image: image.map(|v| resolve_url(&v, &canonical)),
        logo: logo.map(|v| resolve_url(&v, &canonical)),
        url: Some(canonical),
    }
}

/// Look up a meta tag's content by `name` or `property` attribute
///
/// Returns the first non-empty content, whitespace-normalized.
fn meta_content(document: &Html, key: &str) -> Option<String> {
    document.select(&META).find_map(|element| {
        let tag = element.value();
        let matches = tag.attr("name") == Some(key) || tag.attr("property") == Some(key);
        if !matches {
            return None;
        }
        tag.attr("content").map(normalize_text).filter(|c| !c.is_empty())
    })
}

/// First `<title>` element's text, whitespace-normalized
fn title_text(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|el| normalize_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// First matching element's attribute value
fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .find_map(|el| el.value().attr(attr))
        .map(str::to_string)
        .filter(|v| !v.trim().is_empty())
}

/// Resolve a possibly-relative URL against the canonical base
///
/// Values that are already absolute pass through; values that resolve
/// against neither the base nor on their own fall back to the raw string.
fn resolve_url(value: &str, base: &str) -> String {
    if let Ok(absolute) = Url::parse(value) {
        return absolute.to_string();
    }

    match Url::parse(base).and_then(|b| b.join(value)) {
        Ok(joined) => joined.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Collapse runs of whitespace and trim
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
