//! Link handling for rendered previews.
//!
//! The renderer never emits `<a href>`: links become `<span class="md-link">`
//! carrying the target in `data-href`, and the view decides what a click does.
//! [`classify_link`] makes that decision: external targets open outside the app,
//! everything else is an in-app route resolved with [`crate::slug`].

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span class="md-link" data-href="([^"]*)"[^>]*>(.*?)</span>"#)
        .expect("valid regex")
});

const EXTERNAL_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "www."];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Opens outside the app. Always carries a scheme.
    External(String),
    /// An in-app route: a document id or title slug, possibly with a leading `#` or `/`.
    Internal(String),
}

fn has_prefix_ignore_case(url: &str, prefix: &str) -> bool {
    url.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

pub fn classify_link(url: &str) -> LinkTarget {
    let url = url.trim();
    let external = EXTERNAL_PREFIXES
        .iter()
        .any(|prefix| has_prefix_ignore_case(url, prefix));

    if !external {
        return LinkTarget::Internal(url.to_string());
    }
    if has_prefix_ignore_case(url, "www.") {
        LinkTarget::External(format!("https://{}", url))
    } else {
        LinkTarget::External(url.to_string())
    }
}

fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// `(text, url)` for every link span in rendered HTML, in document order.
pub fn extract_links(html: &str) -> Vec<(String, String)> {
    LINK_SPAN_RE
        .captures_iter(html)
        .map(|caps| (caps[2].to_string(), unescape_attr(&caps[1])))
        .collect()
}
