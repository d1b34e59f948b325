//! URL fragments for documents.
//!
//! A document can be addressed by its id or by a slug of its title. Slugs are
//! not unique: two documents titled alike share one, and lookup returns the first.

use crate::model::Document;
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_SLUG_LEN: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lowercases, trims, turns whitespace runs into `-`, keeps only ASCII
/// alphanumerics, `_` and `-`, and caps the result at 100 characters.
pub fn normalize_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    WHITESPACE_RE
        .replace_all(lowered.trim(), "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_SLUG_LEN)
        .collect()
}

/// Resolves a URL fragment: exact id first, then the first document whose
/// title slug equals the fragment's slug.
pub fn find_document_by_url<'a>(fragment: &str, documents: &'a [Document]) -> Option<&'a Document> {
    if fragment.is_empty() {
        return None;
    }
    if let Some(doc) = documents.iter().find(|doc| doc.id == fragment) {
        return Some(doc);
    }

    let wanted = normalize_slug(fragment);
    documents
        .iter()
        .find(|doc| normalize_slug(&doc.title) == wanted)
}

pub fn document_url(id_or_title: &str) -> String {
    format!("/{}", normalize_slug(id_or_title))
}
