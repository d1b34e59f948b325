//! # Version Log
//!
//! Every document has an append-only history of [`DocumentVersion`] snapshots.
//! All versions of all documents share one persisted collection, so each operation
//! here loads the whole log, filters by `document_id`, and writes the whole log back.
//!
//! ## Numbering
//!
//! Version numbers are per document and start at 0. A new version takes
//! `max(existing) + 1`. With one writer creating versions one after another this
//! yields `0..N-1` with no gaps; after pruning or deleting a version it still never
//! reuses a number. Two writers interleaving on the same store can allocate the same
//! number: callers must serialize writes.
//!
//! ## Auto-versioning
//!
//! [`create_auto`] takes a snapshot only when it would be useful: always for a
//! document without history, otherwise when the content changed and the newest
//! version is older than the configured interval.

use crate::error::Result;
use crate::model::{new_id, DocumentVersion};
use crate::store::DataStore;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How many versions pruning keeps when no count is configured.
pub const DEFAULT_KEEP_COUNT: usize = 20;

/// Minimum age, in seconds, of the newest version before an auto-save snapshots again.
pub const DEFAULT_AUTO_VERSION_INTERVAL_SECS: u64 = 300;

pub const AUTO_SAVE_CHANGELOG: &str = "Auto-saved version";

/// Two versions side by side. `content_diff` carries the raw contents; no
/// structural diff is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub version1: DocumentVersion,
    pub version2: DocumentVersion,
    pub content_diff: ContentDiff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDiff {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total_versions: usize,
    /// `created_at` of the newest version.
    pub last_modified: Option<DateTime<Utc>>,
    pub version_history: Vec<VersionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
    pub number: u32,
    pub date: DateTime<Utc>,
    pub title: String,
    pub changelog: Option<String>,
}

fn next_number(versions: &[DocumentVersion], document_id: &str) -> u32 {
    versions
        .iter()
        .filter(|v| v.document_id == document_id)
        .map(|v| v.version_number + 1)
        .max()
        .unwrap_or(0)
}

pub fn create<S: DataStore>(
    store: &mut S,
    document_id: &str,
    content: &str,
    title: &str,
    changelog: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DocumentVersion> {
    let mut versions = store.load_versions()?;
    let version = DocumentVersion {
        id: new_id(),
        document_id: document_id.to_string(),
        content: content.to_string(),
        title: title.to_string(),
        version_number: next_number(&versions, document_id),
        created_at: now,
        changelog: changelog.map(str::to_string),
    };
    versions.push(version.clone());
    store.save_versions(&versions)?;

    tracing::info!(
        document = document_id,
        number = version.version_number,
        "created version"
    );
    Ok(version)
}

/// Versions of one document, newest number first.
pub fn list<S: DataStore>(store: &S, document_id: &str) -> Result<Vec<DocumentVersion>> {
    let mut versions: Vec<DocumentVersion> = store
        .load_versions()?
        .into_iter()
        .filter(|v| v.document_id == document_id)
        .collect();
    versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
    Ok(versions)
}

pub fn get<S: DataStore>(store: &S, version_id: &str) -> Result<Option<DocumentVersion>> {
    Ok(store.load_versions()?.into_iter().find(|v| v.id == version_id))
}

pub fn latest<S: DataStore>(store: &S, document_id: &str) -> Result<Option<DocumentVersion>> {
    Ok(list(store, document_id)?.into_iter().next())
}

/// Removes one version. Returns whether it existed.
pub fn delete<S: DataStore>(store: &mut S, version_id: &str) -> Result<bool> {
    let mut versions = store.load_versions()?;
    let before = versions.len();
    versions.retain(|v| v.id != version_id);
    if versions.len() == before {
        return Ok(false);
    }
    store.save_versions(&versions)?;
    Ok(true)
}

/// Removes every version of a document. Returns how many were removed.
pub fn delete_for_document<S: DataStore>(store: &mut S, document_id: &str) -> Result<usize> {
    let mut versions = store.load_versions()?;
    let before = versions.len();
    versions.retain(|v| v.document_id != document_id);
    let removed = before - versions.len();
    if removed > 0 {
        store.save_versions(&versions)?;
    }
    Ok(removed)
}

/// Hands the version's `(content, title)` to `apply`. Creates no version.
///
/// Returns `false`, without calling `apply`, when the version does not exist.
pub fn restore<S, F>(store: &S, version_id: &str, apply: F) -> Result<bool>
where
    S: DataStore,
    F: FnOnce(&str, &str),
{
    match get(store, version_id)? {
        Some(version) => {
            apply(&version.content, &version.title);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Keeps the `keep` highest-numbered versions of a document and deletes the rest.
pub fn prune<S: DataStore>(store: &mut S, document_id: &str, keep: usize) -> Result<usize> {
    let doomed: Vec<String> = list(store, document_id)?
        .into_iter()
        .skip(keep)
        .map(|v| v.id)
        .collect();
    if doomed.is_empty() {
        return Ok(0);
    }

    let mut versions = store.load_versions()?;
    versions.retain(|v| !doomed.contains(&v.id));
    store.save_versions(&versions)?;

    tracing::info!(document = document_id, removed = doomed.len(), "pruned versions");
    Ok(doomed.len())
}

/// `None` unless both versions exist.
pub fn compare<S: DataStore>(
    store: &S,
    version_id1: &str,
    version_id2: &str,
) -> Result<Option<VersionComparison>> {
    let versions = store.load_versions()?;
    let find = |id: &str| versions.iter().find(|v| v.id == id).cloned();

    let (Some(version1), Some(version2)) = (find(version_id1), find(version_id2)) else {
        return Ok(None);
    };
    let content_diff = ContentDiff {
        from: version1.content.clone(),
        to: version2.content.clone(),
    };
    Ok(Some(VersionComparison {
        version1,
        version2,
        content_diff,
    }))
}

pub fn stats<S: DataStore>(store: &S, document_id: &str) -> Result<DocumentStats> {
    let versions = list(store, document_id)?;
    Ok(DocumentStats {
        total_versions: versions.len(),
        last_modified: versions.first().map(|v| v.created_at),
        version_history: versions
            .into_iter()
            .map(|v| VersionSummary {
                number: v.version_number,
                date: v.created_at,
                title: v.title,
                changelog: v.changelog,
            })
            .collect(),
    })
}

/// Pretty-printed JSON array of the document's versions, newest first.
pub fn export_history<S: DataStore>(store: &S, document_id: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&list(store, document_id)?)?)
}

pub fn create_auto<S: DataStore>(
    store: &mut S,
    document_id: &str,
    content: &str,
    title: &str,
    interval: Duration,
    now: DateTime<Utc>,
) -> Result<Option<DocumentVersion>> {
    let due = match latest(store, document_id)? {
        None => true,
        Some(newest) => newest.content != content && now - newest.created_at > interval,
    };
    if !due {
        return Ok(None);
    }
    create(store, document_id, content, title, Some(AUTO_SAVE_CHANGELOG), now).map(Some)
}
