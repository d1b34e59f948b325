//! # Domain Model
//!
//! The three persisted entities of mdnotes: [`Document`], [`Folder`] and
//! [`DocumentVersion`].
//!
//! ## Relationships
//!
//! ```text
//! Folder  <── folderId ──  Document  <── documentId ──  DocumentVersion
//! (flat)                   (root when                    (append-only,
//!                           folderId absent)              per document)
//! ```
//!
//! Folders do not own documents: the association is the optional back-reference
//! `Document::folder_id`. Versions point at their document the same way. Neither
//! reference is enforced by the types; the command layer keeps folder references
//! clean when a folder is deleted.
//!
//! ## Identity
//!
//! Ids are opaque strings (UUID v4 text for everything created here). They are
//! compared verbatim and never change after creation, which is what lets URL
//! fragments address a document by id (see [`crate::slug`]).
//!
//! ## Wire Format
//!
//! Field names are camelCase on disk and optional fields are omitted when absent,
//! so a document without a folder serializes without any `folderId` key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh opaque identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Embedded image reference, usually a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// `None` means the document lives at the root level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        cover_image: Option<String>,
        folder_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            content: String::new(),
            cover_image,
            folder_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    pub fn is_root(&self) -> bool {
        self.folder_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            created_at: now,
        }
    }
}

/// An immutable snapshot of a document's title and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    pub id: String,
    pub document_id: String,
    pub content: String,
    pub title: String,
    pub version_number: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

/// On-disk shape of the documents key: `{ "documents": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct DocumentsEnvelope {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Sorts documents newest-edit first, the order every listing view uses.
pub fn sorted_by_recent(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    documents
}
