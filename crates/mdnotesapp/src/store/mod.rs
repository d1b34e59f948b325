//! # Storage Layer
//!
//! This module defines how mdnotes persists its collections. It is split in two
//! levels, the same way for every backend:
//!
//! 1. **Raw key/value I/O** ([`backend::StorageBackend`]): read, write and remove a
//!    UTF-8 value under a string key. Knows nothing about documents.
//! 2. **Typed collections** ([`DataStore`], implemented by [`note_store::NoteStore`]):
//!    maps each collection to its key and its JSON shape.
//!
//! ## Key Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `mdproject_documents` | `{ "documents": Document[] }` |
//! | `mdproject_folders` | `Folder[]` |
//! | `mdproject_versions` | `DocumentVersion[]` (all documents) |
//! | `mdproject_favorites` | `string[]` of document ids |
//! | `mdproject_theme` | the literal `light` or `dark` (not JSON-quoted) |
//!
//! Every collection is read and written whole. There is no cross-key
//! transactionality: deleting a document and then its versions are two writes.
//!
//! ## Failure Semantics
//!
//! A key that was never written reads as an empty collection. A value that cannot
//! be parsed, or a write the backend refuses, is an error: callers can always tell
//! "nothing stored" from "storage failed".
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one file per key under a data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::{Document, DocumentVersion, Folder};
use crate::theme::ThemeName;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod note_store;

pub const DOCUMENTS_KEY: &str = "mdproject_documents";
pub const FOLDERS_KEY: &str = "mdproject_folders";
pub const VERSIONS_KEY: &str = "mdproject_versions";
pub const FAVORITES_KEY: &str = "mdproject_favorites";
pub const THEME_KEY: &str = "mdproject_theme";

/// Abstract interface for the persisted collections.
///
/// Loads return the whole collection in stored order; saves replace it.
pub trait DataStore {
    fn load_documents(&self) -> Result<Vec<Document>>;

    fn save_documents(&mut self, documents: &[Document]) -> Result<()>;

    fn load_folders(&self) -> Result<Vec<Folder>>;

    fn save_folders(&mut self, folders: &[Folder]) -> Result<()>;

    /// All versions across all documents.
    fn load_versions(&self) -> Result<Vec<DocumentVersion>>;

    fn save_versions(&mut self, versions: &[DocumentVersion]) -> Result<()>;

    fn load_favorites(&self) -> Result<Vec<String>>;

    fn save_favorites(&mut self, ids: &[String]) -> Result<()>;

    /// Returns `None` when no preference was ever saved.
    fn load_theme(&self) -> Result<Option<ThemeName>>;

    fn save_theme(&mut self, theme: ThemeName) -> Result<()>;
}
