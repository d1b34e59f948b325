//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for every mdnotes operation, whichever client drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Reads the clock** and hands `now` to the commands
//! - **Notifies subscribers** after every successful document or folder mutation
//! - **Composes flows** that span collections (save + version, delete + versions)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or terminal formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Change Notification
//!
//! Each `NotesApi` owns its own [`Listeners`] registry. After a mutation succeeds
//! the full document collection is re-read and handed to every subscriber once.
//! A failed write returns the error and notifies nobody.
//!
//! ## Generic Over DataStore
//!
//! `NotesApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NotesApi<FileStore>`
//! - Testing: `NotesApi<InMemoryStore>`

use crate::commands::{documents, favorites, folders, preferences, versions};
use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::events::{Listeners, Subscription};
use crate::model::{Document, DocumentVersion, Folder};
use crate::store::DataStore;
use crate::theme::ThemeName;
use chrono::{DateTime, Utc};

pub use crate::commands::versions::{DocumentStats, VersionComparison};

pub const MANUAL_SAVE_CHANGELOG: &str = "Manual save";

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// The main API facade for mdnotes operations.
pub struct NotesApi<S: DataStore> {
    store: S,
    config: NotesConfig,
    listeners: Listeners<Document>,
    clock: Clock,
}

impl<S: DataStore> NotesApi<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, NotesConfig::default())
    }

    pub fn with_config(store: S, config: NotesConfig) -> Self {
        Self {
            store,
            config,
            listeners: Listeners::new(),
            clock: Box::new(Utc::now),
        }
    }

    /// Replaces the time source used to stamp documents and versions.
    pub fn set_clock<F>(&mut self, clock: F)
    where
        F: Fn() -> DateTime<Utc> + 'static,
    {
        self.clock = Box::new(clock);
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn notify_changed(&self) {
        if self.listeners.is_empty() {
            return;
        }
        match self.store.load_documents() {
            Ok(docs) => self.listeners.notify(&docs),
            Err(e) => tracing::warn!(error = %e, "skipping change notification"),
        }
    }

    // --- Documents ---

    /// Every document, in stored order.
    pub fn get_all_documents(&self) -> Result<Vec<Document>> {
        documents::list(&self.store)
    }

    pub fn get_document(&self, id: &str) -> Result<Option<Document>> {
        documents::get(&self.store, id)
    }

    pub fn save_document(&mut self, document: Document) -> Result<Document> {
        let now = self.now();
        let saved = documents::save(&mut self.store, document, now)?;
        self.notify_changed();
        Ok(saved)
    }

    /// Deletes the document and its version history. A missing id still notifies.
    ///
    /// Subscribers hear about the deletion as soon as the documents write lands,
    /// even if removing the versions then fails.
    pub fn delete_document(&mut self, id: &str) -> Result<()> {
        documents::delete(&mut self.store, id)?;
        self.notify_changed();
        versions::delete_for_document(&mut self.store, id)?;
        Ok(())
    }

    pub fn create_document(
        &mut self,
        title: &str,
        cover_image: Option<String>,
        folder_id: Option<String>,
    ) -> Result<Document> {
        let now = self.now();
        let document = documents::create(&mut self.store, title, cover_image, folder_id, now)?;
        self.notify_changed();
        Ok(document)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&[Document]) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    // --- Folders ---

    pub fn create_folder(&mut self, name: &str) -> Result<Folder> {
        let now = self.now();
        let folder = folders::create(&mut self.store, name, now)?;
        self.notify_changed();
        Ok(folder)
    }

    pub fn get_all_folders(&self) -> Result<Vec<Folder>> {
        folders::list(&self.store)
    }

    pub fn get_folder(&self, id: &str) -> Result<Option<Folder>> {
        folders::get(&self.store, id)
    }

    pub fn rename_folder(&mut self, id: &str, name: &str) -> Result<Option<Folder>> {
        let renamed = folders::rename(&mut self.store, id, name)?;
        if renamed.is_some() {
            self.notify_changed();
        }
        Ok(renamed)
    }

    pub fn delete_folder(&mut self, id: &str) -> Result<()> {
        let now = self.now();
        folders::delete(&mut self.store, id, now)?;
        self.notify_changed();
        Ok(())
    }

    pub fn get_documents_by_folder(&self, folder_id: &str) -> Result<Vec<Document>> {
        documents::by_folder(&self.store, folder_id)
    }

    pub fn get_root_documents(&self) -> Result<Vec<Document>> {
        documents::root(&self.store)
    }

    pub fn move_document_to_folder(
        &mut self,
        document_id: &str,
        folder_id: Option<&str>,
    ) -> Result<Option<Document>> {
        let now = self.now();
        let moved = documents::move_to_folder(&mut self.store, document_id, folder_id, now)?;
        if moved.is_some() {
            self.notify_changed();
        }
        Ok(moved)
    }

    pub fn remove_document_from_folder(&mut self, document_id: &str) -> Result<Option<Document>> {
        self.move_document_to_folder(document_id, None)
    }

    // --- Versions ---

    pub fn create_version(
        &mut self,
        document_id: &str,
        content: &str,
        title: &str,
        changelog: Option<&str>,
    ) -> Result<DocumentVersion> {
        let now = self.now();
        versions::create(&mut self.store, document_id, content, title, changelog, now)
    }

    /// Newest version number first.
    pub fn get_versions(&self, document_id: &str) -> Result<Vec<DocumentVersion>> {
        versions::list(&self.store, document_id)
    }

    pub fn get_version(&self, version_id: &str) -> Result<Option<DocumentVersion>> {
        versions::get(&self.store, version_id)
    }

    pub fn get_latest_version(&self, document_id: &str) -> Result<Option<DocumentVersion>> {
        versions::latest(&self.store, document_id)
    }

    pub fn delete_version(&mut self, version_id: &str) -> Result<bool> {
        versions::delete(&mut self.store, version_id)
    }

    pub fn delete_document_versions(&mut self, document_id: &str) -> Result<usize> {
        versions::delete_for_document(&mut self.store, document_id)
    }

    pub fn restore_version<F>(&self, version_id: &str, apply: F) -> Result<bool>
    where
        F: FnOnce(&str, &str),
    {
        versions::restore(&self.store, version_id, apply)
    }

    pub fn prune_old_versions(&mut self, document_id: &str, keep_count: usize) -> Result<usize> {
        versions::prune(&mut self.store, document_id, keep_count)
    }

    /// Prunes with the configured keep count.
    pub fn prune_versions(&mut self, document_id: &str) -> Result<usize> {
        let keep = self.config.version_keep_count;
        self.prune_old_versions(document_id, keep)
    }

    pub fn compare_versions(
        &self,
        version_id1: &str,
        version_id2: &str,
    ) -> Result<Option<VersionComparison>> {
        versions::compare(&self.store, version_id1, version_id2)
    }

    pub fn get_document_stats(&self, document_id: &str) -> Result<DocumentStats> {
        versions::stats(&self.store, document_id)
    }

    pub fn export_version_history(&self, document_id: &str) -> Result<String> {
        versions::export_history(&self.store, document_id)
    }

    pub fn create_auto_version(
        &mut self,
        document_id: &str,
        content: &str,
        title: &str,
    ) -> Result<Option<DocumentVersion>> {
        let now = self.now();
        let interval = self.config.auto_version_interval();
        versions::create_auto(&mut self.store, document_id, content, title, interval, now)
    }

    // --- Composed flows ---

    /// Persists new content and records a "Manual save" version.
    pub fn save_with_version(
        &mut self,
        document_id: &str,
        content: &str,
    ) -> Result<(Document, DocumentVersion)> {
        let now = self.now();
        let saved = documents::update_content(&mut self.store, document_id, content, now)?;
        self.notify_changed();

        let version = versions::create(
            &mut self.store,
            &saved.id,
            &saved.content,
            &saved.title,
            Some(MANUAL_SAVE_CHANGELOG),
            now,
        )?;
        Ok((saved, version))
    }

    /// Persists only the content, without a version. Used by auto-save.
    pub fn update_content(&mut self, document_id: &str, content: &str) -> Result<Document> {
        let now = self.now();
        let saved = documents::update_content(&mut self.store, document_id, content, now)?;
        self.notify_changed();
        Ok(saved)
    }

    /// Trims and applies a new title, recording the old one in a version changelog.
    pub fn rename_document(
        &mut self,
        document_id: &str,
        new_title: &str,
    ) -> Result<(Document, DocumentVersion)> {
        let now = self.now();
        let (saved, old_title) = documents::rename(&mut self.store, document_id, new_title, now)?;
        self.notify_changed();

        let changelog = format!("Title changed from \"{}\"", old_title);
        let version = versions::create(
            &mut self.store,
            &saved.id,
            &saved.content,
            &saved.title,
            Some(&changelog),
            now,
        )?;
        Ok((saved, version))
    }

    /// Copies a version's content and title back onto its document and records
    /// the restore as a new version.
    pub fn restore_document(&mut self, version_id: &str) -> Result<(Document, DocumentVersion)> {
        let version = self
            .get_version(version_id)?
            .ok_or_else(|| NotesError::VersionNotFound(version_id.to_string()))?;
        let mut document = self
            .get_document(&version.document_id)?
            .ok_or_else(|| NotesError::DocumentNotFound(version.document_id.clone()))?;

        self.restore_version(version_id, |content, title| {
            document.content = content.to_string();
            document.title = title.to_string();
        })?;

        let now = self.now();
        let saved = documents::save(&mut self.store, document, now)?;
        self.notify_changed();

        let changelog = format!("Restored from v{}", version.version_number);
        let restored = versions::create(
            &mut self.store,
            &saved.id,
            &saved.content,
            &saved.title,
            Some(&changelog),
            now,
        )?;
        Ok((saved, restored))
    }

    // --- Favorites ---

    pub fn favorites(&self) -> Result<Vec<String>> {
        favorites::list(&self.store)
    }

    pub fn is_favorite(&self, document_id: &str) -> Result<bool> {
        favorites::is_favorite(&self.store, document_id)
    }

    pub fn add_favorite(&mut self, document_id: &str) -> Result<()> {
        favorites::add(&mut self.store, document_id)
    }

    pub fn remove_favorite(&mut self, document_id: &str) -> Result<()> {
        favorites::remove(&mut self.store, document_id)
    }

    /// Returns whether the document is a favorite afterwards.
    pub fn toggle_favorite(&mut self, document_id: &str) -> Result<bool> {
        favorites::toggle(&mut self.store, document_id)
    }

    pub fn favorite_documents(&self) -> Result<Vec<Document>> {
        favorites::documents(&self.store)
    }

    // --- Theme ---

    pub fn theme_preference(&self) -> Result<ThemeName> {
        let default = self.config.default_theme()?;
        preferences::theme(&self.store, default)
    }

    pub fn save_theme_preference(&mut self, theme: ThemeName) -> Result<()> {
        preferences::set_theme(&mut self.store, theme)
    }

    pub fn toggle_theme(&mut self) -> Result<ThemeName> {
        let default = self.config.default_theme()?;
        preferences::toggle_theme(&mut self.store, default)
    }
}
