//! # Auto-save
//!
//! Buffered edits are persisted after a quiet period instead of on every
//! keystroke. Nothing here spawns timers: the caller owns the clock and drives
//! everything through `poll`/`tick` with the current time, which keeps the
//! behavior deterministic and the library single-threaded.
//!
//! - [`Debouncer`]: holds at most one pending value. Scheduling again replaces
//!   the value and restarts the quiet window.
//! - [`EditSession`]: one open document. Edits are debounced; when the window
//!   elapses the content is saved and an auto-version is considered.

use crate::api::NotesApi;
use crate::error::Result;
use crate::model::Document;
use crate::store::DataStore;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, DateTime<Utc>)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the debouncer with `value`, replacing anything pending.
    pub fn schedule(&mut self, value: T, now: DateTime<Utc>) {
        let due = now
            .checked_add_signed(self.delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending = Some((value, due));
    }

    /// Takes the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Takes the pending value regardless of time.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|(_, due)| *due)
    }
}

/// Edit buffer for one open document.
#[derive(Debug)]
pub struct EditSession {
    document_id: String,
    saved_content: String,
    debouncer: Debouncer<String>,
}

impl EditSession {
    pub fn open(document: &Document, delay: Duration) -> Self {
        Self {
            document_id: document.id.clone(),
            saved_content: document.content.clone(),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// True while an edit is waiting to be saved.
    pub fn is_dirty(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.debouncer.due_at()
    }

    /// Buffers `content`. Typing back to the saved text drops the pending save.
    pub fn edit(&mut self, content: impl Into<String>, now: DateTime<Utc>) {
        let content = content.into();
        if content == self.saved_content {
            self.debouncer.cancel();
        } else {
            self.debouncer.schedule(content, now);
        }
    }

    /// Saves the buffered content if its quiet window has elapsed.
    pub fn tick<S: DataStore>(
        &mut self,
        api: &mut NotesApi<S>,
        now: DateTime<Utc>,
    ) -> Result<Option<Document>> {
        match self.debouncer.poll(now) {
            Some(content) => self.persist(api, content, now).map(Some),
            None => Ok(None),
        }
    }

    /// Saves the buffered content immediately, e.g. before closing the document.
    pub fn flush<S: DataStore>(
        &mut self,
        api: &mut NotesApi<S>,
        now: DateTime<Utc>,
    ) -> Result<Option<Document>> {
        match self.debouncer.flush() {
            Some(content) => self.persist(api, content, now).map(Some),
            None => Ok(None),
        }
    }

    fn persist<S: DataStore>(
        &mut self,
        api: &mut NotesApi<S>,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Document> {
        let saved = match api.update_content(&self.document_id, &content) {
            Ok(saved) => saved,
            Err(e) => {
                // Keep the edit so the next tick retries it.
                self.debouncer.schedule(content, now);
                return Err(e);
            }
        };
        self.saved_content = saved.content.clone();
        tracing::debug!(id = %self.document_id, "auto-saved");

        api.create_auto_version(&saved.id, &saved.content, &saved.title)?;
        Ok(saved)
    }
}
