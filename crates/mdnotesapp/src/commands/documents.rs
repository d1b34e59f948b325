use crate::error::{NotesError, Result};
use crate::model::Document;
use crate::store::DataStore;
use chrono::{DateTime, Utc};

pub fn list<S: DataStore>(store: &S) -> Result<Vec<Document>> {
    store.load_documents()
}

pub fn get<S: DataStore>(store: &S, id: &str) -> Result<Option<Document>> {
    Ok(store.load_documents()?.into_iter().find(|doc| doc.id == id))
}

/// Replaces the document with the same id, or appends it. Timestamps are
/// written as given.
pub(crate) fn upsert<S: DataStore>(store: &mut S, document: &Document) -> Result<()> {
    let mut documents = store.load_documents()?;
    match documents.iter_mut().find(|doc| doc.id == document.id) {
        Some(existing) => {
            tracing::debug!(id = %document.id, "replacing document");
            *existing = document.clone();
        }
        None => {
            tracing::debug!(id = %document.id, "adding document");
            documents.push(document.clone());
        }
    }
    store.save_documents(&documents)
}

/// Upserts `document` after refreshing its `updated_at`.
pub fn save<S: DataStore>(
    store: &mut S,
    mut document: Document,
    now: DateTime<Utc>,
) -> Result<Document> {
    document.touch(now);
    upsert(store, &document)?;
    Ok(document)
}

/// Removes the document. Returns whether anything was removed.
pub fn delete<S: DataStore>(store: &mut S, id: &str) -> Result<bool> {
    let mut documents = store.load_documents()?;
    let before = documents.len();
    documents.retain(|doc| doc.id != id);
    let removed = documents.len() != before;

    store.save_documents(&documents)?;
    Ok(removed)
}

pub fn create<S: DataStore>(
    store: &mut S,
    title: &str,
    cover_image: Option<String>,
    folder_id: Option<String>,
    now: DateTime<Utc>,
) -> Result<Document> {
    let document = Document::new(title, cover_image, folder_id, now);
    upsert(store, &document)?;
    Ok(document)
}

pub fn by_folder<S: DataStore>(store: &S, folder_id: &str) -> Result<Vec<Document>> {
    Ok(store
        .load_documents()?
        .into_iter()
        .filter(|doc| doc.folder_id.as_deref() == Some(folder_id))
        .collect())
}

/// Documents that are not filed in any folder.
pub fn root<S: DataStore>(store: &S) -> Result<Vec<Document>> {
    Ok(store
        .load_documents()?
        .into_iter()
        .filter(Document::is_root)
        .collect())
}

/// Sets or clears the folder of a document. A missing document is a no-op.
pub fn move_to_folder<S: DataStore>(
    store: &mut S,
    document_id: &str,
    folder_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Document>> {
    let Some(mut document) = get(store, document_id)? else {
        return Ok(None);
    };
    document.folder_id = folder_id.map(str::to_string);
    save(store, document, now).map(Some)
}

/// Replaces the content of an existing document.
pub fn update_content<S: DataStore>(
    store: &mut S,
    document_id: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Document> {
    let mut document = get(store, document_id)?
        .ok_or_else(|| NotesError::DocumentNotFound(document_id.to_string()))?;
    document.content = content.to_string();
    save(store, document, now)
}

/// Renames an existing document. Returns the saved document and its old title.
pub fn rename<S: DataStore>(
    store: &mut S,
    document_id: &str,
    new_title: &str,
    now: DateTime<Utc>,
) -> Result<(Document, String)> {
    let title = new_title.trim();
    if title.is_empty() {
        return Err(NotesError::EmptyTitle);
    }

    let mut document = get(store, document_id)?
        .ok_or_else(|| NotesError::DocumentNotFound(document_id.to_string()))?;
    let old_title = std::mem::replace(&mut document.title, title.to_string());
    let saved = save(store, document, now)?;
    Ok((saved, old_title))
}
