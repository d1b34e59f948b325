use super::backend::StorageBackend;
use super::{DataStore, DOCUMENTS_KEY, FAVORITES_KEY, FOLDERS_KEY, THEME_KEY, VERSIONS_KEY};
use crate::error::Result;
use crate::model::{Document, DocumentVersion, DocumentsEnvelope, Folder};
use crate::theme::ThemeName;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct NoteStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> NoteStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let raw = self
            .backend
            .read(key)
            .inspect_err(|e| tracing::error!(key, error = %e, "failed to read from storage"))?;

        match raw {
            None => Ok(T::default()),
            Some(raw) if raw.trim().is_empty() => Ok(T::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                tracing::error!(key, error = %e, "stored value is not valid JSON");
                e.into()
            }),
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend
            .write(key, &raw)
            .inspect_err(|e| tracing::error!(key, error = %e, "failed to write to storage"))?;
        tracing::debug!(key, bytes = raw.len(), "persisted");
        Ok(())
    }
}

impl<B: StorageBackend> DataStore for NoteStore<B> {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let envelope: DocumentsEnvelope = self.load_json(DOCUMENTS_KEY)?;
        Ok(envelope.documents)
    }

    fn save_documents(&mut self, documents: &[Document]) -> Result<()> {
        #[derive(Serialize)]
        struct EnvelopeRef<'a> {
            documents: &'a [Document],
        }
        self.save_json(DOCUMENTS_KEY, &EnvelopeRef { documents })
    }

    fn load_folders(&self) -> Result<Vec<Folder>> {
        self.load_json(FOLDERS_KEY)
    }

    fn save_folders(&mut self, folders: &[Folder]) -> Result<()> {
        self.save_json(FOLDERS_KEY, folders)
    }

    fn load_versions(&self) -> Result<Vec<DocumentVersion>> {
        self.load_json(VERSIONS_KEY)
    }

    fn save_versions(&mut self, versions: &[DocumentVersion]) -> Result<()> {
        self.save_json(VERSIONS_KEY, versions)
    }

    fn load_favorites(&self) -> Result<Vec<String>> {
        self.load_json(FAVORITES_KEY)
    }

    fn save_favorites(&mut self, ids: &[String]) -> Result<()> {
        self.save_json(FAVORITES_KEY, ids)
    }

    fn load_theme(&self) -> Result<Option<ThemeName>> {
        match self.backend.read(THEME_KEY)? {
            None => Ok(None),
            Some(raw) => raw.parse::<ThemeName>().map(Some).inspect_err(|e| {
                tracing::error!(key = THEME_KEY, error = %e, "stored theme is invalid")
            }),
        }
    }

    fn save_theme(&mut self, theme: ThemeName) -> Result<()> {
        self.backend
            .write(THEME_KEY, theme.as_str())
            .inspect_err(|e| tracing::error!(key = THEME_KEY, error = %e, "failed to write to storage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotesError;
    use crate::store::mem_backend::MemBackend;
    use chrono::Utc;

    fn make_store() -> NoteStore<MemBackend> {
        NoteStore::with_backend(MemBackend::new())
    }

    #[test]
    fn test_empty_store_reads_empty_collections() {
        let store = make_store();
        assert!(store.load_documents().unwrap().is_empty());
        assert!(store.load_folders().unwrap().is_empty());
        assert!(store.load_versions().unwrap().is_empty());
        assert!(store.load_favorites().unwrap().is_empty());
        assert_eq!(store.load_theme().unwrap(), None);
    }

    #[test]
    fn test_documents_are_wrapped_in_envelope() {
        let mut store = make_store();
        let doc = Document::new("Wrapped", None, None, Utc::now());
        store.save_documents(std::slice::from_ref(&doc)).unwrap();

        let raw = store.backend.read(DOCUMENTS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["documents"][0]["title"], "Wrapped");

        assert_eq!(store.load_documents().unwrap(), vec![doc]);
    }

    #[test]
    fn test_folders_and_favorites_are_plain_arrays() {
        let mut store = make_store();
        store
            .save_folders(&[Folder::new("Work", Utc::now())])
            .unwrap();
        store.save_favorites(&["a".to_string(), "b".to_string()]).unwrap();

        let folders_raw = store.backend.read(FOLDERS_KEY).unwrap().unwrap();
        assert!(folders_raw.starts_with('['));
        let favorites_raw = store.backend.read(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(favorites_raw, r#"["a","b"]"#);
    }

    #[test]
    fn test_theme_is_stored_as_bare_literal() {
        let mut store = make_store();
        store.save_theme(ThemeName::Dark).unwrap();

        assert_eq!(store.backend.read(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(store.load_theme().unwrap(), Some(ThemeName::Dark));
    }

    #[test]
    fn test_invalid_theme_is_an_error() {
        let store = make_store();
        store.backend.insert_raw(THEME_KEY, "purple");
        assert!(matches!(store.load_theme(), Err(NotesError::InvalidTheme(_))));
    }

    #[test]
    fn test_corrupt_value_is_an_error_not_empty() {
        let store = make_store();
        store.backend.insert_raw(DOCUMENTS_KEY, "{not json");
        assert!(matches!(
            store.load_documents(),
            Err(NotesError::Serialization(_))
        ));
    }

    #[test]
    fn test_blank_value_reads_as_empty() {
        let store = make_store();
        store.backend.insert_raw(VERSIONS_KEY, "  ");
        assert!(store.load_versions().unwrap().is_empty());
    }

    #[test]
    fn test_save_fails_on_write_error() {
        let mut store = make_store();
        store.backend.set_simulate_write_error(true);

        let result = store.save_folders(&[Folder::new("Nope", Utc::now())]);
        assert!(result.is_err());
        assert!(store.load_folders().unwrap().is_empty());
    }
}
