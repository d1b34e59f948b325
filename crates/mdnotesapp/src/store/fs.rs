use super::fs_backend::FsBackend;
use super::note_store::NoteStore;
use std::path::PathBuf;

/// Production store: every collection lives in its own file under `root`.
pub type FileStore = NoteStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        NoteStore::with_backend(FsBackend::new(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crate::store::{DataStore, DOCUMENTS_KEY};
    use chrono::Utc;

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("data");

        let doc = Document::new("On disk", None, None, Utc::now());
        {
            let mut store = FileStore::new(root.clone());
            store.save_documents(std::slice::from_ref(&doc)).unwrap();
        }

        assert!(root.join(DOCUMENTS_KEY).exists());

        let reopened = FileStore::new(root);
        assert_eq!(reopened.load_documents().unwrap(), vec![doc]);
    }
}
