use super::mem_backend::MemBackend;
use super::note_store::NoteStore;

pub type InMemoryStore = NoteStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        NoteStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Document, Folder};
    use crate::store::DataStore;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` root documents, each one minute older than the previous.
        pub fn with_documents(mut self, count: usize) -> Self {
            let mut docs = self.store.load_documents().unwrap();
            let now = Utc::now();
            for i in 0..count {
                let mut doc = Document::new(
                    format!("Test Document {}", i + 1),
                    None,
                    None,
                    now - Duration::minutes(i as i64),
                );
                doc.content = format!("Content for document {}", i + 1);
                docs.push(doc);
            }
            self.store.save_documents(&docs).unwrap();
            self
        }

        pub fn with_document(mut self, title: &str, content: &str) -> Self {
            let mut docs = self.store.load_documents().unwrap();
            let mut doc = Document::new(title, None, None, Utc::now());
            doc.content = content.to_string();
            docs.push(doc);
            self.store.save_documents(&docs).unwrap();
            self
        }

        /// Adds a folder and one document filed inside it.
        pub fn with_filed_document(mut self, folder_name: &str, title: &str) -> Self {
            let now = Utc::now();
            let folder = Folder::new(folder_name, now);

            let mut folders = self.store.load_folders().unwrap();
            folders.push(folder.clone());
            self.store.save_folders(&folders).unwrap();

            let mut docs = self.store.load_documents().unwrap();
            docs.push(Document::new(title, None, Some(folder.id), now));
            self.store.save_documents(&docs).unwrap();
            self
        }

        pub fn with_favorite(mut self, title: &str) -> Self {
            let mut docs = self.store.load_documents().unwrap();
            let doc = Document::new(title, None, None, Utc::now());
            let mut favorites = self.store.load_favorites().unwrap();
            favorites.push(doc.id.clone());
            docs.push(doc);
            self.store.save_documents(&docs).unwrap();
            self.store.save_favorites(&favorites).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use crate::store::DataStore;

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with_documents(2)
            .with_document("Plain", "Some content")
            .with_filed_document("Work", "Filed")
            .with_favorite("Starred");

        let docs = fixture.store.load_documents().unwrap();
        assert_eq!(docs.len(), 5);

        let generic = docs
            .iter()
            .filter(|d| d.title.starts_with("Test Document"))
            .count();
        assert_eq!(generic, 2);

        let folders = fixture.store.load_folders().unwrap();
        assert_eq!(folders.len(), 1);
        let filed = docs.iter().find(|d| d.title == "Filed").unwrap();
        assert_eq!(filed.folder_id.as_deref(), Some(folders[0].id.as_str()));

        let starred = docs.iter().find(|d| d.title == "Starred").unwrap();
        assert_eq!(fixture.store.load_favorites().unwrap(), vec![starred.id.clone()]);
    }
}
