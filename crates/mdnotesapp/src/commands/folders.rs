use crate::error::Result;
use crate::model::Folder;
use crate::store::DataStore;
use chrono::{DateTime, Utc};

pub fn list<S: DataStore>(store: &S) -> Result<Vec<Folder>> {
    store.load_folders()
}

pub fn get<S: DataStore>(store: &S, id: &str) -> Result<Option<Folder>> {
    Ok(store.load_folders()?.into_iter().find(|folder| folder.id == id))
}

pub fn create<S: DataStore>(store: &mut S, name: &str, now: DateTime<Utc>) -> Result<Folder> {
    let folder = Folder::new(name, now);
    let mut folders = store.load_folders()?;
    folders.push(folder.clone());
    store.save_folders(&folders)?;
    Ok(folder)
}

/// Renames a folder. Returns `None` when no folder has that id.
pub fn rename<S: DataStore>(store: &mut S, id: &str, new_name: &str) -> Result<Option<Folder>> {
    let mut folders = store.load_folders()?;
    let Some(folder) = folders.iter_mut().find(|folder| folder.id == id) else {
        return Ok(None);
    };
    folder.name = new_name.to_string();
    let renamed = folder.clone();

    store.save_folders(&folders)?;
    Ok(Some(renamed))
}

/// Removes a folder and moves its documents back to the root.
///
/// The documents collection is written once, and only when at least one
/// document referenced the folder. Returns the ids of the released documents.
pub fn delete<S: DataStore>(store: &mut S, id: &str, now: DateTime<Utc>) -> Result<Vec<String>> {
    let mut folders = store.load_folders()?;
    folders.retain(|folder| folder.id != id);
    store.save_folders(&folders)?;

    let mut documents = store.load_documents()?;
    let mut released = Vec::new();
    for document in documents
        .iter_mut()
        .filter(|doc| doc.folder_id.as_deref() == Some(id))
    {
        document.folder_id = None;
        document.touch(now);
        released.push(document.id.clone());
    }

    if !released.is_empty() {
        tracing::debug!(folder = id, count = released.len(), "releasing documents to root");
        store.save_documents(&documents)?;
    }
    Ok(released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::documents;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_create_and_list_in_insertion_order() {
        let mut store = InMemoryStore::new();
        let now = Utc::now();
        let a = create(&mut store, "Work", now).unwrap();
        let b = create(&mut store, "Home", now).unwrap();

        let folders = list(&store).unwrap();
        assert_eq!(folders, vec![a, b]);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let mut store = InMemoryStore::new();
        let now = Utc::now();
        let a = create(&mut store, "Same", now).unwrap();
        let b = create(&mut store, "Same", now).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(list(&store).unwrap().len(), 2);
    }

    #[test]
    fn test_rename_missing_is_noop() {
        let mut store = InMemoryStore::new();
        let folder = create(&mut store, "Keep", Utc::now()).unwrap();

        assert!(rename(&mut store, "missing", "Other").unwrap().is_none());
        assert_eq!(list(&store).unwrap(), vec![folder]);
    }

    #[test]
    fn test_rename_changes_name_only() {
        let mut store = InMemoryStore::new();
        let folder = create(&mut store, "Old", Utc::now()).unwrap();

        let renamed = rename(&mut store, &folder.id, "New").unwrap().unwrap();
        assert_eq!(renamed.name, "New");
        assert_eq!(renamed.id, folder.id);
        assert_eq!(renamed.created_at, folder.created_at);
    }

    #[test]
    fn test_delete_releases_documents_to_root() {
        let mut fixture = StoreFixture::new()
            .with_filed_document("Work", "Plan")
            .with_documents(1);
        let folder = list(&fixture.store).unwrap().remove(0);

        let released = delete(&mut fixture.store, &folder.id, Utc::now()).unwrap();
        assert_eq!(released.len(), 1);

        assert!(list(&fixture.store).unwrap().is_empty());
        assert!(documents::by_folder(&fixture.store, &folder.id).unwrap().is_empty());
        let docs = documents::list(&fixture.store).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.folder_id.is_none()));
    }

    #[test]
    fn test_delete_leaves_other_folders_alone() {
        let mut fixture = StoreFixture::new()
            .with_filed_document("Work", "Plan")
            .with_filed_document("Home", "Groceries");
        let folders = list(&fixture.store).unwrap();
        let work = &folders[0];
        let home = &folders[1];

        delete(&mut fixture.store, &work.id, Utc::now()).unwrap();

        let remaining = documents::by_folder(&fixture.store, &home.id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Groceries");
    }

    #[test]
    fn test_delete_missing_folder_releases_nothing() {
        let mut fixture = StoreFixture::new().with_documents(2);
        let released = delete(&mut fixture.store, "missing", Utc::now()).unwrap();
        assert!(released.is_empty());
    }
}
