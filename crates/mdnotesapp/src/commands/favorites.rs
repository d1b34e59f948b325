use crate::error::Result;
use crate::model::Document;
use crate::store::DataStore;

pub fn list<S: DataStore>(store: &S) -> Result<Vec<String>> {
    store.load_favorites()
}

pub fn is_favorite<S: DataStore>(store: &S, document_id: &str) -> Result<bool> {
    Ok(store.load_favorites()?.iter().any(|id| id == document_id))
}

/// Appends the id unless it is already a favorite.
pub fn add<S: DataStore>(store: &mut S, document_id: &str) -> Result<()> {
    let mut favorites = store.load_favorites()?;
    if favorites.iter().any(|id| id == document_id) {
        return Ok(());
    }
    favorites.push(document_id.to_string());
    store.save_favorites(&favorites)
}

pub fn remove<S: DataStore>(store: &mut S, document_id: &str) -> Result<()> {
    let mut favorites = store.load_favorites()?;
    let before = favorites.len();
    favorites.retain(|id| id != document_id);
    if favorites.len() == before {
        return Ok(());
    }
    store.save_favorites(&favorites)
}

/// Flips membership. Returns whether the document is a favorite afterwards.
pub fn toggle<S: DataStore>(store: &mut S, document_id: &str) -> Result<bool> {
    if is_favorite(store, document_id)? {
        remove(store, document_id)?;
        Ok(false)
    } else {
        add(store, document_id)?;
        Ok(true)
    }
}

/// Existing documents whose id is in the favorites set, in stored document order.
///
/// Favorited ids whose document is gone are skipped, not cleaned up.
pub fn documents<S: DataStore>(store: &S) -> Result<Vec<Document>> {
    let favorites = store.load_favorites()?;
    Ok(store
        .load_documents()?
        .into_iter()
        .filter(|doc| favorites.contains(&doc.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_toggle_round_trip_persists() {
        let mut store = InMemoryStore::new();

        assert!(toggle(&mut store, "doc-1").unwrap());
        assert!(is_favorite(&store, "doc-1").unwrap());
        assert_eq!(list(&store).unwrap(), vec!["doc-1".to_string()]);

        assert!(!toggle(&mut store, "doc-1").unwrap());
        assert!(!is_favorite(&store, "doc-1").unwrap());
        assert!(list(&store).unwrap().is_empty());
    }

    #[test]
    fn test_add_is_idempotent_and_keeps_order() {
        let mut store = InMemoryStore::new();
        add(&mut store, "b").unwrap();
        add(&mut store, "a").unwrap();
        add(&mut store, "b").unwrap();
        assert_eq!(list(&store).unwrap(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = InMemoryStore::new();
        add(&mut store, "a").unwrap();
        remove(&mut store, "zzz").unwrap();
        assert_eq!(list(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_documents_skips_dangling_ids() {
        let mut fixture = StoreFixture::new().with_documents(2).with_favorite("Starred");
        add(&mut fixture.store, "deleted-long-ago").unwrap();

        let docs = documents(&fixture.store).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Starred");
        assert_eq!(list(&fixture.store).unwrap().len(), 2);
    }
}
