//! # Post Repository
//!
//! Typed access to the stored collections. The only mutation primitive
//! is a whole-collection replace: callers load everything, modify in
//! memory, and save everything back.

use kb_core::traits::keys;
use kb_core::{AppError, Post, Result, SeenMap, StateStore};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn load_or<T: DeserializeOwned>(store: &dyn StateStore, key: &str, default: impl FnOnce() -> T) -> Result<T> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(default()),
    }
}

fn save<T: Serialize>(store: &mut dyn StateStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Loads the whole post collection; an absent key is an empty board.
pub fn load_all(store: &dyn StateStore) -> Result<Vec<Post>> {
    load_or(store, keys::POSTS, Vec::new)
}

/// Replaces the whole stored post collection.
pub fn save_all(store: &mut dyn StateStore, posts: &[Post]) -> Result<()> {
    save(store, keys::POSTS, &posts)
}

/// Fetches one post fresh from the store.
///
/// A missing id is reported as [`AppError::NotFound`] so callers can
/// surface a stale reference (e.g., the post was deleted elsewhere).
pub fn find_by_id(store: &dyn StateStore, id: &str) -> Result<Post> {
    load_all(store)?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound("post".into(), id.into()))
}

/// Loads the first-view tracking map; absent key is an empty map.
pub fn load_seen(store: &dyn StateStore) -> Result<SeenMap> {
    load_or(store, keys::SEEN, SeenMap::new)
}

/// Replaces the whole stored seen map.
pub fn save_seen(store: &mut dyn StateStore, seen: &SeenMap) -> Result<()> {
    save(store, keys::SEEN, seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::{Author, MockStateStore};
    use kb_store_memory::MemoryStore;

    fn post(id: &str) -> Post {
        Post {
            id: id.into(),
            title: "title".into(),
            body: "body".into(),
            tags: vec![],
            group: "全体".into(),
            author: Author { id: "a".into(), name: "n".into() },
            created_at: chrono::Utc::now(),
            require_confirm: false,
            allow_comments: true,
            likes: vec![],
            confirms: vec![],
            comments: vec![],
        }
    }

    #[test]
    fn absent_posts_key_is_empty_board() {
        let store = MemoryStore::new();
        assert!(load_all(&store).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        save_all(&mut store, &[post("p1"), post("p2")]).unwrap();
        let posts = load_all(&store).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "p1");
    }

    #[test]
    fn find_by_id_reports_stale_reference() {
        let mut store = MemoryStore::new();
        save_all(&mut store, &[post("p1")]).unwrap();
        assert!(find_by_id(&store, "p1").is_ok());
        let err = find_by_id(&store, "gone").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[test]
    fn corrupt_posts_document_is_a_parse_error() {
        let mut store = MemoryStore::new();
        store.set(keys::POSTS, "{not json").unwrap();
        assert!(matches!(load_all(&store).unwrap_err(), AppError::Parse(_)));
    }

    #[test]
    fn store_failures_propagate() {
        let mut mock = MockStateStore::new();
        mock.expect_get()
            .returning(|_| Err(AppError::Storage("disk gone".into())));
        let err = load_all(&mock).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
