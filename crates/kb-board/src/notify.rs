//! # Notification Counter
//!
//! The unread badge: posts younger than the fresh window that the
//! current user has never had rendered. Marking seen is a side effect
//! of display, not an explicit acknowledgment.

use chrono::{DateTime, Duration, Utc};
use kb_core::{Post, Result, SeenMap, StateStore};

use crate::repository;

/// Posts older than this never count toward the badge.
pub const FRESH_WINDOW_HOURS: i64 = 48;

/// Counts posts strictly younger than 48 hours with no seen entry for
/// `user_id`.
pub fn unseen_count(posts: &[Post], seen: &SeenMap, user_id: &str, now: DateTime<Utc>) -> usize {
    let window = Duration::hours(FRESH_WINDOW_HOURS);
    posts
        .iter()
        .filter(|p| now - p.created_at < window)
        .filter(|p| {
            seen.get(&p.id)
                .map_or(true, |viewers| !viewers.contains_key(user_id))
        })
        .count()
}

/// Records the first-view timestamp for `(post_id, user_id)`.
///
/// Unconditional and idempotent for seen-status: re-marking refreshes
/// the stored epoch-millis timestamp but the pair stays seen forever.
pub fn mark_seen(store: &mut dyn StateStore, post_id: &str, user_id: &str, now: DateTime<Utc>) -> Result<()> {
    let mut seen = repository::load_seen(store)?;
    seen.entry(post_id.to_string())
        .or_default()
        .insert(user_id.to_string(), now.timestamp_millis());
    repository::save_seen(store, &seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::Author;
    use kb_store_memory::MemoryStore;

    fn post(id: &str, hours_old: i64, now: DateTime<Utc>) -> Post {
        Post {
            id: id.into(),
            title: "t".into(),
            body: "b".into(),
            tags: vec![],
            group: "全体".into(),
            author: Author { id: "a".into(), name: "n".into() },
            created_at: now - Duration::hours(hours_old),
            require_confirm: false,
            allow_comments: true,
            likes: vec![],
            confirms: vec![],
            comments: vec![],
        }
    }

    #[test]
    fn fifty_hour_old_post_is_outside_the_window() {
        let now = Utc::now();
        let posts = vec![post("old", 50, now)];
        assert_eq!(unseen_count(&posts, &SeenMap::new(), "u1", now), 0);
    }

    #[test]
    fn exactly_48_hours_is_not_fresh() {
        let now = Utc::now();
        let posts = vec![post("edge", 48, now)];
        assert_eq!(unseen_count(&posts, &SeenMap::new(), "u1", now), 0);
    }

    #[test]
    fn fresh_unseen_post_counts_until_viewed() {
        let now = Utc::now();
        let posts = vec![post("fresh", 1, now)];
        let mut store = MemoryStore::new();

        let seen = repository::load_seen(&store).unwrap();
        assert_eq!(unseen_count(&posts, &seen, "u1", now), 1);

        mark_seen(&mut store, "fresh", "u1", now).unwrap();
        let seen = repository::load_seen(&store).unwrap();
        assert_eq!(unseen_count(&posts, &seen, "u1", now), 0);
    }

    #[test]
    fn seen_is_tracked_per_user() {
        let now = Utc::now();
        let posts = vec![post("fresh", 1, now)];
        let mut store = MemoryStore::new();
        mark_seen(&mut store, "fresh", "u1", now).unwrap();

        let seen = repository::load_seen(&store).unwrap();
        assert_eq!(unseen_count(&posts, &seen, "u1", now), 0);
        assert_eq!(unseen_count(&posts, &seen, "u2", now), 1);
    }

    #[test]
    fn remarking_updates_the_timestamp_only() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);
        let mut store = MemoryStore::new();

        mark_seen(&mut store, "p", "u1", now).unwrap();
        mark_seen(&mut store, "p", "u1", later).unwrap();

        let seen = repository::load_seen(&store).unwrap();
        let viewers = &seen["p"];
        assert_eq!(viewers.len(), 1);
        assert_eq!(viewers["u1"], later.timestamp_millis());
    }
}
