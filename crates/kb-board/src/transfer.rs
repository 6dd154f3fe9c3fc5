//! # Import / Export
//!
//! Whole-store transfer as a single JSON document. Import is
//! all-or-nothing on parsing: a malformed document leaves the store
//! untouched; a valid one overwrites only the records it carries.

use chrono::{DateTime, Utc};
use kb_core::traits::keys;
use kb_core::{Post, Result, SeenMap, StateStore, User};
use serde::{Deserialize, Serialize};

use crate::{repository, session};

/// The exported document shape: `{user, posts, seen, exportedAt}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub user: Option<User>,
    pub posts: Vec<Post>,
    pub seen: SeenMap,
    pub exported_at: DateTime<Utc>,
}

/// Accepted on import: any subset of the three records. Absent (or
/// null) records leave their stored counterpart untouched.
#[derive(Debug, Deserialize)]
struct ImportDocument {
    user: Option<User>,
    posts: Option<Vec<Post>>,
    seen: Option<SeenMap>,
}

/// Snapshots the whole store.
pub fn export(store: &dyn StateStore, now: DateTime<Utc>) -> Result<ExportDocument> {
    Ok(ExportDocument {
        user: session::current_user(store)?,
        posts: repository::load_all(store)?,
        seen: repository::load_seen(store)?,
        exported_at: now,
    })
}

/// Snapshots the whole store as pretty-printed JSON, the shape a later
/// [`import`] accepts.
pub fn export_json(store: &dyn StateStore, now: DateTime<Utc>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export(store, now)?)?)
}

/// Selectively overwrites the stored records present in `raw`.
///
/// The document is parsed in full before anything is written, so a
/// parse failure cannot leave a partial import behind.
pub fn import(store: &mut dyn StateStore, raw: &str) -> Result<()> {
    let doc: ImportDocument = serde_json::from_str(raw)?;
    if let Some(posts) = &doc.posts {
        repository::save_all(store, posts)?;
    }
    if let Some(seen) = &doc.seen {
        repository::save_seen(store, seen)?;
    }
    if let Some(user) = &doc.user {
        store.set(keys::USER, &serde_json::to_string(user)?)?;
    }
    tracing::info!(
        posts = doc.posts.as_ref().map(Vec::len),
        has_user = doc.user.is_some(),
        "store imported"
    );
    Ok(())
}
