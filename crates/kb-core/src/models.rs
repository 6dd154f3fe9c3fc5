//! # Domain Models
//!
//! These structs represent the core entities of the circular board.
//! Everything here is persisted as JSON, so the serde attributes define
//! the stored document format as much as the in-memory shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The fixed demo group set. `全体` addresses every member.
pub const GROUPS: [&str; 4] = ["全体", "A班", "B班", "C班"];

/// Generates an opaque string id for users, posts, and comments.
pub fn new_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// What a logged-in user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can author and delete any post.
    Officer,
    /// Can react to posts but not author them.
    Member,
    /// Read-only.
    Guest,
}

impl Role {
    /// Parses a role parameter, falling back to `Member` for anything
    /// unrecognized. Used by the demo auto-login path.
    pub fn parse_or_member(raw: &str) -> Role {
        match raw {
            "officer" => Role::Officer,
            "guest" => Role::Guest,
            _ => Role::Member,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Officer => "officer",
            Role::Member => "member",
            Role::Guest => "guest",
        }
    }
}

/// The logged-in identity. Created at login, immutable for the session,
/// removed from the store at logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub group: String,
    pub role: Role,
}

/// Author identity snapshot taken when a post is created. Deliberately
/// not a live reference: a later name change must not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

/// An attendance/acknowledgment entry. `id` is the confirming user's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: String,
    pub name: String,
    pub at: DateTime<Utc>,
}

/// A comment on a post. The stored document keys the author under
/// `"user"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "user")]
    pub author: Author,
    pub body: String,
    pub at: DateTime<Utc>,
}

/// A single circular item with its reactions.
///
/// `likes` carries set semantics (each user id at most once), `confirms`
/// holds at most one entry per user id, and `comments` is append-only in
/// display order. The reaction engine upholds those invariants; nothing
/// here re-checks them on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub group: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub require_confirm: bool,
    pub allow_comments: bool,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub confirms: Vec<Confirmation>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    pub fn confirmed_by(&self, user_id: &str) -> bool {
        self.confirms.iter().any(|c| c.id == user_id)
    }
}

/// First-view tracking: post id → (user id → epoch millis of first view).
/// Grows monotonically; entries are never cleared for a (post, user) pair.
pub type SeenMap = HashMap<String, HashMap<String, i64>>;
