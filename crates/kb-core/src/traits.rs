//! # Core Traits (Ports)
//!
//! Any storage backend must implement `StateStore` to be usable by the
//! board logic. The port is deliberately synchronous: the system is
//! single-threaded and event-driven, nothing suspends.

use crate::error::Result;

/// Storage keys for the three logical records.
pub mod keys {
    /// The logged-in user, or absent when nobody is logged in.
    pub const USER: &str = "kairan_user";
    /// The whole post collection, newest first at creation.
    pub const POSTS: &str = "kairan_posts";
    /// The first-view tracking map.
    pub const SEEN: &str = "kairan_seen";
}

/// String-keyed blob persistence contract.
///
/// Values are JSON documents; the store itself treats them as opaque
/// strings. Mutations replace the whole value under a key (last write
/// wins — concurrent writers sharing a store are not coordinated).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait StateStore {
    /// Returns the value under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
