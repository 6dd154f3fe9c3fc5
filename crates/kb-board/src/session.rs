//! # Session Context
//!
//! Login state lives under its own storage key. There is no ambient
//! current-user: callers fetch the `User` here and pass it explicitly
//! into every engine and selector call.

use kb_core::traits::keys;
use kb_core::{new_id, Result, Role, StateStore, User};

/// Display name used when the login form is submitted blank.
pub const ANONYMOUS_NAME: &str = "名無し";

/// Returns the logged-in user, or `None` when nobody is logged in.
pub fn current_user(store: &dyn StateStore) -> Result<Option<User>> {
    match store.get(keys::USER)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Creates a session: generates a fresh opaque id and persists the user.
/// A blank name becomes [`ANONYMOUS_NAME`].
pub fn login(store: &mut dyn StateStore, name: &str, group: &str, role: Role) -> Result<User> {
    let name = name.trim();
    let user = User {
        id: new_id(),
        name: if name.is_empty() { ANONYMOUS_NAME.into() } else { name.into() },
        group: group.to_string(),
        role,
    };
    store.set(keys::USER, &serde_json::to_string(&user)?)?;
    tracing::info!(user_id = %user.id, role = role.as_str(), "logged in");
    Ok(user)
}

/// Ends the session by clearing the stored identity. Posts and the seen
/// map are untouched.
pub fn logout(store: &mut dyn StateStore) -> Result<()> {
    store.remove(keys::USER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_store_memory::MemoryStore;

    #[test]
    fn login_persists_and_logout_clears() {
        let mut store = MemoryStore::new();
        assert!(current_user(&store).unwrap().is_none());

        let user = login(&mut store, "山田 花子", "A班", Role::Member).unwrap();
        let fetched = current_user(&store).unwrap().unwrap();
        assert_eq!(fetched, user);

        logout(&mut store).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn blank_name_becomes_anonymous() {
        let mut store = MemoryStore::new();
        let user = login(&mut store, "   ", "全体", Role::Guest).unwrap();
        assert_eq!(user.name, ANONYMOUS_NAME);
    }

    #[test]
    fn ids_are_unique_per_login() {
        let mut store = MemoryStore::new();
        let a = login(&mut store, "x", "A班", Role::Member).unwrap();
        let b = login(&mut store, "x", "A班", Role::Member).unwrap();
        assert_ne!(a.id, b.id);
    }
}
