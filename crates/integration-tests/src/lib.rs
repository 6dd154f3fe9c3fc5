//! Shared fixtures for the end-to-end tests.

use chrono::Utc;
use kb_board::{reactions, session};
use kb_core::{Post, Role, StateStore, User};

/// Logs in an officer and authors one post with the given flags.
pub fn officer_with_post(
    store: &mut dyn StateStore,
    require_confirm: bool,
    allow_comments: bool,
) -> (User, Post) {
    let officer = session::login(store, "自治会 役員", "全体", Role::Officer).unwrap();
    let post = reactions::create_post(
        store,
        &officer,
        reactions::PostDraft {
            title: "【防災訓練】9/30(日) 9:00 集合".into(),
            body: "集合場所: 第三公園。".into(),
            tags: vec!["防災".into(), "回覧板".into()],
            group: "全体".into(),
            require_confirm,
            allow_comments,
        },
        Utc::now(),
    )
    .unwrap();
    (officer, post)
}

/// A member identity without touching the session record.
pub fn member(id: &str, name: &str) -> User {
    User { id: id.into(), name: name.into(), group: "A班".into(), role: Role::Member }
}
