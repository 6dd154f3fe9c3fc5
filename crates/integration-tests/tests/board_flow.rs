//! Full user journeys against real stores: bootstrap, login, author,
//! react, and delete.

use chrono::Utc;
use integration_tests::{member, officer_with_post};
use kb_board::seed::{bootstrap, AutoLogin, BootstrapOptions};
use kb_board::{feed, reactions, repository, session};
use kb_core::{AppError, Role};
use kb_store_file::FileStore;
use kb_store_memory::MemoryStore;

#[test]
fn bootstrap_seeds_and_autologs_in() {
    let mut store = MemoryStore::new();
    let opts = BootstrapOptions {
        fresh: false,
        demo: true,
        autologin: Some(AutoLogin {
            name: Some("田中 一郎".into()),
            group: Some("B班".into()),
            role: Some("officer".into()),
        }),
    };
    bootstrap(&mut store, &opts, Utc::now()).unwrap();

    let user = session::current_user(&store).unwrap().unwrap();
    assert_eq!(user.role, Role::Officer);
    assert_eq!(user.group, "B班");

    let posts = repository::load_all(&store).unwrap();
    assert_eq!(posts.len(), 3);

    // the sample data is browsable through the selector
    let filter = feed::FeedFilter { group: Some("A班".into()), query: None };
    let shown = feed::select(&posts, &filter);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].group, "A班");
}

#[test]
fn like_confirm_comment_flow_on_one_post() {
    let mut store = MemoryStore::new();
    let (_officer, post) = officer_with_post(&mut store, true, true);
    let user = member("u-b", "鈴木 花子");

    assert!(reactions::toggle_like(&mut store, &user, &post.id).unwrap());
    reactions::confirm(&mut store, &user, &post.id, Utc::now()).unwrap();
    reactions::confirm(&mut store, &user, &post.id, Utc::now()).unwrap();
    let comment = reactions::add_comment(&mut store, &user, &post.id, "参加します", Utc::now())
        .unwrap()
        .unwrap();

    let stored = repository::find_by_id(&store, &post.id).unwrap();
    assert_eq!(stored.likes, vec![user.id.clone()]);
    assert_eq!(stored.confirms.len(), 1);
    assert_eq!(stored.confirms[0].name, "鈴木 花子");
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].id, comment.id);

    // undo the like; the rest is untouched
    assert!(!reactions::toggle_like(&mut store, &user, &post.id).unwrap());
    let stored = repository::find_by_id(&store, &post.id).unwrap();
    assert!(stored.likes.is_empty());
    assert_eq!(stored.confirms.len(), 1);
}

#[test]
fn deleting_in_one_handle_makes_ids_stale_elsewhere() {
    let mut store = MemoryStore::new();
    let (officer, post) = officer_with_post(&mut store, false, true);
    let user = member("u-c", "佐藤");

    reactions::delete_post(&mut store, &officer, &post.id).unwrap();
    let err = reactions::toggle_like(&mut store, &user, &post.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_, _)));
}

#[test]
fn everything_works_the_same_over_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let post_id;
    {
        let mut store = FileStore::open(dir.path()).unwrap();
        let (_officer, post) = officer_with_post(&mut store, true, true);
        reactions::confirm(&mut store, &member("u-d", "高橋"), &post.id, Utc::now()).unwrap();
        post_id = post.id;
    }

    // reopen: state is durable
    let store = FileStore::open(dir.path()).unwrap();
    let post = repository::find_by_id(&store, &post_id).unwrap();
    assert_eq!(post.confirms.len(), 1);
    assert!(session::current_user(&store).unwrap().is_some());
}
