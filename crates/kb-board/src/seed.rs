//! # Demo Seeding & Bootstrap
//!
//! Initial store contents for the demo: a reset flag, sample posts, and
//! an auto-login shortcut. These run once before normal operation and
//! never affect the runtime contracts of the other modules.

use chrono::{DateTime, Utc};
use kb_core::traits::keys;
use kb_core::{new_id, Author, Post, Result, Role, SeenMap, StateStore};

use crate::{repository, session};

/// Auto-login fields; unset name/group take demo defaults, an
/// unrecognized role falls back to `member`.
#[derive(Debug, Clone, Default)]
pub struct AutoLogin {
    pub name: Option<String>,
    pub group: Option<String>,
    pub role: Option<String>,
}

/// One-shot startup options (the demo's query-parameter equivalents).
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Drop all three stored records before anything else.
    pub fresh: bool,
    /// Request sample data; seeding already happens whenever the post
    /// collection is absent, so this is only meaningful after `fresh`.
    pub demo: bool,
    pub autologin: Option<AutoLogin>,
}

fn sample_post(
    title: &str,
    body: &str,
    tags: &[&str],
    group: &str,
    author: Author,
    now: DateTime<Utc>,
    require_confirm: bool,
    allow_comments: bool,
) -> Post {
    Post {
        id: new_id(),
        title: title.into(),
        body: body.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        group: group.into(),
        author,
        created_at: now,
        require_confirm,
        allow_comments,
        likes: vec![],
        confirms: vec![],
        comments: vec![],
    }
}

/// Replaces the store contents with the three sample circulars and an
/// empty seen map. The logged-in user is untouched.
pub fn seed_sample(store: &mut dyn StateStore, now: DateTime<Utc>) -> Result<()> {
    let posts = vec![
        sample_post(
            "【防災訓練】9/30(日) 9:00 集合",
            "集合場所: 第三公園。持ち物: 水、タオル、動きやすい服装。\n参加可否はコメントで教えてください。",
            &["防災", "回覧板"],
            "全体",
            Author { id: "sys-officer".into(), name: "自治会 役員".into() },
            now,
            true,
            true,
        ),
        sample_post(
            "【清掃活動】A班 10/5(土) 7:00",
            "A班のみ、集合は資源置き場付近。軍手配布します。",
            &["清掃", "A班"],
            "A班",
            Author { id: "sys-officer".into(), name: "A班 班長".into() },
            now,
            true,
            true,
        ),
        sample_post(
            "【回覧】資源回収スケジュール（10月）",
            "第1・第3火曜: 可燃\n第2・第4金曜: 資源\n祝日の週は変更あり。詳細は掲示板をご確認ください。",
            &["資源回収", "回覧板"],
            "全体",
            Author { id: "sys-officer".into(), name: "資源委員".into() },
            now,
            false,
            false,
        ),
    ];
    repository::save_all(store, &posts)?;
    repository::save_seen(store, &SeenMap::new())?;
    tracing::info!(posts = posts.len(), "sample data seeded");
    Ok(())
}

/// Seeds the samples only when no post collection exists yet.
pub fn ensure_seed(store: &mut dyn StateStore, now: DateTime<Utc>) -> Result<()> {
    if store.get(keys::POSTS)?.is_none() {
        seed_sample(store, now)?;
    }
    Ok(())
}

/// Applies the startup options in order: reset, seed-if-absent,
/// auto-login.
pub fn bootstrap(store: &mut dyn StateStore, opts: &BootstrapOptions, now: DateTime<Utc>) -> Result<()> {
    if opts.fresh {
        store.remove(keys::USER)?;
        store.remove(keys::POSTS)?;
        store.remove(keys::SEEN)?;
    }
    ensure_seed(store, now)?;
    if opts.demo {
        // already covered by ensure_seed; kept as an explicit request
        ensure_seed(store, now)?;
    }
    if let Some(auto) = &opts.autologin {
        let name = auto.name.as_deref().unwrap_or("デモ 太郎");
        let group = auto.group.as_deref().unwrap_or("A班");
        let role = Role::parse_or_member(auto.role.as_deref().unwrap_or("member"));
        session::login(store, name, group, role)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_store_memory::MemoryStore;

    #[test]
    fn seed_writes_three_posts_and_resets_seen() {
        let mut store = MemoryStore::new();
        crate::notify::mark_seen(&mut store, "p", "u", Utc::now()).unwrap();

        seed_sample(&mut store, Utc::now()).unwrap();
        assert_eq!(repository::load_all(&store).unwrap().len(), 3);
        assert!(repository::load_seen(&store).unwrap().is_empty());
    }

    #[test]
    fn ensure_seed_does_not_clobber_existing_posts() {
        let mut store = MemoryStore::new();
        let now = Utc::now();
        ensure_seed(&mut store, now).unwrap();

        let officer = session::login(&mut store, "役員", "全体", Role::Officer).unwrap();
        let first_id = repository::load_all(&store).unwrap()[0].id.clone();
        crate::reactions::delete_post(&mut store, &officer, &first_id).unwrap();

        ensure_seed(&mut store, now).unwrap();
        // still two: the posts key exists, so no reseed
        assert_eq!(repository::load_all(&store).unwrap().len(), 2);
    }

    #[test]
    fn fresh_bootstrap_drops_everything_then_reseeds() {
        let mut store = MemoryStore::new();
        let now = Utc::now();
        session::login(&mut store, "誰か", "B班", Role::Member).unwrap();

        let opts = BootstrapOptions { fresh: true, ..Default::default() };
        bootstrap(&mut store, &opts, now).unwrap();

        assert!(session::current_user(&store).unwrap().is_none());
        assert_eq!(repository::load_all(&store).unwrap().len(), 3);
    }

    #[test]
    fn autologin_defaults_and_role_fallback() {
        let mut store = MemoryStore::new();
        let opts = BootstrapOptions {
            autologin: Some(AutoLogin { role: Some("superuser".into()), ..Default::default() }),
            ..Default::default()
        };
        bootstrap(&mut store, &opts, Utc::now()).unwrap();

        let user = session::current_user(&store).unwrap().unwrap();
        assert_eq!(user.name, "デモ 太郎");
        assert_eq!(user.group, "A班");
        assert_eq!(user.role, Role::Member);
    }
}
