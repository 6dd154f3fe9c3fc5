//! kairanban — neighborhood circular board demo, CLI edition.
//!
//! All state lives in a file-backed key-value store (the stand-in for
//! browser local storage); subcommands are the board's user actions.
//! The entry point assembles the store plugin, applies the one-shot
//! bootstrap flags, and dispatches.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use kb_board::feed::{self, FeedFilter};
use kb_board::seed::{self, AutoLogin, BootstrapOptions};
use kb_board::{notify, reactions, repository, session, transfer};
use kb_core::{Post, Role, StateStore, User};
use kb_store_file::FileStore;
use tracing_subscriber::EnvFilter;

mod settings;
use settings::Settings;

/// kairanban — 回覧板 demo board
#[derive(Parser, Debug)]
#[command(name = "kairanban")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Override the data directory from settings
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Drop all stored records before running the command
    #[arg(long)]
    fresh: bool,

    /// Request sample data (seeding also happens whenever the board is empty)
    #[arg(long)]
    demo: bool,

    /// Log in automatically before running the command
    #[arg(long)]
    autologin: bool,

    /// Display name for --autologin
    #[arg(long, requires = "autologin")]
    auto_name: Option<String>,

    /// Group for --autologin
    #[arg(long, requires = "autologin")]
    auto_group: Option<String>,

    /// Role for --autologin; anything unrecognized becomes "member"
    #[arg(long, requires = "autologin")]
    auto_role: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Officer,
    Member,
    Guest,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Role {
        match arg {
            RoleArg::Officer => Role::Officer,
            RoleArg::Member => Role::Member,
            RoleArg::Guest => Role::Guest,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Session ===
    /// Log in with a display name, group, and role
    Login {
        /// Display name (blank becomes 名無し)
        name: String,

        #[arg(long, default_value = "全体")]
        group: String,

        #[arg(long, value_enum, default_value = "member")]
        role: RoleArg,
    },

    /// End the session
    Logout,

    /// Show the logged-in user
    Whoami,

    // === Feed ===
    /// Render the feed (marks displayed posts as seen)
    Feed {
        /// Keep only posts of this group
        #[arg(long)]
        group: Option<String>,

        /// Keep only posts containing this text (case-sensitive)
        #[arg(long)]
        query: Option<String>,
    },

    /// Show the unseen-post badge count
    Badge,

    // === Posting ===
    /// Author a new circular (officers only)
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,

        #[arg(long, default_value = "全体")]
        group: String,

        /// Ask readers for an attendance confirmation
        #[arg(long)]
        require_confirm: bool,

        /// Allow comments on the post
        #[arg(long)]
        allow_comments: bool,
    },

    /// Delete a post (author or officer only)
    Delete {
        post_id: String,
    },

    // === Reactions ===
    /// Toggle a like on a post
    Like {
        post_id: String,
    },

    /// Confirm attendance on a post
    Confirm {
        post_id: String,
    },

    /// List who confirmed a post
    Confirmers {
        post_id: String,
    },

    /// Comment on a post
    Comment {
        post_id: String,
        body: String,
    },

    // === Store maintenance ===
    /// Re-seed the sample data
    Seed,

    /// Export the whole store as JSON (stdout, or a file)
    Export {
        file: Option<PathBuf>,
    },

    /// Import a previously exported JSON document
    Import {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load()?;
    let data_dir = cli.data_dir.clone().unwrap_or(settings.data_dir);
    let mut store = FileStore::open(data_dir)?;

    let autologin = cli.autologin.then(|| AutoLogin {
        name: cli.auto_name.clone(),
        group: cli.auto_group.clone(),
        role: cli.auto_role.clone(),
    });
    seed::bootstrap(
        &mut store,
        &BootstrapOptions { fresh: cli.fresh, demo: cli.demo, autologin },
        Utc::now(),
    )?;

    run(&mut store, cli.command)
}

fn run(store: &mut FileStore, command: Commands) -> Result<()> {
    match command {
        Commands::Login { name, group, role } => {
            let user = session::login(store, &name, &group, role.into())?;
            println!("ログインしました: {}（{}） 所属: {}", user.name, role_label(user.role), user.group);
        }
        Commands::Logout => {
            session::logout(store)?;
            println!("ログアウトしました。");
        }
        Commands::Whoami => match session::current_user(store)? {
            Some(u) => println!("{}（{}） 所属: {}", u.name, role_label(u.role), u.group),
            None => println!("未ログイン"),
        },
        Commands::Feed { group, query } => {
            let user = require_login(store)?;
            let posts = repository::load_all(store)?;
            let filter = FeedFilter { group, query };
            let shown = feed::select(&posts, &filter);

            if shown.is_empty() {
                println!("投稿がありません。");
            }
            let shown_ids: Vec<String> = shown.iter().map(|p| p.id.clone()).collect();
            for post in &shown {
                print_post(post, &user);
            }
            // displaying a post is what marks it seen
            let now = Utc::now();
            for id in &shown_ids {
                notify::mark_seen(store, id, &user.id, now)?;
            }
            print_badge(store, &user)?;
        }
        Commands::Badge => {
            let user = require_login(store)?;
            print_badge(store, &user)?;
        }
        Commands::Post { title, body, tags, group, require_confirm, allow_comments } => {
            let user = require_login(store)?;
            let draft = reactions::PostDraft {
                title,
                body,
                tags: reactions::parse_tags(&tags),
                group,
                require_confirm,
                allow_comments,
            };
            let post = reactions::create_post(store, &user, draft, Utc::now())?;
            println!("投稿しました。 id: {}", post.id);
        }
        Commands::Delete { post_id } => {
            let user = require_login(store)?;
            reactions::delete_post(store, &user, &post_id)?;
            println!("削除しました。");
        }
        Commands::Like { post_id } => {
            let user = require_login(store)?;
            let liked = reactions::toggle_like(store, &user, &post_id)?;
            println!("{}", if liked { "いいねしました。" } else { "いいねを取り消しました。" });
        }
        Commands::Confirm { post_id } => {
            let user = require_login(store)?;
            reactions::confirm(store, &user, &post_id, Utc::now())?;
            println!("確認しました。");
        }
        Commands::Confirmers { post_id } => {
            let post = repository::find_by_id(store, &post_id)?;
            if post.confirms.is_empty() {
                println!("まだ確認者はいません。");
            }
            for c in &post.confirms {
                println!("{}（{}）", c.name, local_time(c.at));
            }
        }
        Commands::Comment { post_id, body } => {
            let user = require_login(store)?;
            match reactions::add_comment(store, &user, &post_id, &body, Utc::now())? {
                Some(_) => println!("コメントしました。"),
                None => println!("コメントが空です。"),
            }
        }
        Commands::Seed => {
            seed::seed_sample(store, Utc::now())?;
            println!("サンプルデータを再投入しました。");
        }
        Commands::Export { file } => {
            let json = transfer::export_json(store, Utc::now())?;
            match file {
                Some(path) => {
                    std::fs::write(&path, &json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("書き出しました: {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            transfer::import(store, &raw).context("JSONの読み込みに失敗しました。")?;
            println!("読み込みました。");
        }
    }
    Ok(())
}

fn require_login(store: &dyn StateStore) -> Result<User> {
    match session::current_user(store)? {
        Some(user) => Ok(user),
        None => bail!("ログインしてください。"),
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Officer => "役員",
        Role::Member => "一般",
        Role::Guest => "ゲスト",
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn print_post(post: &Post, user: &User) {
    println!("────────────────────────────────");
    println!("{}", post.title);
    println!("  {} ・ {} ・ [{}]", post.author.name, local_time(post.created_at), post.group);
    for line in post.body.lines() {
        println!("  {line}");
    }
    if !post.tags.is_empty() {
        println!("  tags: {}", post.tags.join(", "));
    }
    let liked = if post.liked_by(&user.id) { "♥" } else { "♡" };
    let confirmed = if post.confirmed_by(&user.id) { "✔" } else { " " };
    println!(
        "  {} {}  確認 {}{}  コメント {}  id: {}",
        liked,
        post.likes.len(),
        post.confirms.len(),
        confirmed,
        post.comments.len(),
        post.id
    );
    for c in &post.comments {
        println!("    💬 {}（{}） {}", c.author.name, local_time(c.at), c.body);
    }
}

fn print_badge(store: &dyn StateStore, user: &User) -> Result<()> {
    let posts = repository::load_all(store)?;
    let seen = repository::load_seen(store)?;
    let count = notify::unseen_count(&posts, &seen, &user.id, Utc::now());
    println!("新着: {count}");
    Ok(())
}
