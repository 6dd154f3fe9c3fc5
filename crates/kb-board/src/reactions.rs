//! # Reaction Engine
//!
//! Every mutation against a post: like toggling, attendance confirms,
//! comments, deletion, and creation. Each operation re-reads the whole
//! collection, applies the permission and validation gates, mutates the
//! target, and writes the whole collection back.

use chrono::{DateTime, Utc};
use kb_core::{
    new_id, AppError, Author, Comment, Confirmation, Post, Result, Role, StateStore, User,
};

use crate::repository;

/// Fields an officer submits when authoring a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub group: String,
    pub require_confirm: bool,
    pub allow_comments: bool,
}

/// Splits a comma-separated tag field, trimming and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn ensure_can_react(user: &User) -> Result<()> {
    if user.role == Role::Guest {
        return Err(AppError::Unauthorized("guests cannot react to posts".into()));
    }
    Ok(())
}

/// Locates `post_id` in `posts` or reports the stale reference.
fn position_of(posts: &[Post], post_id: &str) -> Result<usize> {
    posts
        .iter()
        .position(|p| p.id == post_id)
        .ok_or_else(|| AppError::NotFound("post".into(), post_id.into()))
}

/// Flips membership of `user.id` in the post's likes. Applying it twice
/// restores the original state. Returns the new liked state.
pub fn toggle_like(store: &mut dyn StateStore, user: &User, post_id: &str) -> Result<bool> {
    ensure_can_react(user)?;
    let mut posts = repository::load_all(store)?;
    let idx = position_of(&posts, post_id)?;
    let likes = &mut posts[idx].likes;
    let liked = match likes.iter().position(|id| *id == user.id) {
        Some(i) => {
            likes.remove(i);
            false
        }
        None => {
            likes.push(user.id.clone());
            true
        }
    };
    repository::save_all(store, &posts)?;
    tracing::debug!(post_id, user_id = %user.id, liked, "like toggled");
    Ok(liked)
}

/// Records attendance on a post. A no-op when the post does not ask for
/// confirmation, and idempotent: a second confirm from the same user
/// changes nothing.
pub fn confirm(store: &mut dyn StateStore, user: &User, post_id: &str, now: DateTime<Utc>) -> Result<()> {
    ensure_can_react(user)?;
    let mut posts = repository::load_all(store)?;
    let idx = position_of(&posts, post_id)?;
    let post = &mut posts[idx];
    if !post.require_confirm {
        return Ok(());
    }
    if !post.confirmed_by(&user.id) {
        post.confirms.push(Confirmation {
            id: user.id.clone(),
            name: user.name.clone(),
            at: now,
        });
    }
    repository::save_all(store, &posts)
}

/// Appends a comment. Rejected when the post has comments disabled; a
/// body that trims to empty is a successful no-op with no write.
pub fn add_comment(
    store: &mut dyn StateStore,
    user: &User,
    post_id: &str,
    body: &str,
    now: DateTime<Utc>,
) -> Result<Option<Comment>> {
    ensure_can_react(user)?;
    let mut posts = repository::load_all(store)?;
    let idx = position_of(&posts, post_id)?;
    let post = &mut posts[idx];
    if !post.allow_comments {
        return Err(AppError::Unauthorized("comments are disabled on this post".into()));
    }
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }
    let comment = Comment {
        id: new_id(),
        author: Author { id: user.id.clone(), name: user.name.clone() },
        body: body.to_string(),
        at: now,
    };
    post.comments.push(comment.clone());
    repository::save_all(store, &posts)?;
    Ok(Some(comment))
}

/// Removes a post entirely. Permitted only for the post's author or an
/// officer; there is no soft-delete.
pub fn delete_post(store: &mut dyn StateStore, user: &User, post_id: &str) -> Result<()> {
    let posts = repository::load_all(store)?;
    let idx = position_of(&posts, post_id)?;
    if posts[idx].author.id != user.id && user.role != Role::Officer {
        return Err(AppError::Unauthorized("only the author or an officer can delete a post".into()));
    }
    let remaining: Vec<Post> = posts.into_iter().filter(|p| p.id != post_id).collect();
    repository::save_all(store, &remaining)?;
    tracing::info!(post_id, user_id = %user.id, "post deleted");
    Ok(())
}

/// Authors a new post at the head of the collection. Officer-only;
/// title and body must be non-empty after trimming.
pub fn create_post(store: &mut dyn StateStore, user: &User, draft: PostDraft, now: DateTime<Utc>) -> Result<Post> {
    if user.role != Role::Officer {
        return Err(AppError::Unauthorized("only officers can create posts".into()));
    }
    let title = draft.title.trim();
    let body = draft.body.trim();
    if title.is_empty() || body.is_empty() {
        return Err(AppError::ValidationError("title and body are required".into()));
    }
    let post = Post {
        id: new_id(),
        title: title.to_string(),
        body: body.to_string(),
        tags: draft.tags,
        group: draft.group,
        author: Author { id: user.id.clone(), name: user.name.clone() },
        created_at: now,
        require_confirm: draft.require_confirm,
        allow_comments: draft.allow_comments,
        likes: vec![],
        confirms: vec![],
        comments: vec![],
    };
    let mut posts = repository::load_all(store)?;
    posts.insert(0, post.clone());
    repository::save_all(store, &posts)?;
    tracing::info!(post_id = %post.id, author = %user.id, "post created");
    Ok(post)
}
