//! # Feed Selector
//!
//! Pure projection over a post collection: group filter, free-text
//! query, newest first. Recomputed fresh on every call from whatever
//! collection the caller just loaded.

use kb_core::Post;

/// Display filter state. Empty strings mean "no filter", matching the
/// way an empty select/input behaves.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub group: Option<String>,
    pub query: Option<String>,
}

impl FeedFilter {
    fn group_matches(&self, post: &Post) -> bool {
        match self.group.as_deref() {
            None | Some("") => true,
            // The second arm duplicates the equality check; kept for
            // behavioral compatibility, do not hang new filter
            // semantics on it.
            Some(g) => post.group == g || (g == "全体" && post.group == "全体"),
        }
    }

    fn query_matches(&self, post: &Post) -> bool {
        match self.query.as_deref() {
            None | Some("") => true,
            // Case-sensitive substring over title, body, and the
            // comma-joined tags.
            Some(q) => {
                let haystack = format!("{} {} {}", post.title, post.body, post.tags.join(","));
                haystack.contains(q)
            }
        }
    }
}

/// Filters and orders a collection for display: newest first, ties kept
/// in collection order (stable sort).
pub fn select<'a>(posts: &'a [Post], filter: &FeedFilter) -> Vec<&'a Post> {
    let mut selected: Vec<&Post> = posts
        .iter()
        .filter(|p| filter.group_matches(p) && filter.query_matches(p))
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}
