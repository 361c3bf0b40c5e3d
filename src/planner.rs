//! Pure derivation and bookkeeping over a post collection: type/search
//! filtering, per-day bucketing, and create/update/delete. Every function
//! takes the collection by reference and returns a new value; nothing here
//! holds state between calls.

use crate::post::{ContentPost, PostDraft, PostPatch, TypeFilter};
use crate::post_validation::{self, PostValidationError};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Malformed or missing required fields on create/update. Recoverable:
    /// the caller re-prompts the user.
    Validation(String),
    /// A mutation referenced an id absent from the collection (stale view,
    /// double submit). Recoverable: the caller refreshes its view.
    NotFound(String),
}

impl PlannerError {
    fn validation(message: impl Into<String>) -> Self {
        PlannerError::Validation(message.into())
    }

    fn not_found(id: impl Into<String>) -> Self {
        PlannerError::NotFound(id.into())
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Validation(message) => write!(f, "invalid post: {message}"),
            PlannerError::NotFound(id) => write!(f, "post {id} not found"),
        }
    }
}

impl std::error::Error for PlannerError {}

impl From<PostValidationError> for PlannerError {
    fn from(value: PostValidationError) -> Self {
        PlannerError::Validation(value.to_string())
    }
}

/// Applies the type filter and the case-insensitive content search, keeping
/// input order. `TypeFilter::All` with an empty search term is the identity.
pub fn filter_posts(posts: &[ContentPost], filter: TypeFilter, search: &str) -> Vec<ContentPost> {
    let needle = search.to_lowercase();
    posts
        .iter()
        .filter(|post| filter.matches(post.post_type))
        .filter(|post| needle.is_empty() || post.content.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Posts scheduled on exactly `date`, in the order they appear in the input.
pub fn posts_for_date(posts: &[ContentPost], date: NaiveDate) -> Vec<ContentPost> {
    posts
        .iter()
        .filter(|post| post.date == date)
        .cloned()
        .collect()
}

pub fn find_post<'a>(posts: &'a [ContentPost], id: &str) -> Option<&'a ContentPost> {
    posts.iter().find(|post| post.id == id)
}

/// Fresh id for a new post: one past the highest numeric id currently in the
/// collection. Non-numeric ids are skipped, so a collection seeded with
/// opaque ids still gets unique numeric ones.
pub fn next_post_id(posts: &[ContentPost]) -> String {
    let max = posts
        .iter()
        .filter_map(|post| post.id.trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

fn parse_draft_date(input: &str) -> Result<NaiveDate, PlannerError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| PlannerError::validation(format!("invalid date '{input}' (expected YYYY-MM-DD)")))
}

/// Validates the draft, assigns a fresh id, and appends. Returns the new
/// collection together with the created post.
pub fn create_post(
    posts: &[ContentPost],
    draft: &PostDraft,
) -> Result<(Vec<ContentPost>, ContentPost), PlannerError> {
    let date = parse_draft_date(&draft.date)?;
    let post = ContentPost::new(
        next_post_id(posts),
        date,
        draft.time.trim(),
        draft.content.clone(),
        draft.post_type,
    );
    post_validation::validate_post(&post)?;

    let mut updated = posts.to_vec();
    updated.push(post.clone());
    Ok((updated, post))
}

/// Merges `patch` over the post with the given id, preserving the id and any
/// unmentioned fields.
pub fn update_post(
    posts: &[ContentPost],
    id: &str,
    patch: &PostPatch,
) -> Result<Vec<ContentPost>, PlannerError> {
    let index = posts
        .iter()
        .position(|post| post.id == id)
        .ok_or_else(|| PlannerError::not_found(id))?;

    let mut post = posts[index].clone();
    if let Some(post_type) = patch.post_type {
        post.post_type = post_type;
    }
    if let Some(ref content) = patch.content {
        post.content = content.clone();
    }
    if let Some(ref date) = patch.date {
        post.date = parse_draft_date(date)?;
    }
    if let Some(ref time) = patch.time {
        post.time = time.trim().to_string();
    }
    post_validation::validate_post(&post)?;

    let mut updated = posts.to_vec();
    updated[index] = post;
    Ok(updated)
}

/// Removes the post with the given id. Deliberately not idempotent: a second
/// delete of the same id fails with `NotFound` so callers can tell a stale
/// view from a no-op.
pub fn delete_post(posts: &[ContentPost], id: &str) -> Result<Vec<ContentPost>, PlannerError> {
    if find_post(posts, id).is_none() {
        return Err(PlannerError::not_found(id));
    }
    Ok(posts
        .iter()
        .filter(|post| post.id != id)
        .cloned()
        .collect())
}
