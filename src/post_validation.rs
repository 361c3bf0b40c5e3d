use crate::post::ContentPost;
use chrono::NaiveTime;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct PostValidationError {
    message: String,
}

impl PostValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PostValidationError {}

pub fn validate_post(post: &ContentPost) -> Result<(), PostValidationError> {
    if post.id.trim().is_empty() {
        return Err(PostValidationError::new("post requires a non-empty id"));
    }

    if post.content.trim().is_empty() {
        return Err(PostValidationError::new(format!(
            "post {} has empty content",
            post.id
        )));
    }

    // The time is advisory; when present it still has to be a real HH:MM.
    if !post.time.trim().is_empty()
        && NaiveTime::parse_from_str(post.time.trim(), "%H:%M").is_err()
    {
        return Err(PostValidationError::new(format!(
            "post {} has invalid time '{}' (expected HH:MM)",
            post.id, post.time
        )));
    }

    Ok(())
}

pub fn validate_post_collection(posts: &[ContentPost]) -> Result<(), PostValidationError> {
    let mut seen_ids = HashSet::with_capacity(posts.len());
    for post in posts {
        if !seen_ids.insert(post.id.as_str()) {
            return Err(PostValidationError::new(format!(
                "duplicate post id {}",
                post.id
            )));
        }
        validate_post(post)?;
    }
    Ok(())
}
