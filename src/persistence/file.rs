use super::{PersistenceError, PersistenceResult};
use crate::post::{ContentPost, PostType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub fn save_posts_to_json<P: AsRef<Path>>(posts: &[ContentPost], path: P) -> PersistenceResult<()> {
    super::validate_posts(posts)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, posts)?;
    Ok(())
}

pub fn load_posts_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<ContentPost>> {
    let file = File::open(path)?;
    let posts: Vec<ContentPost> = serde_json::from_reader(file)?;
    super::validate_posts(&posts)?;
    Ok(posts)
}

/// Flat row shape for CSV export. Everything is text; dates and types are
/// re-validated on the way back in.
#[derive(Default, Serialize, Deserialize)]
struct PostCsvRecord {
    id: String,
    date: String,
    time: String,
    content: String,
    #[serde(rename = "type")]
    post_type: String,
}

impl From<&ContentPost> for PostCsvRecord {
    fn from(post: &ContentPost) -> Self {
        Self {
            id: post.id.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            time: post.time.clone(),
            content: post.content.clone(),
            post_type: post.post_type.as_str().to_string(),
        }
    }
}

impl PostCsvRecord {
    fn into_post(self) -> PersistenceResult<ContentPost> {
        let date = parse_date(&self.date)?;
        let post_type = PostType::from_str(self.post_type.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid post type '{}'", self.post_type))
        })?;
        Ok(ContentPost::new(
            self.id,
            date,
            self.time,
            self.content,
            post_type,
        ))
    }
}

pub fn save_posts_to_csv<P: AsRef<Path>>(posts: &[ContentPost], path: P) -> PersistenceResult<()> {
    super::validate_posts(posts)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for post in posts {
        writer.serialize(PostCsvRecord::from(post))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_posts_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<ContentPost>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut posts = Vec::new();
    for record in reader.deserialize::<PostCsvRecord>() {
        posts.push(record?.into_post()?);
    }
    super::validate_posts(&posts)?;
    Ok(posts)
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
