use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Content category tag for a scheduled post. Used only for filtering and
/// display; carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Text,
    Image,
    Link,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Text => "text",
            PostType::Image => "image",
            PostType::Link => "link",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "text" => Some(PostType::Text),
            "image" => Some(PostType::Image),
            "link" => Some(PostType::Link),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type filter applied when deriving calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(PostType),
}

impl TypeFilter {
    /// Parses the filter values the UI select box offers ("all" plus the
    /// post types).
    pub fn from_str(value: &str) -> Option<Self> {
        if value == "all" {
            return Some(TypeFilter::All);
        }
        PostType::from_str(value).map(TypeFilter::Only)
    }

    pub fn matches(&self, post_type: PostType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == post_type,
        }
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        TypeFilter::All
    }
}

/// A single scheduled post record.
///
/// `time` is an advisory local time-of-day string (`HH:MM`); posts within a
/// day keep insertion order and are never re-sorted by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPost {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
}

impl ContentPost {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
        content: impl Into<String>,
        post_type: PostType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            time: time.into(),
            content: content.into(),
            post_type,
        }
    }
}

/// Form payload for creating a post. The date arrives as text from a date
/// input and is validated when the post is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub content: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            post_type: PostType::Text,
            content: String::new(),
            date: String::new(),
            time: String::new(),
        }
    }
}

/// Partial update for an existing post. Absent fields are left unchanged;
/// the id is never part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Demo collection used by the CLI `seed` command and the test suite.
pub fn sample_posts() -> Vec<ContentPost> {
    let d = |day| NaiveDate::from_ymd_opt(2024, 10, day).unwrap();
    vec![
        ContentPost::new(
            "1",
            d(21),
            "09:00",
            "Exciting news! We're launching a new product next week. Stay tuned! #NewProduct #Innovation",
            PostType::Text,
        ),
        ContentPost::new(
            "2",
            d(22),
            "14:00",
            "Check out our latest blog post on industry trends. Link in bio. #IndustryInsights #BlogPost",
            PostType::Link,
        ),
        ContentPost::new(
            "3",
            d(23),
            "11:00",
            "Team building activity - rock climbing!",
            PostType::Image,
        ),
        ContentPost::new(
            "4",
            d(24),
            "16:00",
            "We're hiring! Join our dynamic team and be part of something great. #JobOpening #Careers",
            PostType::Text,
        ),
        ContentPost::new(
            "5",
            d(25),
            "10:00",
            "Throwback to last year's company retreat. Great memories! #TBT #CompanyCulture",
            PostType::Image,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_type_round_trips_through_str() {
        for ty in [PostType::Text, PostType::Image, PostType::Link] {
            assert_eq!(PostType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(PostType::from_str("video"), None);
    }

    #[test]
    fn type_filter_parses_all_and_types() {
        assert_eq!(TypeFilter::from_str("all"), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::from_str("image"),
            Some(TypeFilter::Only(PostType::Image))
        );
        assert_eq!(TypeFilter::from_str("carousel"), None);
    }

    #[test]
    fn post_serializes_type_under_legacy_key() {
        let post = sample_posts().remove(0);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["date"], "2024-10-21");
    }
}
