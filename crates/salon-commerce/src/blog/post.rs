//! Blog post model for the content admin.

use crate::ids::PostId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Words per minute used for the read-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Editorial category of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlogCategory {
    #[default]
    HairCare,
    Skincare,
    Makeup,
    Nails,
    Wellness,
    Trends,
}

impl BlogCategory {
    pub const ALL: [BlogCategory; 6] = [
        BlogCategory::HairCare,
        BlogCategory::Skincare,
        BlogCategory::Makeup,
        BlogCategory::Nails,
        BlogCategory::Wellness,
        BlogCategory::Trends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::HairCare => "hair-care",
            BlogCategory::Skincare => "skincare",
            BlogCategory::Makeup => "makeup",
            BlogCategory::Nails => "nails",
            BlogCategory::Wellness => "wellness",
            BlogCategory::Trends => "trends",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlogCategory::HairCare => "Hair Care",
            BlogCategory::Skincare => "Skincare",
            BlogCategory::Makeup => "Makeup",
            BlogCategory::Nails => "Nails",
            BlogCategory::Wellness => "Wellness",
            BlogCategory::Trends => "Beauty Trends",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }
}

impl fmt::Display for BlogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
    Archived,
}

impl PostStatus {
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::Published,
        PostStatus::Scheduled,
        PostStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Published => "Published",
            PostStatus::Scheduled => "Scheduled",
            PostStatus::Archived => "Archived",
        }
    }

    /// Badge colour for the admin list.
    pub fn badge_color(&self) -> &'static str {
        match self {
            PostStatus::Draft => "#6b7280",
            PostStatus::Published => "#16a34a",
            PostStatus::Scheduled => "#2563eb",
            PostStatus::Archived => "#9ca3af",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.trim())
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub status: PostStatus,
    pub author: String,
    /// Lower-case, de-duplicated, in insertion order.
    pub tags: Vec<String>,
    pub publish_date: Option<NaiveDate>,
    pub featured: bool,
    pub metrics: PostMetrics,
}

impl BlogPost {
    /// Estimated read time, never less than one minute.
    pub fn read_time_minutes(&self) -> usize {
        let words = self.content.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1)
    }

    /// Case-insensitive match on title, excerpt, author, or any tag.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.excerpt.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.contains(&needle))
    }
}

/// Turn a title into a URL-safe slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> BlogPost {
        BlogPost {
            id: PostId::new("post-1"),
            title: "Summer Hair Rescue".to_string(),
            slug: slugify("Summer Hair Rescue"),
            excerpt: "Beat the frizz".to_string(),
            content: content.to_string(),
            category: BlogCategory::HairCare,
            status: PostStatus::Published,
            author: "Maya Lopez".to_string(),
            tags: vec!["summer".to_string(), "frizz".to_string()],
            publish_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            featured: false,
            metrics: PostMetrics::default(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Summer Hair Rescue!"), "summer-hair-rescue");
        assert_eq!(slugify("  10 Tips -- for   Nails "), "10-tips-for-nails");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_read_time() {
        assert_eq!(post("").read_time_minutes(), 1);
        assert_eq!(post(&"word ".repeat(450)).read_time_minutes(), 3);
    }

    #[test]
    fn test_matches_text() {
        let p = post("body");
        assert!(p.matches_text("HAIR"));
        assert!(p.matches_text("frizz"));
        assert!(p.matches_text("maya"));
        assert!(p.matches_text("  "));
        assert!(!p.matches_text("lipstick"));
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&PostStatus::Scheduled).unwrap(), "\"scheduled\"");
        assert_eq!(serde_json::to_string(&BlogCategory::HairCare).unwrap(), "\"hair-care\"");
    }
}
