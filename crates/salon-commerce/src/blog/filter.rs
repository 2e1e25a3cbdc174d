//! Admin list filtering and summary counts.

use crate::blog::{BlogCategory, BlogPost, PostStatus};
use std::cmp::Reverse;

/// Filters applied to the admin post list. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub search: String,
    pub category: Option<BlogCategory>,
    pub status: Option<PostStatus>,
}

impl PostFilter {
    pub fn matches(&self, post: &BlogPost) -> bool {
        self.category.map_or(true, |c| post.category == c)
            && self.status.map_or(true, |s| post.status == s)
            && post.matches_text(&self.search)
    }

    /// Matching posts, newest publish date first; undated posts last.
    pub fn apply<'a>(&self, posts: &'a [BlogPost]) -> Vec<&'a BlogPost> {
        let mut visible: Vec<&BlogPost> = posts.iter().filter(|p| self.matches(p)).collect();
        visible.sort_by_key(|p| (p.publish_date.is_none(), Reverse(p.publish_date)));
        visible
    }
}

/// Summary counts shown above the admin list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub scheduled: usize,
    pub archived: usize,
    pub total_views: u64,
}

impl PostStats {
    pub fn from_posts(posts: &[BlogPost]) -> Self {
        posts.iter().fold(PostStats::default(), |mut stats, post| {
            stats.total += 1;
            stats.total_views += post.metrics.views;
            match post.status {
                PostStatus::Published => stats.published += 1,
                PostStatus::Draft => stats.drafts += 1,
                PostStatus::Scheduled => stats.scheduled += 1,
                PostStatus::Archived => stats.archived += 1,
            }
            stats
        })
    }
}
