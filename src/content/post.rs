//! Post records returned by the blog content service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Language;

/// A post as it appears in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// URL-friendly identifier
    pub slug: String,

    pub title: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub featured_image_url: Option<String>,

    /// Language the post is written in
    #[serde(default)]
    pub language: Language,

    pub created_at: DateTime<Utc>,
}

/// A single post with its rendered body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Sanitized HTML body, rendered by the content service
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// One page of a post listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub items: Vec<PostSummary>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page: u32,
}

impl Default for PostPage {
    fn default() -> Self {
        Self::empty()
    }
}

impl PostPage {
    /// The snapshot used when nothing could be fetched
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 1,
            page: 1,
        }
    }

    /// Slice one page out of a full, already ordered result set
    pub fn paginate(all: Vec<PostSummary>, page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1) as usize;
        let total_count = all.len() as u64;
        let total_pages = total_pages_for(total_count, page_size as u32);

        let start = (page as usize - 1).saturating_mul(page_size);
        let items = all.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            total_count,
            total_pages,
            page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of pages needed for `total_count` items, never less than one
pub fn total_pages_for(total_count: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    total_count.div_ceil(page_size).max(1) as u32
}
