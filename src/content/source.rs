//! Seam to the external blog content service

use std::fs;
use std::future::Future;
use std::path::Path;
use thiserror::Error;

use super::post::{PostDetail, PostPage, PostSummary};
use crate::config::Language;

/// Errors reported by a content source
#[derive(Error, Debug)]
pub enum ContentFetchError {
    #[error("content service unavailable: {0}")]
    Unavailable(String),

    #[error("post not found: {0}")]
    NotFound(String),

    #[error("malformed content response: {0}")]
    Malformed(String),
}

/// Post fields a search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Excerpt,
    Category,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Excerpt, SearchField::Category];

    fn value<'a>(&self, post: &'a PostSummary) -> Option<&'a str> {
        match self {
            SearchField::Title => Some(post.title.as_str()),
            SearchField::Excerpt => post.excerpt.as_deref(),
            SearchField::Category => post.category.as_deref(),
        }
    }
}

/// Parameters of a paginated listing request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    pub language: Language,
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub search_fields: Vec<SearchField>,
}

impl ListingQuery {
    pub fn new(language: Language, page: u32, page_size: u32) -> Self {
        Self {
            language,
            page: page.max(1),
            page_size: page_size.max(1),
            search: None,
            search_fields: Vec::new(),
        }
    }

    /// Search title, excerpt and category for `term`; blank terms clear the search
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            self.search = None;
            self.search_fields.clear();
        } else {
            self.search = Some(term.to_string());
            self.search_fields = SearchField::ALL.to_vec();
        }
        self
    }

    /// Whether `post` satisfies the search part of this query
    pub fn matches(&self, post: &PostSummary) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();
        self.search_fields.iter().any(|field| {
            field
                .value(post)
                .map(|v| v.to_lowercase().contains(&term))
                .unwrap_or(false)
        })
    }
}

/// A provider of blog posts.
///
/// The production implementation is the hosted blog service; retries and
/// response translation live behind this trait.
pub trait ContentSource: Send + Sync + 'static {
    /// Fetch one page of posts
    fn list_posts(
        &self,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<PostPage, ContentFetchError>> + Send;

    /// Fetch a single post by slug
    fn get_post(
        &self,
        slug: &str,
        language: Language,
    ) -> impl Future<Output = Result<PostDetail, ContentFetchError>> + Send;
}

/// Content source backed by a JSON array of posts
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    posts: Vec<PostDetail>,
}

impl FixtureSource {
    pub fn new(posts: Vec<PostDetail>) -> Self {
        Self { posts }
    }

    /// Load posts from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ContentFetchError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ContentFetchError::Unavailable(format!("{:?}: {}", path, e)))?;
        let posts: Vec<PostDetail> = serde_json::from_str(&content)
            .map_err(|e| ContentFetchError::Malformed(format!("{:?}: {}", path, e)))?;

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), path);
        Ok(Self::new(posts))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl ContentSource for FixtureSource {
    async fn list_posts(&self, query: &ListingQuery) -> Result<PostPage, ContentFetchError> {
        let mut matching: Vec<PostSummary> = self
            .posts
            .iter()
            .map(|p| &p.summary)
            .filter(|p| p.language == query.language && query.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(PostPage::paginate(matching, query.page, query.page_size))
    }

    async fn get_post(&self, slug: &str, language: Language) -> Result<PostDetail, ContentFetchError> {
        let mut candidates = self.posts.iter().filter(|p| p.summary.slug == slug);
        let first = candidates.next();

        // Prefer the requested translation, else any post with this slug
        first
            .into_iter()
            .chain(candidates)
            .find(|p| p.summary.language == language)
            .or(first)
            .cloned()
            .ok_or_else(|| ContentFetchError::NotFound(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn detail(slug: &str, title: &str, language: Language, day: u32) -> PostDetail {
        PostDetail {
            summary: PostSummary {
                slug: slug.to_string(),
                title: title.to_string(),
                excerpt: Some(format!("About {}", title)),
                category: Some("Engineering".to_string()),
                featured_image_url: None,
                language,
                created_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            },
            content: format!("<p>{}</p>", title),
            author: None,
            tags: Vec::new(),
        }
    }

    fn source() -> FixtureSource {
        FixtureSource::new(vec![
            detail("rust", "Learning Rust", Language::En, 1),
            detail("tokio", "Async with Tokio", Language::En, 2),
            detail("axum", "Serving with Axum", Language::En, 3),
            detail("rust", "学习 Rust", Language::Zh, 4),
        ])
    }

    #[test]
    fn test_query_with_search() {
        let query = ListingQuery::new(Language::En, 0, 12).with_search("  tokio ");
        assert_eq!(query.page, 1);
        assert_eq!(query.search.as_deref(), Some("tokio"));
        assert_eq!(query.search_fields.len(), 3);

        let cleared = query.with_search("   ");
        assert_eq!(cleared.search, None);
        assert!(cleared.search_fields.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_language_and_orders_newest_first() {
        let page = source()
            .list_posts(&ListingQuery::new(Language::En, 1, 2))
            .await
            .unwrap();

        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
        let slugs: Vec<_> = page.items.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["axum", "tokio"]);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let query = ListingQuery::new(Language::En, 1, 12).with_search("AXUM");
        let page = source().list_posts(&query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].slug, "axum");

        let query = ListingQuery::new(Language::En, 1, 12).with_search("engineering");
        assert_eq!(source().list_posts(&query).await.unwrap().total_count, 3);
    }

    #[tokio::test]
    async fn test_get_post_prefers_language() {
        let post = source().get_post("rust", Language::Zh).await.unwrap();
        assert_eq!(post.summary.title, "学习 Rust");

        let post = source().get_post("rust", Language::Fr).await.unwrap();
        assert_eq!(post.summary.title, "Learning Rust");

        let err = source().get_post("missing", Language::En).await.unwrap_err();
        assert!(matches!(err, ContentFetchError::NotFound(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, serde_json::to_string(&source().posts).unwrap()).unwrap();

        let loaded = FixtureSource::from_file(&path).unwrap();
        assert_eq!(loaded.len(), 4);

        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(
            FixtureSource::from_file(&path),
            Err(ContentFetchError::Malformed(_))
        ));
        assert!(matches!(
            FixtureSource::from_file(dir.path().join("nope.json")),
            Err(ContentFetchError::Unavailable(_))
        ));
    }
}
