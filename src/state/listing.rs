//! Post listing state: filters, current page and data precedence

use crate::config::Language;
use crate::content::{total_pages_for, ContentFetchError, ListingQuery, PostPage, PostSummary};

/// Working state of one post listing.
///
/// A listing starts from a server-provided snapshot. Changes go through the
/// update methods, which keep the page index in range for the active
/// filters. Client-fetched data takes precedence over the snapshot once it
/// holds at least one post.
#[derive(Debug, Clone)]
pub struct ListingState {
    initial: PostPage,
    initial_language: Language,
    fetched: Option<PostPage>,
    page: u32,
    page_size: u32,
    search_term: String,
    search_enabled: bool,
    language: Language,
    in_flight: usize,
    error: Option<String>,
}

impl ListingState {
    /// Start from a server-rendered snapshot
    pub fn new(initial: PostPage, language: Language, page_size: u32) -> Self {
        let page = initial.page.max(1);
        Self {
            initial,
            initial_language: language,
            fetched: None,
            page,
            page_size: page_size.max(1),
            search_term: String::new(),
            search_enabled: true,
            language,
            in_flight: 0,
            error: None,
        }
    }

    /// Whether the search term is forwarded to the content source
    pub fn with_search_enabled(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Message of the last failed fetch, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Change the search term. Returns whether it changed; a change resets
    /// the page to 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        self.page = 1;
        true
    }

    /// Change the content language. Returns whether it changed; a change
    /// resets the page to 1.
    pub fn set_language(&mut self, language: Language) -> bool {
        if language == self.language {
            return false;
        }
        self.language = language;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
    }

    fn active_search(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (self.search_enabled && !term.is_empty()).then_some(term)
    }

    /// The request describing what should currently be displayed
    pub fn query(&self) -> ListingQuery {
        let query = ListingQuery::new(self.language, self.page, self.page_size);
        match self.active_search() {
            Some(term) => query.with_search(term),
            None => query,
        }
    }

    /// True once the displayed data can no longer come from the snapshot
    pub fn needs_client_fetch(&self) -> bool {
        self.page != self.initial.page.max(1)
            || self.language != self.initial_language
            || self.active_search().is_some()
    }

    /// Mark a fetch as started and return its query
    pub fn begin_fetch(&mut self) -> ListingQuery {
        self.in_flight += 1;
        self.query()
    }

    /// Record the outcome of a fetch.
    ///
    /// Fetches are not cancelled, so whichever completes last wins. A
    /// failure keeps the data already on display.
    pub fn finish_fetch(&mut self, result: Result<PostPage, ContentFetchError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(page) => {
                self.fetched = Some(page);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Listing fetch failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn fetched_page(&self) -> Option<&PostPage> {
        self.fetched.as_ref()
    }

    /// Posts to display: client data when non-empty, else the snapshot
    pub fn effective_posts(&self) -> &[PostSummary] {
        match self.fetched_page() {
            Some(page) if !page.items.is_empty() => &page.items,
            _ => &self.initial.items,
        }
    }

    pub fn effective_total_count(&self) -> u64 {
        self.fetched_page()
            .map(|p| p.total_count)
            .unwrap_or(self.initial.total_count)
    }

    pub fn effective_total_pages(&self) -> u32 {
        if let Some(page) = self.fetched_page() {
            return page.total_pages.max(1);
        }
        if self.initial.total_pages > 0 {
            self.initial.total_pages
        } else {
            total_pages_for(self.initial.total_count, self.page_size)
        }
    }

    /// Pagination is shown only when there is more than one page
    pub fn shows_pagination(&self) -> bool {
        self.effective_total_pages() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn summary(slug: &str) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            excerpt: None,
            category: None,
            featured_image_url: None,
            language: Language::En,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn page_of(slugs: &[&str], total_count: u64, total_pages: u32, page: u32) -> PostPage {
        PostPage {
            items: slugs.iter().map(|s| summary(s)).collect(),
            total_count,
            total_pages,
            page,
        }
    }

    fn state() -> ListingState {
        ListingState::new(page_of(&["a", "b", "c"], 30, 3, 1), Language::En, 12)
    }

    fn slugs(state: &ListingState) -> Vec<&str> {
        state.effective_posts().iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = state();

        let steps: Vec<Box<dyn Fn(&mut ListingState) -> bool>> = vec![
            Box::new(|s: &mut ListingState| s.set_search_term("rust")),
            Box::new(|s: &mut ListingState| s.set_language(Language::Zh)),
            Box::new(|s: &mut ListingState| s.set_search_term("")),
            Box::new(|s: &mut ListingState| s.set_language(Language::Ja)),
            Box::new(|s: &mut ListingState| s.set_search_term("tokio")),
        ];

        for step in steps {
            state.set_page(3);
            assert!(step(&mut state));
            assert_eq!(state.page(), 1);
        }
    }

    #[test]
    fn test_unchanged_filter_keeps_page() {
        let mut state = state();
        state.set_search_term("rust");
        state.set_page(2);

        assert!(!state.set_search_term("rust"));
        assert!(!state.set_language(Language::En));
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_set_page_is_at_least_one() {
        let mut state = state();
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_empty_client_fetch_keeps_snapshot() {
        let mut state = state();
        state.begin_fetch();
        state.finish_fetch(Ok(PostPage::empty()));

        assert_eq!(slugs(&state), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_client_fetch_takes_precedence() {
        let mut state = state();
        state.set_page(2);
        state.begin_fetch();
        state.finish_fetch(Ok(page_of(&["x", "y"], 14, 2, 2)));

        assert_eq!(slugs(&state), vec!["x", "y"]);
        assert_eq!(state.effective_total_count(), 14);
        assert_eq!(state.effective_total_pages(), 2);
    }

    #[test]
    fn test_failed_fetch_keeps_prior_data() {
        let mut state = state();
        state.begin_fetch();
        state.finish_fetch(Ok(page_of(&["x"], 1, 1, 1)));

        state.begin_fetch();
        assert!(state.is_loading());
        state.finish_fetch(Err(ContentFetchError::Unavailable("timeout".to_string())));

        assert!(!state.is_loading());
        assert_eq!(slugs(&state), vec!["x"]);
        assert!(state.error().unwrap().contains("timeout"));

        state.begin_fetch();
        state.finish_fetch(Ok(page_of(&["z"], 1, 1, 1)));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_last_completed_fetch_wins() {
        let mut state = state();
        state.set_page(2);
        state.begin_fetch();
        state.set_page(3);
        state.begin_fetch();

        state.finish_fetch(Ok(page_of(&["page-3"], 30, 3, 3)));
        assert!(state.is_loading());
        state.finish_fetch(Ok(page_of(&["page-2"], 30, 3, 2)));

        assert!(!state.is_loading());
        assert_eq!(slugs(&state), vec!["page-2"]);
    }

    #[test]
    fn test_total_pages_fallback() {
        let state = ListingState::new(page_of(&["a"], 25, 0, 1), Language::En, 12);
        assert_eq!(state.effective_total_pages(), 3);
        assert!(state.shows_pagination());

        let state = ListingState::new(PostPage::empty(), Language::En, 12);
        assert_eq!(state.effective_total_pages(), 1);
        assert!(!state.shows_pagination());
    }

    #[test]
    fn test_needs_client_fetch() {
        let mut state = state();
        assert!(!state.needs_client_fetch());

        state.set_search_term("   ");
        assert!(!state.needs_client_fetch());

        state.set_search_term("rust");
        assert!(state.needs_client_fetch());

        let mut state = self::state();
        state.set_language(Language::De);
        assert!(state.needs_client_fetch());

        let mut state = self::state();
        state.set_page(2);
        assert!(state.needs_client_fetch());
    }

    #[test]
    fn test_disabled_search_is_not_queried() {
        let mut state = self::state().with_search_enabled(false);
        state.set_page(2);
        state.set_search_term("rust");

        assert_eq!(state.page(), 1);
        assert_eq!(state.query().search, None);
        assert!(!state.needs_client_fetch());
    }

    #[test]
    fn test_query_reflects_state() {
        let mut state = state();
        state.set_language(Language::Fr);
        state.set_search_term("serde");
        state.set_page(4);

        let query = state.query();
        assert_eq!(query.language, Language::Fr);
        assert_eq!(query.page, 4);
        assert_eq!(query.page_size, 12);
        assert_eq!(query.search.as_deref(), Some("serde"));
    }
}
