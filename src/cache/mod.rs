//! Cache for server-rendered listings
//!
//! The page snapshot rendered on each request is fetched from the content
//! service at most once per revalidation window (`revalidateSeconds`).
//! Failed fetches are never cached.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::content::{ListingQuery, PostPage};

#[derive(Debug, Clone)]
struct CacheEntry {
    page: PostPage,
    stored_at: Instant,
}

/// Listing snapshots keyed by the query that produced them
#[derive(Debug, Default)]
pub struct ListingCache {
    entries: Mutex<HashMap<ListingQuery, CacheEntry>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ListingQuery, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return a snapshot younger than `window`. A zero window disables the cache.
    pub fn get(&self, query: &ListingQuery, window: Duration) -> Option<PostPage> {
        if window.is_zero() {
            return None;
        }

        let mut entries = self.entries();
        match entries.get(query) {
            Some(entry) if entry.stored_at.elapsed() < window => {
                tracing::debug!("Listing cache hit for page {}", query.page);
                Some(entry.page.clone())
            }
            Some(_) => {
                entries.remove(query);
                None
            }
            None => None,
        }
    }

    /// Store a freshly fetched snapshot
    pub fn insert(&self, query: ListingQuery, page: PostPage, window: Duration) {
        if window.is_zero() {
            return;
        }
        self.insert_at(query, page, Instant::now());
    }

    fn insert_at(&self, query: ListingQuery, page: PostPage, stored_at: Instant) {
        self.entries().insert(query, CacheEntry { page, stored_at });
    }

    /// Drop every snapshot, e.g. after the configuration changed
    pub fn clear(&self) {
        let mut entries = self.entries();
        if !entries.is_empty() {
            tracing::debug!("Clearing {} cached listings", entries.len());
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
