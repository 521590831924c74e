//! Blog content: post records and the content source seam

pub mod post;
pub mod source;

pub use post::{total_pages_for, PostDetail, PostPage, PostSummary};
pub use source::{ContentFetchError, ContentSource, FixtureSource, ListingQuery, SearchField};
