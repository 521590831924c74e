//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::Language;

/// Characters left unescaped by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a value for use inside a query string
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Public URL of a post
///
/// # Examples
/// ```ignore
/// post_url("https://blog.example.com/", "hello") // -> "https://blog.example.com/posts/hello"
/// ```
pub fn post_url(origin: &str, slug: &str) -> String {
    format!(
        "{}/posts/{}",
        origin.trim_end_matches('/'),
        encode_component(slug)
    )
}

/// Link to a listing page, omitting parameters that match the defaults
pub fn listing_url(page: u32, search: &str, language: Language, default_language: Language) -> String {
    let mut params = Vec::new();
    if page > 1 {
        params.push(format!("page={}", page));
    }
    let search = search.trim();
    if !search.is_empty() {
        params.push(format!("q={}", encode_component(search)));
    }
    if language != default_language {
        params.push(format!("lang={}", language));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Social networks a post can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    X,
    LinkedIn,
    Xiaohongshu,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Facebook,
        SharePlatform::X,
        SharePlatform::LinkedIn,
        SharePlatform::Xiaohongshu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "Facebook",
            SharePlatform::X => "X",
            SharePlatform::LinkedIn => "LinkedIn",
            SharePlatform::Xiaohongshu => "Xiaohongshu",
        }
    }

    /// Share intent URL for a page
    pub fn share_url(&self, url: &str, title: &str) -> String {
        let url = encode_component(url);
        let title = encode_component(title);
        match self {
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={}", url)
            }
            SharePlatform::X => format!("https://twitter.com/intent/tweet?url={}&text={}", url, title),
            SharePlatform::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url)
            }
            SharePlatform::Xiaohongshu => format!(
                "https://www.xiaohongshu.com/explore?source=web_share&url={}&title={}",
                url, title
            ),
        }
    }
}
