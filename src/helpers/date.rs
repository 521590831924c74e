//! Date helper functions

use chrono::{DateTime, Utc};

use super::html::strip_html;
use crate::config::Language;

/// Average reading speed used for reading-time estimates
const WORDS_PER_MINUTE: usize = 200;

/// Format a post date the way readers of `language` expect
///
/// # Examples
/// ```ignore
/// format_post_date(&date, Language::En) // -> "March 1, 2024"
/// format_post_date(&date, Language::Zh) // -> "2024年3月1日"
/// ```
pub fn format_post_date(date: &DateTime<Utc>, language: Language) -> String {
    let format = match language {
        Language::Zh | Language::Ja => "%Y年%-m月%-d日",
        Language::Ko => "%Y년 %-m월 %-d일",
        _ => "%B %-d, %Y",
    };
    date.format(format).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Generate a <time> HTML element
pub fn time_tag(date: &DateTime<Utc>, language: Language) -> String {
    format!(
        r#"<time datetime="{}">{}</time>"#,
        date_xml(date),
        format_post_date(date, language)
    )
}

/// Estimated minutes needed to read an HTML body, at least one
pub fn reading_time(html: &str) -> usize {
    let words = strip_html(html).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
