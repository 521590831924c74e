//! List helper functions for post cards and pagination

use super::date::time_tag;
use super::html::{html_escape, truncate};
use crate::config::{Language, PaginationVariant, SiteConfiguration};
use crate::content::PostSummary;
use crate::i18n::I18n;

/// Most page numbers shown at once by the paginator
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Longest excerpt shown on a card, in characters
const EXCERPT_LENGTH: usize = 180;

struct PagerLabels {
    first: String,
    prev: String,
    next: String,
    last: String,
}

fn pager_labels(variant: PaginationVariant, i18n: &I18n) -> PagerLabels {
    let text = |key: &str| html_escape(i18n.get(key));
    match variant {
        PaginationVariant::Text => PagerLabels {
            first: text("first"),
            prev: text("previous"),
            next: text("next"),
            last: text("last"),
        },
        PaginationVariant::Icon | PaginationVariant::Simple => PagerLabels {
            first: "«".to_string(),
            prev: "‹".to_string(),
            next: "›".to_string(),
            last: "»".to_string(),
        },
        PaginationVariant::Mixed => PagerLabels {
            first: format!("« {}", text("first")),
            prev: format!("‹ {}", text("previous")),
            next: format!("{} ›", text("next")),
            last: format!("{} »", text("last")),
        },
    }
}

/// First and last page number of the visible window around `current`
pub fn visible_pages(current: u32, total: u32, max_visible: u32) -> (u32, u32) {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let max_visible = max_visible.max(1);

    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    (start, end)
}

fn pager_link(class: &str, label: &str, target: Option<String>) -> String {
    match target {
        Some(href) => format!(
            r#"<a class="{}" href="{}">{}</a>"#,
            class,
            html_escape(&href),
            label
        ),
        None => format!(r#"<span class="{} disabled">{}</span>"#, class, label),
    }
}

/// Generate the pagination control.
///
/// `link` maps a page number to its URL. Nothing is rendered for a
/// single page.
pub fn paginator(
    current: u32,
    total_pages: u32,
    total_count: u64,
    variant: PaginationVariant,
    i18n: &I18n,
    link: &dyn Fn(u32) -> String,
) -> String {
    if total_pages <= 1 {
        return String::new();
    }

    let labels = pager_labels(variant, i18n);
    let current = current.clamp(1, total_pages);
    let target = |page: u32, enabled: bool| enabled.then(|| link(page));

    let mut html = format!(
        r#"<nav class="pagination pagination-{}" aria-label="pagination">"#,
        variant
    );

    html.push_str(&format!(
        r#"<span class="pagination-info">{}</span>"#,
        html_escape(&i18n.page_info(current, total_pages, total_count))
    ));

    if variant != PaginationVariant::Simple {
        html.push_str(&pager_link(
            "pagination-first",
            &labels.first,
            target(1, current > 1),
        ));
    }
    html.push_str(&pager_link(
        "pagination-prev",
        &labels.prev,
        target(current - 1, current > 1),
    ));

    if variant == PaginationVariant::Simple {
        html.push_str(&format!(
            r#"<span class="pagination-current">{} / {}</span>"#,
            current, total_pages
        ));
    } else {
        let (start, end) = visible_pages(current, total_pages, MAX_VISIBLE_PAGES);
        html.push_str(r#"<span class="pagination-numbers">"#);
        for page in start..=end {
            if page == current {
                html.push_str(&format!(
                    r#"<span class="pagination-number current" aria-current="page">{}</span>"#,
                    page
                ));
            } else {
                html.push_str(&format!(
                    r#"<a class="pagination-number" href="{}">{}</a>"#,
                    html_escape(&link(page)),
                    page
                ));
            }
        }
        html.push_str("</span>");
    }

    html.push_str(&pager_link(
        "pagination-next",
        &labels.next,
        target(current + 1, current < total_pages),
    ));
    if variant != PaginationVariant::Simple {
        html.push_str(&pager_link(
            "pagination-last",
            &labels.last,
            target(total_pages, current < total_pages),
        ));
    }

    html.push_str("</nav>");
    html
}

/// Render one post card, honouring the content display toggles
pub fn post_card(post: &PostSummary, config: &SiteConfiguration, language: Language, href: &str) -> String {
    let content = &config.content;
    let mut html = format!(
        r#"<article class="bf-card"><a class="bf-card-link" href="{}">"#,
        html_escape(href)
    );

    if let Some(image) = &post.featured_image_url {
        html.push_str(&format!(
            r#"<img class="bf-card-image" src="{}" alt="{}" loading="lazy">"#,
            html_escape(image),
            html_escape(&post.title)
        ));
    }

    if content.show_category {
        if let Some(category) = &post.category {
            html.push_str(&format!(
                r#"<span class="bf-card-category">{}</span>"#,
                html_escape(category)
            ));
        }
    }

    if content.show_card_title {
        html.push_str(&format!(
            r#"<h3 class="bf-card-title">{}</h3>"#,
            html_escape(&post.title)
        ));
    }

    if content.show_excerpt {
        if let Some(excerpt) = &post.excerpt {
            html.push_str(&format!(
                r#"<p class="bf-card-excerpt">{}</p>"#,
                html_escape(&truncate(excerpt, EXCERPT_LENGTH, None))
            ));
        }
    }

    if content.show_date {
        html.push_str(&format!(
            r#"<div class="bf-card-date">{}</div>"#,
            time_tag(&post.created_at, language)
        ));
    }

    html.push_str("</a></article>");
    html
}

/// Render a list of post cards in the configured view mode
pub fn post_list(
    posts: &[PostSummary],
    config: &SiteConfiguration,
    language: Language,
    i18n: &I18n,
    href: &dyn Fn(&PostSummary) -> String,
) -> String {
    if posts.is_empty() {
        return format!(
            r#"<p class="bf-empty">{}</p>"#,
            html_escape(i18n.get("no_posts"))
        );
    }

    let mut html = format!(
        r#"<div class="bf-post-list bf-view-{}">"#,
        config.view_mode
    );
    for post in posts {
        html.push_str(&post_card(post, config, language, &href(post)));
    }
    html.push_str("</div>");
    html
}
