//! Public pages: the post listing and post detail

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::config::{Language, SiteConfiguration};
use crate::content::{ContentFetchError, ContentSource, PostDetail, PostSummary};
use crate::helpers::{
    encode_component, html_escape, listing_url, open_graph, page_document, paginator, post_list,
    post_url, reading_time, share_toolbar, time_tag, truncate,
};
use crate::i18n::I18n;
use crate::state::{ListingState, ModalState};

/// Copies `data-url` of a `.bf-copy-link` button and shows its `data-copied` label
const COPY_LINK_SCRIPT: &str = r#"<script>
document.querySelectorAll('.bf-copy-link').forEach(function(button) {
    button.addEventListener('click', function() {
        navigator.clipboard.writeText(button.dataset.url).then(function() {
            var label = button.textContent;
            button.textContent = button.dataset.copied;
            setTimeout(function() { button.textContent = label; }, 2000);
        });
    });
});
</script>"#;

/// Query parameters accepted by the listing page.
///
/// Values are kept as strings so a bad value is ignored instead of
/// rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub q: Option<String>,
    pub lang: Option<String>,
    /// Slug of the post shown in the detail overlay
    pub post: Option<String>,
}

/// Query parameters accepted by the detail page
#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    pub lang: Option<String>,
}

fn parse_language(value: Option<&str>) -> Option<Language> {
    value.and_then(|v| v.parse().ok())
}

/// Append one query parameter to a root-relative URL
pub(crate) fn with_param(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, key, encode_component(value))
}

/// Apply request parameters to a listing built from the server snapshot
pub(crate) fn reconcile(listing: &mut ListingState, params: &ListingParams) {
    if let Some(language) = parse_language(params.lang.as_deref()) {
        listing.set_language(language);
    }
    if let Some(term) = &params.q {
        listing.set_search_term(term.as_str());
    }
    if let Some(page) = params.page.as_deref().and_then(|p| p.trim().parse().ok()) {
        listing.set_page(page);
    }
}

/// `GET /`
pub async fn listing<S: ContentSource>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListingParams>,
) -> Html<String> {
    let config = state.config_or_default().await;
    let (initial, snapshot_error) = state.snapshot(&config).await;

    let mut listing = ListingState::new(initial, config.language, config.page_size)
        .with_search_enabled(config.search.enabled);
    reconcile(&mut listing, &params);

    let fetched = refresh(&state.source, &mut listing).await;

    let mut modal = ModalState::new();
    let overlay = open_overlay(
        &state.source,
        &mut modal,
        params.post.as_deref(),
        listing.language(),
    )
    .await;

    // Once the client fetch has run its outcome replaces the snapshot's
    let error = if fetched {
        listing.error()
    } else {
        snapshot_error.as_deref()
    };
    let body = render_listing(
        &config,
        &listing,
        error,
        overlay.as_ref(),
        &state.public_url,
    );

    let i18n = I18n::new(listing.language());
    Html(page_document(
        &config,
        &i18n,
        &config.title,
        "",
        &body,
        modal.scroll_locked(),
    ))
}

/// Fetch the listing again when the request moved it off the snapshot.
///
/// Returns whether a fetch ran.
pub(crate) async fn refresh<S: ContentSource>(source: &S, listing: &mut ListingState) -> bool {
    if !listing.needs_client_fetch() {
        return false;
    }
    let query = listing.begin_fetch();
    let result = source.list_posts(&query).await;
    listing.finish_fetch(result);
    true
}

/// Open the detail overlay for `slug`, closing it again if the post cannot
/// be fetched
pub(crate) async fn open_overlay<S: ContentSource>(
    source: &S,
    modal: &mut ModalState,
    slug: Option<&str>,
    language: Language,
) -> Option<PostDetail> {
    let slug = slug.map(str::trim).filter(|s| !s.is_empty())?;
    modal.open(slug);
    match source.get_post(slug, language).await {
        Ok(detail) => Some(detail),
        Err(e) => {
            tracing::warn!("Failed to open post {}: {}", slug, e);
            modal.close();
            None
        }
    }
}

fn render_error(i18n: &I18n, message: &str) -> String {
    format!(
        r#"<div class="bf-error" role="alert"><strong>{}:</strong> {}<p class="bf-error-hint">{}</p></div>"#,
        html_escape(i18n.get("load_failed")),
        html_escape(message),
        html_escape(i18n.get("api_key_hint"))
    )
}

fn render_listing(
    config: &SiteConfiguration,
    listing: &ListingState,
    error: Option<&str>,
    overlay: Option<&PostDetail>,
    public_url: &str,
) -> String {
    let language = listing.language();
    let i18n = I18n::new(language);
    let term = if listing.search_enabled() {
        listing.search_term()
    } else {
        ""
    };
    let here = listing_url(listing.page(), term, language, config.language);

    let mut html = format!(
        r#"<header class="bf-header"><h1>{}</h1>"#,
        html_escape(&config.title)
    );
    if let Some(description) = config.description() {
        html.push_str(&format!(
            r#"<p class="bf-description">{}</p>"#,
            html_escape(description)
        ));
    }
    html.push_str("</header>");

    html.push_str(r#"<nav class="bf-languages">"#);
    for lang in Language::ALL {
        let class = if *lang == language { " current" } else { "" };
        html.push_str(&format!(
            r#"<a class="bf-language{}" href="{}" hreflang="{}">{}</a>"#,
            class,
            html_escape(&listing_url(1, term, *lang, config.language)),
            lang,
            lang.label()
        ));
    }
    html.push_str("</nav>");

    if listing.search_enabled() {
        html.push_str(r#"<form class="bf-search" method="get" action="/">"#);
        if language != config.language {
            html.push_str(&format!(
                r#"<input type="hidden" name="lang" value="{}">"#,
                language
            ));
        }
        html.push_str(&format!(
            r#"<input type="search" name="q" value="{}" placeholder="{}"><button type="submit">{}</button></form>"#,
            html_escape(listing.search_term()),
            html_escape(i18n.get("search_placeholder")),
            html_escape(i18n.get("search"))
        ));
    }

    if let Some(message) = error {
        html.push_str(&render_error(&i18n, message));
    }

    if config.content.show_list_title {
        html.push_str(&format!(
            r#"<h2 class="bf-list-title">{} ({})</h2>"#,
            html_escape(i18n.get("posts")),
            listing.effective_total_count()
        ));
    }

    let card_href = |post: &PostSummary| with_param(&here, "post", &post.slug);
    html.push_str(&post_list(
        listing.effective_posts(),
        config,
        language,
        &i18n,
        &card_href,
    ));

    if listing.shows_pagination() {
        let link = |page: u32| listing_url(page, term, language, config.language);
        html.push_str(&paginator(
            listing.page(),
            listing.effective_total_pages(),
            listing.effective_total_count(),
            config.pagination_variant,
            &i18n,
            &link,
        ));
    }

    if let Some(detail) = overlay {
        html.push_str(&render_overlay(detail, &i18n, &here, public_url));
    }

    html
}

pub(crate) fn render_overlay(detail: &PostDetail, i18n: &I18n, close_href: &str, public_url: &str) -> String {
    let close_js = serde_json::to_string(close_href).unwrap_or_else(|_| "\"/\"".to_string());
    format!(
        r#"<div class="bf-modal" role="dialog" aria-modal="true">
<a class="bf-modal-backdrop" href="{close}" aria-label="{close_label}"></a>
<div class="bf-modal-content">
<a class="bf-modal-close" href="{close}" aria-label="{close_label}">&times;</a>
{article}
</div>
</div>
<script>
document.addEventListener('keydown', function(e) {{
    if (e.key === 'Escape') {{ window.location.href = {close_js}; }}
}});
</script>
{copy_script}"#,
        close = html_escape(close_href),
        close_label = html_escape(i18n.get("close")),
        article = render_article(detail, i18n, public_url),
        close_js = close_js,
        copy_script = COPY_LINK_SCRIPT,
    )
}

/// Full article markup with metadata and share controls
fn render_article(detail: &PostDetail, i18n: &I18n, public_url: &str) -> String {
    let post = &detail.summary;
    let url = post_url(public_url, &post.slug);

    let mut html = String::from(r#"<article class="bf-post">"#);
    if let Some(image) = &post.featured_image_url {
        html.push_str(&format!(
            r#"<img class="bf-post-image" src="{}" alt="{}">"#,
            html_escape(image),
            html_escape(&post.title)
        ));
    }
    if let Some(category) = &post.category {
        html.push_str(&format!(
            r#"<span class="bf-post-category">{}</span>"#,
            html_escape(category)
        ));
    }
    html.push_str(&format!(
        r#"<h1 class="bf-post-title">{}</h1>"#,
        html_escape(&post.title)
    ));

    html.push_str(r#"<div class="bf-post-meta">"#);
    if let Some(author) = &detail.author {
        html.push_str(&format!(
            r#"<span class="bf-post-author">{}</span> "#,
            html_escape(author)
        ));
    }
    html.push_str(&time_tag(&post.created_at, i18n.language()));
    html.push_str(&format!(
        r#" <span class="bf-reading-time">{}</span></div>"#,
        html_escape(&i18n.get_count("reading_time", reading_time(&detail.content)))
    ));

    // Post bodies arrive as rendered HTML from the content service
    html.push_str(&format!(
        r#"<div class="bf-post-content">{}</div>"#,
        detail.content
    ));

    if !detail.tags.is_empty() {
        html.push_str(r#"<ul class="bf-post-tags">"#);
        for tag in &detail.tags {
            html.push_str(&format!("<li>{}</li>", html_escape(tag)));
        }
        html.push_str("</ul>");
    }

    html.push_str(&share_toolbar(&url, &post.title, i18n));
    html.push_str("</article>");
    html
}

/// `GET /posts/:slug`
pub async fn post_detail<S: ContentSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(slug): Path<String>,
    Query(params): Query<DetailParams>,
) -> Response {
    let config = state.config_or_default().await;
    let language = parse_language(params.lang.as_deref()).unwrap_or(config.language);
    let i18n = I18n::new(language);
    let back = format!(
        r#"<a class="bf-back" href="{}">&larr; {}</a>"#,
        html_escape(&listing_url(1, "", language, config.language)),
        html_escape(i18n.get("back"))
    );

    match state.source.get_post(&slug, language).await {
        Ok(detail) => {
            let post = &detail.summary;
            let description = post
                .excerpt
                .clone()
                .or_else(|| config.description().map(str::to_string))
                .unwrap_or_default();
            let head = open_graph(
                &post.title,
                &truncate(&description, 200, None),
                &post_url(&state.public_url, &post.slug),
                post.featured_image_url.as_deref(),
                &config.title,
            );
            let body = format!(
                "{}{}{}",
                back,
                render_article(&detail, &i18n, &state.public_url),
                COPY_LINK_SCRIPT
            );
            let title = format!("{} | {}", post.title, config.title);
            Html(page_document(&config, &i18n, &title, &head, &body, false)).into_response()
        }
        Err(ContentFetchError::NotFound(_)) => {
            tracing::debug!("Post not found: {}", slug);
            let body = format!(
                r#"{}<p class="bf-empty">{}</p>"#,
                back,
                html_escape(i18n.get("no_posts"))
            );
            (
                StatusCode::NOT_FOUND,
                Html(page_document(&config, &i18n, &config.title, "", &body, false)),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch post {}: {}", slug, e);
            let body = format!("{}{}", back, render_error(&i18n, &e.to_string()));
            (
                StatusCode::BAD_GATEWAY,
                Html(page_document(&config, &i18n, &config.title, "", &body, false)),
            )
                .into_response()
        }
    }
}
