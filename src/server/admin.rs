//! Admin page: a form over the working copy of the site configuration

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use super::pages::{open_overlay, refresh, render_overlay, with_param};
use super::{with_store, AppState, ServerError};
use crate::config::{Language, PaginationVariant, SiteConfiguration, Theme, ViewMode};
use crate::content::{ContentSource, PostDetail, PostSummary};
use crate::helpers::{html_escape, page_document, paginator, post_list};
use crate::i18n::I18n;
use crate::state::{
    AdminSession, Edit, SaveStatus, Section, SliderRange, BORDER_RADIUS_RANGE,
    BORDER_WIDTH_RANGE, SHADOW_RANGE,
};

/// Fields posted by the admin form.
///
/// Checkboxes are only sent when ticked, so each toggle is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub language: Language,
    pub pagination_variant: PaginationVariant,
    pub page_size: u32,
    pub border_width: f64,
    pub border_radius: f64,
    #[serde(default)]
    pub border_color: String,
    pub shadow: f64,
    pub search_enabled: Option<String>,
    pub show_excerpt: Option<String>,
    pub show_category: Option<String>,
    pub show_date: Option<String>,
    pub show_list_title: Option<String>,
    pub show_card_title: Option<String>,
}

/// Query parameters of the admin page: preview page and opened post
#[derive(Debug, Default, Deserialize)]
pub struct AdminParams {
    pub page: Option<String>,
    pub post: Option<String>,
}

impl AdminForm {
    /// The control changes needed to bring `current` in line with the form
    pub fn edits(self, current: &SiteConfiguration) -> Vec<Edit> {
        let mut edits = vec![
            Edit::Title(self.title),
            Edit::Description(self.description),
            Edit::Theme(self.theme),
            Edit::ViewMode(self.view_mode),
            Edit::Language(self.language),
            Edit::PaginationVariant(self.pagination_variant),
            Edit::PageSize(self.page_size),
            Edit::BorderWidth(self.border_width),
            Edit::BorderRadius(self.border_radius),
            Edit::BorderColor(self.border_color),
            Edit::Shadow(self.shadow),
            Edit::ShowExcerpt(self.show_excerpt.is_some()),
            Edit::ShowCategory(self.show_category.is_some()),
            Edit::ShowDate(self.show_date.is_some()),
            Edit::ShowListTitle(self.show_list_title.is_some()),
            Edit::ShowCardTitle(self.show_card_title.is_some()),
        ];
        if self.search_enabled.is_some() != current.search.enabled {
            edits.push(Edit::ToggleSearchBar);
        }
        edits
    }
}

async fn session<S: ContentSource>(state: &AppState<S>) -> AdminSession {
    let loaded = match with_store(&state.store, |store| store.load()).await {
        Ok(config) => Ok(config),
        Err(ServerError::Config(e)) => Err(e),
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            Ok(SiteConfiguration::default())
        }
    };
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let (initial, _) = state.snapshot(&config).await;
    AdminSession::from_load(loaded, initial)
}

fn admin_url(page: u32) -> String {
    if page > 1 {
        format!("/admin?page={}", page)
    } else {
        "/admin".to_string()
    }
}

/// `GET /admin`
pub async fn admin_page<S: ContentSource>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<AdminParams>,
) -> Html<String> {
    let mut session = session(&state).await;

    if let Some(page) = params.page.as_deref().and_then(|p| p.trim().parse().ok()) {
        session.listing_mut().set_page(page);
    }
    refresh(&state.source, session.listing_mut()).await;

    let language = session.listing().language();
    let overlay = open_overlay(
        &state.source,
        session.modal_mut(),
        params.post.as_deref(),
        language,
    )
    .await;

    Html(render_admin(&session, overlay.as_ref(), &state.public_url))
}

/// `POST /admin`
pub async fn admin_submit<S: ContentSource>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<AdminForm>,
) -> Response {
    let mut session = session(&state).await;
    for edit in form.edits(session.draft()) {
        session.apply(edit);
    }

    let result = with_store(&state.store, move |store| {
        let result = session.save(&store);
        Ok((session, result))
    })
    .await;

    match result {
        Ok((session, Ok(()))) => {
            state.cache.clear();
            Html(render_admin(&session, None, &state.public_url)).into_response()
        }
        Ok((session, Err(e))) => {
            tracing::warn!("Admin save failed: {}", e);
            let status = if e.is_validation_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Html(render_admin(&session, None, &state.public_url))).into_response()
        }
        Err(e) => {
            tracing::error!("Admin save task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<p>{}</p>", html_escape(&e.to_string()))),
            )
                .into_response()
        }
    }
}

fn select<T: Copy + PartialEq + std::fmt::Display>(
    name: &str,
    label: &str,
    options: &[T],
    current: T,
    option_label: fn(&T) -> &'static str,
) -> String {
    let mut html = format!(
        r#"<label>{}<select name="{}">"#,
        html_escape(label),
        name
    );
    for option in options {
        let selected = if *option == current { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            option,
            selected,
            html_escape(option_label(option))
        ));
    }
    html.push_str("</select></label>");
    html
}

fn slider(name: &str, label: &str, range: SliderRange, value: f64) -> String {
    format!(
        r#"<label>{} <output>{}</output><input type="range" name="{}" min="{}" max="{}" step="{}" value="{}"></label>"#,
        html_escape(label),
        value,
        name,
        range.min,
        range.max,
        range.step,
        value
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{}" value="on"{}> {}</label>"#,
        name,
        if checked { " checked" } else { "" },
        html_escape(label)
    )
}

fn section(session: &AdminSession, which: Section, title: &str, fields: &str) -> String {
    let open = if session.is_section_open(which) {
        " open"
    } else {
        ""
    };
    format!(
        r#"<details class="bf-admin-section"{}><summary>{}</summary>{}</details>"#,
        open,
        html_escape(title),
        fields
    )
}

/// Render the admin page for a session, with the post open in the preview
/// overlay if any
pub(crate) fn render_admin(
    session: &AdminSession,
    overlay: Option<&PostDetail>,
    public_url: &str,
) -> String {
    let draft = session.draft();
    let i18n = I18n::new(draft.language);
    let mut body = String::from(r#"<h1>Admin</h1>"#);

    if let Some(error) = session.load_error() {
        body.push_str(&format!(
            r#"<div class="bf-error" role="alert">Could not load the saved config, showing defaults: {}</div>"#,
            html_escape(error)
        ));
    }

    match session.save_status() {
        SaveStatus::Idle => {}
        SaveStatus::Saved => {
            body.push_str(r#"<p class="bf-status bf-status-saved">Config saved successfully</p>"#)
        }
        SaveStatus::Failed(message) => body.push_str(&format!(
            r#"<p class="bf-status bf-status-failed" role="alert">Failed to save config: {}</p>"#,
            html_escape(message)
        )),
    }

    let mut appearance = format!(
        r#"<label>Title<input type="text" name="title" value="{}" required></label><label>Description<input type="text" name="description" value="{}"></label>"#,
        html_escape(&draft.title),
        html_escape(draft.description().unwrap_or(""))
    );
    appearance.push_str(&select("theme", "Theme", Theme::ALL, draft.theme, Theme::label));
    appearance.push_str(&select(
        "view_mode",
        "View mode",
        ViewMode::ALL,
        draft.view_mode,
        ViewMode::label,
    ));
    appearance.push_str(&select(
        "language",
        "Language",
        Language::ALL,
        draft.language,
        Language::label,
    ));
    appearance.push_str(&select(
        "pagination_variant",
        "Pagination",
        PaginationVariant::ALL,
        draft.pagination_variant,
        PaginationVariant::label,
    ));
    appearance.push_str(&format!(
        r#"<label>Posts per page<input type="number" name="page_size" min="1" value="{}"></label>"#,
        draft.page_size
    ));
    appearance.push_str(&slider(
        "border_width",
        "Card border width (px)",
        BORDER_WIDTH_RANGE,
        draft.card.border_width,
    ));
    appearance.push_str(&slider(
        "border_radius",
        "Card border radius (rem)",
        BORDER_RADIUS_RANGE,
        draft.card.border_radius,
    ));
    appearance.push_str(&format!(
        r#"<label>Card border colour<input type="text" name="border_color" value="{}" placeholder="e.g. gray-200"></label>"#,
        html_escape(draft.card.border_color().unwrap_or(""))
    ));
    appearance.push_str(&slider("shadow", "Card shadow", SHADOW_RANGE, draft.card.shadow));

    let content = &draft.content;
    let toggles = [
        checkbox("search_enabled", "Show search bar", draft.search.enabled),
        checkbox("show_excerpt", "Show excerpt", content.show_excerpt),
        checkbox("show_category", "Show category", content.show_category),
        checkbox("show_date", "Show date", content.show_date),
        checkbox("show_list_title", "Show list title", content.show_list_title),
        checkbox("show_card_title", "Show card titles", content.show_card_title),
    ]
    .concat();

    body.push_str(r#"<form class="bf-admin" method="post" action="/admin">"#);
    body.push_str(&section(session, Section::Appearance, "Appearance", &appearance));
    body.push_str(&section(session, Section::Content, "Content", &toggles));
    body.push_str(r#"<button type="submit">Save</button></form>"#);

    let listing = session.listing();
    let here = admin_url(listing.page());
    let href = |post: &PostSummary| with_param(&here, "post", &post.slug);
    body.push_str(r#"<section class="bf-admin-preview"><h2>Preview</h2>"#);
    if let Some(error) = listing.error() {
        body.push_str(&format!(
            r#"<div class="bf-error" role="alert">{}: {}</div>"#,
            html_escape(i18n.get("load_failed")),
            html_escape(error)
        ));
    }
    body.push_str(&post_list(
        listing.effective_posts(),
        draft,
        listing.language(),
        &i18n,
        &href,
    ));
    if listing.shows_pagination() {
        body.push_str(&paginator(
            listing.page(),
            listing.effective_total_pages(),
            listing.effective_total_count(),
            draft.pagination_variant,
            &i18n,
            &admin_url,
        ));
    }
    body.push_str("</section>");

    if let Some(detail) = overlay {
        body.push_str(&render_overlay(detail, &i18n, &here, public_url));
    }

    page_document(draft, &i18n, "Admin", "", &body, session.modal().scroll_locked())
}
