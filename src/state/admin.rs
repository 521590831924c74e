//! Admin page state: a working copy of the configuration and its controls

use crate::config::{
    ConfigError, ConfigStore, Language, PaginationVariant, SiteConfiguration, Theme, ViewMode,
};
use crate::content::PostPage;

use super::{ListingState, ModalState};

/// Range and step of a slider control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    /// Clamp to the range and snap to the nearest step
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

pub const BORDER_WIDTH_RANGE: SliderRange = SliderRange {
    min: 0.0,
    max: 10.0,
    step: 1.0,
};

pub const BORDER_RADIUS_RANGE: SliderRange = SliderRange {
    min: 0.0,
    max: 3.0,
    step: 0.25,
};

pub const SHADOW_RANGE: SliderRange = SliderRange {
    min: 0.0,
    max: 10.0,
    step: 1.0,
};

/// Collapsible sections of the admin page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Appearance,
    Content,
}

/// A single change made through an admin control
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Title(String),
    Description(String),
    Theme(Theme),
    ViewMode(ViewMode),
    Language(Language),
    PaginationVariant(PaginationVariant),
    PageSize(u32),
    BorderWidth(f64),
    BorderRadius(f64),
    BorderColor(String),
    Shadow(f64),
    ToggleSearchBar,
    ShowExcerpt(bool),
    ShowCategory(bool),
    ShowDate(bool),
    ShowListTitle(bool),
    ShowCardTitle(bool),
    ToggleSection(Section),
}

/// Outcome of the most recent save
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saved,
    Failed(String),
}

/// State behind the admin page.
///
/// The draft is only written back to the store by an explicit save.
#[derive(Debug, Clone)]
pub struct AdminSession {
    draft: SiteConfiguration,
    load_error: Option<String>,
    save_status: SaveStatus,
    appearance_open: bool,
    content_open: bool,
    listing: ListingState,
    modal: ModalState,
}

impl AdminSession {
    /// Build a session from the result of loading the persisted document.
    ///
    /// A failed load falls back to defaults and keeps the error for display.
    pub fn from_load(loaded: Result<SiteConfiguration, ConfigError>, initial: PostPage) -> Self {
        let (draft, load_error) = match loaded {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!("Admin falling back to default config: {}", e);
                (SiteConfiguration::default(), Some(e.to_string()))
            }
        };

        let listing = ListingState::new(initial, draft.language, draft.page_size);

        Self {
            draft,
            load_error,
            save_status: SaveStatus::Idle,
            appearance_open: true,
            content_open: true,
            listing,
            modal: ModalState::new(),
        }
    }

    pub fn draft(&self) -> &SiteConfiguration {
        &self.draft
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    pub fn is_section_open(&self, section: Section) -> bool {
        match section {
            Section::Appearance => self.appearance_open,
            Section::Content => self.content_open,
        }
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn listing_mut(&mut self) -> &mut ListingState {
        &mut self.listing
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalState {
        &mut self.modal
    }

    /// Apply one control change to the draft
    pub fn apply(&mut self, edit: Edit) {
        let draft = &mut self.draft;
        match edit {
            Edit::Title(title) => draft.title = title,
            Edit::Description(description) => {
                draft.description = Some(description).filter(|d| !d.trim().is_empty());
            }
            Edit::Theme(theme) => draft.theme = theme,
            Edit::ViewMode(mode) => draft.view_mode = mode,
            Edit::Language(language) => {
                draft.language = language;
                self.listing.set_language(language);
            }
            Edit::PaginationVariant(variant) => draft.pagination_variant = variant,
            Edit::PageSize(size) => {
                draft.page_size = size.max(1);
                self.listing.set_page_size(draft.page_size);
            }
            Edit::BorderWidth(v) => draft.card.border_width = BORDER_WIDTH_RANGE.snap(v),
            Edit::BorderRadius(v) => draft.card.border_radius = BORDER_RADIUS_RANGE.snap(v),
            Edit::BorderColor(color) => {
                draft.card.border_color = Some(color.trim().to_string()).filter(|c| !c.is_empty());
            }
            Edit::Shadow(v) => draft.card.shadow = SHADOW_RANGE.snap(v),
            Edit::ToggleSearchBar => draft.search.enabled = !draft.search.enabled,
            Edit::ShowExcerpt(on) => draft.content.show_excerpt = on,
            Edit::ShowCategory(on) => draft.content.show_category = on,
            Edit::ShowDate(on) => draft.content.show_date = on,
            Edit::ShowListTitle(on) => draft.content.show_list_title = on,
            Edit::ShowCardTitle(on) => draft.content.show_card_title = on,
            Edit::ToggleSection(Section::Appearance) => self.appearance_open = !self.appearance_open,
            Edit::ToggleSection(Section::Content) => self.content_open = !self.content_open,
        }

        if matches!(self.save_status, SaveStatus::Saved) {
            self.save_status = SaveStatus::Idle;
        }
    }

    /// Commit the draft to the store and record the outcome
    pub fn save(&mut self, store: &ConfigStore) -> Result<(), ConfigError> {
        let result = store.save(&self.draft);
        self.save_status = match &result {
            Ok(()) => SaveStatus::Saved,
            Err(e) => SaveStatus::Failed(e.to_string()),
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> AdminSession {
        AdminSession::from_load(Ok(SiteConfiguration::default()), PostPage::empty())
    }

    #[test]
    fn test_slider_snapping() {
        assert_eq!(BORDER_RADIUS_RANGE.snap(0.8), 0.75);
        assert_eq!(BORDER_RADIUS_RANGE.snap(5.0), 3.0);
        assert_eq!(BORDER_WIDTH_RANGE.snap(-2.0), 0.0);
        assert_eq!(BORDER_WIDTH_RANGE.snap(2.6), 3.0);
        assert_eq!(SHADOW_RANGE.snap(f64::NAN), 0.0);
    }

    #[test]
    fn test_load_failure_falls_back_to_defaults() {
        let err = ConfigError::MissingField("title");
        let session = AdminSession::from_load(Err(err), PostPage::empty());
        assert_eq!(session.draft(), &SiteConfiguration::default());
        assert!(session.load_error().is_some());
    }

    #[test]
    fn test_edits_update_draft() {
        let mut session = session();
        session.apply(Edit::Theme(Theme::Violet));
        session.apply(Edit::ViewMode(ViewMode::Timeline));
        session.apply(Edit::BorderColor("  ".to_string()));
        session.apply(Edit::BorderWidth(4.0));
        session.apply(Edit::ToggleSearchBar);
        session.apply(Edit::ShowExcerpt(false));
        session.apply(Edit::Description(String::new()));

        let draft = session.draft();
        assert_eq!(draft.theme, Theme::Violet);
        assert_eq!(draft.view_mode, ViewMode::Timeline);
        assert_eq!(draft.card.border_color, None);
        assert_eq!(draft.card.border_width, 4.0);
        assert!(draft.search.enabled);
        assert!(!draft.content.show_excerpt);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_language_edit_resets_listing_page() {
        let mut session = session();
        session.listing_mut().set_page(4);
        session.apply(Edit::Language(Language::Es));

        assert_eq!(session.draft().language, Language::Es);
        assert_eq!(session.listing().language(), Language::Es);
        assert_eq!(session.listing().page(), 1);
    }

    #[test]
    fn test_toggle_sections() {
        let mut session = session();
        assert!(session.is_section_open(Section::Content));
        session.apply(Edit::ToggleSection(Section::Content));
        assert!(!session.is_section_open(Section::Content));
        assert!(session.is_section_open(Section::Appearance));
    }

    #[test]
    fn test_save_commits_draft() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        store.save(&SiteConfiguration::default()).unwrap();

        let mut session = AdminSession::from_load(store.load(), PostPage::empty());
        session.apply(Edit::Theme(Theme::Dark));
        assert_eq!(store.load().unwrap().theme, Theme::Default);

        session.save(&store).unwrap();
        assert_eq!(session.save_status(), &SaveStatus::Saved);
        assert_eq!(store.load().unwrap().theme, Theme::Dark);

        session.apply(Edit::ShowDate(false));
        assert_eq!(session.save_status(), &SaveStatus::Idle);
    }

    #[test]
    fn test_failed_save_keeps_store() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        store.save(&SiteConfiguration::default()).unwrap();

        let mut session = AdminSession::from_load(store.load(), PostPage::empty());
        session.apply(Edit::Title(" ".to_string()));

        assert!(session.save(&store).is_err());
        assert!(matches!(session.save_status(), SaveStatus::Failed(_)));
        assert_eq!(store.load().unwrap(), SiteConfiguration::default());
    }
}
