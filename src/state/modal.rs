//! Post detail modal state

/// Which post, if any, is open in the detail modal.
///
/// The page body is scroll-locked exactly while a post is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    selected: Option<String>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the modal for `slug`, replacing any post already open
    pub fn open(&mut self, slug: impl Into<String>) {
        let slug = slug.into();
        tracing::debug!("Opening post {}", slug);
        self.selected = Some(slug);
    }

    /// Close the modal, returning the slug that was open
    pub fn close(&mut self) -> Option<String> {
        self.selected.take()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_slug(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_locks_scroll() {
        let mut modal = ModalState::new();
        assert!(!modal.scroll_locked());

        modal.open("hello-world");
        assert!(modal.is_open());
        assert!(modal.scroll_locked());
        assert_eq!(modal.selected_slug(), Some("hello-world"));

        assert_eq!(modal.close().as_deref(), Some("hello-world"));
        assert!(!modal.scroll_locked());
        assert_eq!(modal.selected_slug(), None);
    }

    #[test]
    fn test_open_replaces_selection() {
        let mut modal = ModalState::new();
        modal.open("a");
        modal.open("b");
        assert_eq!(modal.selected_slug(), Some("b"));
    }
}
