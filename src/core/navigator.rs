//! View navigation state machine.
//!
//! States are the four views; the app starts on the menu and there is no
//! terminal state. Panels are never reset by navigation.

use crate::data::ui_state::ViewId;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ViewNavigator {
    current: ViewId,
}

impl ViewNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ViewId {
        self.current
    }

    /// Make `view` the only visible view. Returns false if it already was.
    pub fn show(&mut self, view: ViewId) -> bool {
        if self.current == view {
            return false;
        }
        debug!("Switching view {:?} -> {:?}", self.current, view);
        self.current = view;
        true
    }

    pub fn go_menu(&mut self) -> bool {
        self.show(ViewId::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_menu() {
        let nav = ViewNavigator::new();
        assert_eq!(nav.current(), ViewId::Menu);
    }

    #[test]
    fn test_show_and_return() {
        let mut nav = ViewNavigator::new();
        assert!(nav.show(ViewId::ImageViewer));
        assert_eq!(nav.current(), ViewId::ImageViewer);
        assert!(!nav.show(ViewId::ImageViewer));
        assert!(nav.go_menu());
        assert_eq!(nav.current(), ViewId::Menu);
        assert!(!nav.go_menu());
    }
}
