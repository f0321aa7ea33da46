//! Shared action vocabulary for gestures and keyboard input.
//!
//! Both input paths resolve to these actions so every panel reacts the same
//! way no matter where the request came from.

use crate::data::ui_state::ViewId;

/// Where an action originated. Gesture-triggered failures never open a
/// modal notice because nobody is necessarily looking at the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Gesture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    NextPage,
    PrevPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    TogglePlayPause,
    SeekForward,
    SeekBackward,
    NextTrack,
    PrevTrack,
    VolumeUp,
    VolumeDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    /// Unit vector in scroll space (positive = right/down)
    pub fn unit(&self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
}

/// Result of looking a command up in the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutedAction {
    Navigate(ViewId),
    ToggleCamera,
    Text(TextAction),
    Media(MediaAction),
    Image(ImageAction),
}
