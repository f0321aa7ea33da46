//! Gesture command vocabulary.
//!
//! Tokens arrive as bare strings from the gesture listener and are matched
//! case-sensitively against this fixed list. Anything else is not a command.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureCommand {
    // Menu
    OpenMedia,
    OpenText,
    OpenImage,
    OpenCamera,

    // Text viewer
    Next,
    Prev,

    // Any panel
    GoMenu,

    // Media player
    TogglePlayPause,
    FastForward,
    Rewind,
    NextTrack,
    PrevTrack,
    VolumeUp,
    VolumeDown,

    // Image viewer
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
}

impl GestureCommand {
    pub const ALL: [GestureCommand; 20] = [
        Self::OpenMedia,
        Self::OpenText,
        Self::OpenImage,
        Self::OpenCamera,
        Self::Next,
        Self::Prev,
        Self::GoMenu,
        Self::TogglePlayPause,
        Self::FastForward,
        Self::Rewind,
        Self::NextTrack,
        Self::PrevTrack,
        Self::VolumeUp,
        Self::VolumeDown,
        Self::PanLeft,
        Self::PanRight,
        Self::PanUp,
        Self::PanDown,
        Self::ZoomIn,
        Self::ZoomOut,
    ];

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.as_str() == token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenMedia => "open_media",
            Self::OpenText => "open_text",
            Self::OpenImage => "open_image",
            Self::OpenCamera => "open_camera",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::GoMenu => "go_menu",
            Self::TogglePlayPause => "toggle_play_pause",
            Self::FastForward => "fast_forward",
            Self::Rewind => "rewind",
            Self::NextTrack => "next_track",
            Self::PrevTrack => "prev_track",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::PanLeft => "pan_left",
            Self::PanRight => "pan_right",
            Self::PanUp => "pan_up",
            Self::PanDown => "pan_down",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
        }
    }

    /// The `open_*` family is only honored while the menu is showing.
    pub fn requires_menu(&self) -> bool {
        matches!(
            self,
            Self::OpenMedia | Self::OpenText | Self::OpenImage | Self::OpenCamera
        )
    }
}

impl std::fmt::Display for GestureCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_token() {
        for cmd in GestureCommand::ALL {
            assert_eq!(GestureCommand::parse(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(GestureCommand::parse("next"), Some(GestureCommand::Next));
        assert_eq!(GestureCommand::parse("NEXT"), None);
        assert_eq!(GestureCommand::parse("Zoom_In"), None);
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert_eq!(GestureCommand::parse(""), None);
        assert_eq!(GestureCommand::parse("open_files"), None);
        assert_eq!(GestureCommand::parse(" next"), None);
    }

    #[test]
    fn test_requires_menu() {
        let gated: Vec<_> = GestureCommand::ALL
            .into_iter()
            .filter(|cmd| cmd.requires_menu())
            .map(|cmd| cmd.as_str())
            .collect();
        assert_eq!(
            gated,
            vec!["open_media", "open_text", "open_image", "open_camera"]
        );
    }
}
