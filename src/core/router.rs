//! Gesture dispatch table
//!
//! Maps (current view, command) to at most one action. The table is static;
//! the only runtime input is which view is showing.

use crate::core::actions::{ImageAction, MediaAction, PanDirection, RoutedAction, TextAction};
use crate::core::commands::GestureCommand;
use crate::data::ui_state::ViewId;

/// Look up the action for `command` while `view` is active
pub fn route(view: ViewId, command: GestureCommand) -> Option<RoutedAction> {
    if command.requires_menu() && view != ViewId::Menu {
        return None;
    }

    if command == GestureCommand::GoMenu {
        return match view {
            ViewId::Menu => None,
            _ => Some(RoutedAction::Navigate(ViewId::Menu)),
        };
    }

    match view {
        ViewId::Menu => menu_entry(command),
        ViewId::TextViewer => text_entry(command).map(RoutedAction::Text),
        ViewId::MediaPlayer => media_entry(command).map(RoutedAction::Media),
        ViewId::ImageViewer => image_entry(command).map(RoutedAction::Image),
    }
}

fn menu_entry(command: GestureCommand) -> Option<RoutedAction> {
    match command {
        GestureCommand::OpenMedia => Some(RoutedAction::Navigate(ViewId::MediaPlayer)),
        GestureCommand::OpenText => Some(RoutedAction::Navigate(ViewId::TextViewer)),
        GestureCommand::OpenImage => Some(RoutedAction::Navigate(ViewId::ImageViewer)),
        GestureCommand::OpenCamera => Some(RoutedAction::ToggleCamera),
        _ => None,
    }
}

fn text_entry(command: GestureCommand) -> Option<TextAction> {
    match command {
        GestureCommand::Next => Some(TextAction::NextPage),
        GestureCommand::Prev => Some(TextAction::PrevPage),
        _ => None,
    }
}

fn media_entry(command: GestureCommand) -> Option<MediaAction> {
    match command {
        GestureCommand::TogglePlayPause => Some(MediaAction::TogglePlayPause),
        GestureCommand::FastForward => Some(MediaAction::SeekForward),
        GestureCommand::Rewind => Some(MediaAction::SeekBackward),
        GestureCommand::NextTrack => Some(MediaAction::NextTrack),
        GestureCommand::PrevTrack => Some(MediaAction::PrevTrack),
        GestureCommand::VolumeUp => Some(MediaAction::VolumeUp),
        GestureCommand::VolumeDown => Some(MediaAction::VolumeDown),
        _ => None,
    }
}

fn image_entry(command: GestureCommand) -> Option<ImageAction> {
    match command {
        GestureCommand::PanLeft => Some(ImageAction::Pan(PanDirection::Left)),
        GestureCommand::PanRight => Some(ImageAction::Pan(PanDirection::Right)),
        GestureCommand::PanUp => Some(ImageAction::Pan(PanDirection::Up)),
        GestureCommand::PanDown => Some(ImageAction::Pan(PanDirection::Down)),
        GestureCommand::ZoomIn => Some(ImageAction::ZoomIn),
        GestureCommand::ZoomOut => Some(ImageAction::ZoomOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VIEWS: [ViewId; 4] = [
        ViewId::Menu,
        ViewId::MediaPlayer,
        ViewId::TextViewer,
        ViewId::ImageViewer,
    ];

    fn accepted(view: ViewId) -> Vec<&'static str> {
        GestureCommand::ALL
            .into_iter()
            .filter(|cmd| route(view, *cmd).is_some())
            .map(|cmd| cmd.as_str())
            .collect()
    }

    #[test]
    fn test_menu_table() {
        assert_eq!(
            accepted(ViewId::Menu),
            vec!["open_media", "open_text", "open_image", "open_camera"]
        );
        assert_eq!(
            route(ViewId::Menu, GestureCommand::OpenText),
            Some(RoutedAction::Navigate(ViewId::TextViewer))
        );
        assert_eq!(
            route(ViewId::Menu, GestureCommand::OpenCamera),
            Some(RoutedAction::ToggleCamera)
        );
    }

    #[test]
    fn test_text_table() {
        assert_eq!(accepted(ViewId::TextViewer), vec!["next", "prev", "go_menu"]);
    }

    #[test]
    fn test_media_table() {
        assert_eq!(
            accepted(ViewId::MediaPlayer),
            vec![
                "go_menu",
                "toggle_play_pause",
                "fast_forward",
                "rewind",
                "next_track",
                "prev_track",
                "volume_up",
                "volume_down"
            ]
        );
        assert_eq!(
            route(ViewId::MediaPlayer, GestureCommand::Rewind),
            Some(RoutedAction::Media(MediaAction::SeekBackward))
        );
    }

    #[test]
    fn test_image_table() {
        assert_eq!(
            accepted(ViewId::ImageViewer),
            vec![
                "go_menu",
                "pan_left",
                "pan_right",
                "pan_up",
                "pan_down",
                "zoom_in",
                "zoom_out"
            ]
        );
        assert_eq!(
            route(ViewId::ImageViewer, GestureCommand::PanUp),
            Some(RoutedAction::Image(ImageAction::Pan(PanDirection::Up)))
        );
    }

    #[test]
    fn test_open_family_only_from_menu() {
        for view in ALL_VIEWS {
            for cmd in GestureCommand::ALL.into_iter().filter(|c| c.requires_menu()) {
                assert_eq!(
                    route(view, cmd).is_some(),
                    view == ViewId::Menu,
                    "{} from {:?}",
                    cmd,
                    view
                );
            }
        }
    }

    #[test]
    fn test_go_menu_from_every_panel() {
        for view in [ViewId::MediaPlayer, ViewId::TextViewer, ViewId::ImageViewer] {
            assert_eq!(
                route(view, GestureCommand::GoMenu),
                Some(RoutedAction::Navigate(ViewId::Menu))
            );
        }
        assert_eq!(route(ViewId::Menu, GestureCommand::GoMenu), None);
    }

    #[test]
    fn test_tokens_from_other_views_are_ignored() {
        assert_eq!(route(ViewId::TextViewer, GestureCommand::ZoomIn), None);
        assert_eq!(route(ViewId::TextViewer, GestureCommand::VolumeUp), None);
        assert_eq!(route(ViewId::MediaPlayer, GestureCommand::Next), None);
        assert_eq!(route(ViewId::MediaPlayer, GestureCommand::PanLeft), None);
        assert_eq!(route(ViewId::ImageViewer, GestureCommand::Prev), None);
        assert_eq!(route(ViewId::ImageViewer, GestureCommand::NextTrack), None);
        assert_eq!(route(ViewId::Menu, GestureCommand::Next), None);
        assert_eq!(route(ViewId::Menu, GestureCommand::ZoomOut), None);
    }
}
