//! Input routing for keyboard and mouse
//!
//! Routes raw input to an `InputAction` based on:
//! - Current InputMode (notice, prompt, or normal)
//! - Current view (menu or one of the panels)
//!
//! Panel operations that gestures can also trigger resolve to a shared
//! `RoutedAction`, so both input paths go through `AppCore::apply`.

use crate::core::actions::{ImageAction, MediaAction, PanDirection, RoutedAction, TextAction};
use crate::data::ui_state::{InputMode, MenuEntry, ViewId};
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

/// Everything a key or mouse event can ask for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Quit,

    // Main menu
    MenuMove(i32, i32),
    MenuActivate,
    MenuSelect(MenuEntry),

    // Panels
    Back,
    OpenPrompt,
    Routed(RoutedAction),

    // Text viewer sidebar
    SidebarUp,
    SidebarDown,
    LoadSelected,
    RemoveSelected,

    // Image viewer
    ClearImage,
    OpenRecentImage(usize),

    // Modal notice
    DismissNotice,

    // Path prompt
    PromptInsert(char),
    PromptBackspace,
    PromptDelete,
    PromptLeft,
    PromptRight,
    PromptHome,
    PromptEnd,
    PromptSubmit,
    PromptCancel,

    // Key not bound in this context
    None,
}

/// Route a key event to an InputAction based on current context
pub fn route_key(
    view: ViewId,
    mode: InputMode,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> InputAction {
    match mode {
        InputMode::Notice => route_notice_key(code),
        InputMode::Prompt => route_prompt_key(code, modifiers),
        InputMode::Normal => {
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return InputAction::Quit;
            }
            match view {
                ViewId::Menu => route_menu_key(code),
                panel => match code {
                    KeyCode::Esc | KeyCode::Backspace => InputAction::Back,
                    KeyCode::Char('o') => InputAction::OpenPrompt,
                    _ => route_panel_key(panel, code),
                },
            }
        }
    }
}

fn route_notice_key(code: KeyCode) -> InputAction {
    match code {
        KeyCode::Enter | KeyCode::Esc => InputAction::DismissNotice,
        _ => InputAction::None,
    }
}

fn route_prompt_key(code: KeyCode, modifiers: KeyModifiers) -> InputAction {
    match code {
        KeyCode::Enter => InputAction::PromptSubmit,
        KeyCode::Esc => InputAction::PromptCancel,
        KeyCode::Backspace => InputAction::PromptBackspace,
        KeyCode::Delete => InputAction::PromptDelete,
        KeyCode::Left => InputAction::PromptLeft,
        KeyCode::Right => InputAction::PromptRight,
        KeyCode::Home => InputAction::PromptHome,
        KeyCode::End => InputAction::PromptEnd,
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::PromptInsert(c)
        }
        _ => InputAction::None,
    }
}

fn route_menu_key(code: KeyCode) -> InputAction {
    match code {
        KeyCode::Left => InputAction::MenuMove(-1, 0),
        KeyCode::Right => InputAction::MenuMove(1, 0),
        KeyCode::Up => InputAction::MenuMove(0, -1),
        KeyCode::Down => InputAction::MenuMove(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::MenuActivate,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            MenuEntry::from_index(index)
                .map(InputAction::MenuSelect)
                .unwrap_or(InputAction::None)
        }
        KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
        _ => InputAction::None,
    }
}

fn route_panel_key(view: ViewId, code: KeyCode) -> InputAction {
    use InputAction::Routed;

    match view {
        ViewId::TextViewer => match code {
            KeyCode::Right | KeyCode::PageDown => Routed(RoutedAction::Text(TextAction::NextPage)),
            KeyCode::Left | KeyCode::PageUp => Routed(RoutedAction::Text(TextAction::PrevPage)),
            KeyCode::Up => InputAction::SidebarUp,
            KeyCode::Down => InputAction::SidebarDown,
            KeyCode::Enter => InputAction::LoadSelected,
            KeyCode::Delete | KeyCode::Char('d') => InputAction::RemoveSelected,
            _ => InputAction::None,
        },
        ViewId::MediaPlayer => {
            let action = match code {
                KeyCode::Char(' ') => MediaAction::TogglePlayPause,
                KeyCode::Right => MediaAction::SeekForward,
                KeyCode::Left => MediaAction::SeekBackward,
                KeyCode::Char('n') => MediaAction::NextTrack,
                KeyCode::Char('p') => MediaAction::PrevTrack,
                KeyCode::Char('+') | KeyCode::Char('=') => MediaAction::VolumeUp,
                KeyCode::Char('-') => MediaAction::VolumeDown,
                _ => return InputAction::None,
            };
            Routed(RoutedAction::Media(action))
        }
        ViewId::ImageViewer => {
            let action = match code {
                KeyCode::Left => ImageAction::Pan(PanDirection::Left),
                KeyCode::Right => ImageAction::Pan(PanDirection::Right),
                KeyCode::Up => ImageAction::Pan(PanDirection::Up),
                KeyCode::Down => ImageAction::Pan(PanDirection::Down),
                KeyCode::Char('+') | KeyCode::Char('=') => ImageAction::ZoomIn,
                KeyCode::Char('-') => ImageAction::ZoomOut,
                KeyCode::Char('c') => return InputAction::ClearImage,
                KeyCode::Char(c @ '1'..='9') => {
                    return InputAction::OpenRecentImage(c as usize - '1' as usize)
                }
                _ => return InputAction::None,
            };
            Routed(RoutedAction::Image(action))
        }
        ViewId::Menu => route_menu_key(code),
    }
}

/// Route a mouse event. Only the wheel does anything.
pub fn route_mouse(
    view: ViewId,
    mode: InputMode,
    kind: MouseEventKind,
    modifiers: KeyModifiers,
) -> InputAction {
    if mode != InputMode::Normal {
        return InputAction::None;
    }

    match (view, kind) {
        (ViewId::ImageViewer, MouseEventKind::ScrollUp)
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            InputAction::Routed(RoutedAction::Image(ImageAction::ZoomIn))
        }
        (ViewId::ImageViewer, MouseEventKind::ScrollDown)
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            InputAction::Routed(RoutedAction::Image(ImageAction::ZoomOut))
        }
        (ViewId::ImageViewer, MouseEventKind::ScrollUp) => {
            InputAction::Routed(RoutedAction::Image(ImageAction::Pan(PanDirection::Up)))
        }
        (ViewId::ImageViewer, MouseEventKind::ScrollDown) => {
            InputAction::Routed(RoutedAction::Image(ImageAction::Pan(PanDirection::Down)))
        }
        (ViewId::TextViewer, MouseEventKind::ScrollDown) => {
            InputAction::Routed(RoutedAction::Text(TextAction::NextPage))
        }
        (ViewId::TextViewer, MouseEventKind::ScrollUp) => {
            InputAction::Routed(RoutedAction::Text(TextAction::PrevPage))
        }
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(view: ViewId, code: KeyCode) -> InputAction {
        route_key(view, InputMode::Normal, code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(key(ViewId::Menu, KeyCode::Right), InputAction::MenuMove(1, 0));
        assert_eq!(key(ViewId::Menu, KeyCode::Enter), InputAction::MenuActivate);
        assert_eq!(
            key(ViewId::Menu, KeyCode::Char('4')),
            InputAction::MenuSelect(MenuEntry::Camera)
        );
        assert_eq!(key(ViewId::Menu, KeyCode::Char('5')), InputAction::None);
        assert_eq!(key(ViewId::Menu, KeyCode::Char('q')), InputAction::Quit);
    }

    #[test]
    fn test_panels_share_back_and_prompt() {
        for view in [ViewId::MediaPlayer, ViewId::TextViewer, ViewId::ImageViewer] {
            assert_eq!(key(view, KeyCode::Esc), InputAction::Back);
            assert_eq!(key(view, KeyCode::Backspace), InputAction::Back);
            assert_eq!(key(view, KeyCode::Char('o')), InputAction::OpenPrompt);
            // 'q' only quits from the menu
            assert_ne!(key(view, KeyCode::Char('q')), InputAction::Quit);
        }
    }

    #[test]
    fn test_arrows_depend_on_view() {
        assert_eq!(
            key(ViewId::TextViewer, KeyCode::Right),
            InputAction::Routed(RoutedAction::Text(TextAction::NextPage))
        );
        assert_eq!(
            key(ViewId::MediaPlayer, KeyCode::Right),
            InputAction::Routed(RoutedAction::Media(MediaAction::SeekForward))
        );
        assert_eq!(
            key(ViewId::ImageViewer, KeyCode::Right),
            InputAction::Routed(RoutedAction::Image(ImageAction::Pan(PanDirection::Right)))
        );
        assert_eq!(key(ViewId::TextViewer, KeyCode::Up), InputAction::SidebarUp);
    }

    #[test]
    fn test_notice_swallows_other_keys() {
        let mode = InputMode::Notice;
        assert_eq!(
            route_key(ViewId::Menu, mode, KeyCode::Char('q'), KeyModifiers::NONE),
            InputAction::None
        );
        assert_eq!(
            route_key(ViewId::Menu, mode, KeyCode::Enter, KeyModifiers::NONE),
            InputAction::DismissNotice
        );
    }

    #[test]
    fn test_prompt_captures_typing() {
        let mode = InputMode::Prompt;
        assert_eq!(
            route_key(ViewId::TextViewer, mode, KeyCode::Char('o'), KeyModifiers::NONE),
            InputAction::PromptInsert('o')
        );
        assert_eq!(
            route_key(ViewId::TextViewer, mode, KeyCode::Char('Q'), KeyModifiers::SHIFT),
            InputAction::PromptInsert('Q')
        );
        assert_eq!(
            route_key(ViewId::TextViewer, mode, KeyCode::Esc, KeyModifiers::NONE),
            InputAction::PromptCancel
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere_but_prompt() {
        for view in [ViewId::Menu, ViewId::ImageViewer] {
            assert_eq!(
                route_key(view, InputMode::Normal, KeyCode::Char('c'), KeyModifiers::CONTROL),
                InputAction::Quit
            );
        }
        assert_eq!(
            route_key(
                ViewId::Menu,
                InputMode::Prompt,
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ),
            InputAction::None
        );
    }

    #[test]
    fn test_ctrl_wheel_zooms_image() {
        assert_eq!(
            route_mouse(
                ViewId::ImageViewer,
                InputMode::Normal,
                MouseEventKind::ScrollUp,
                KeyModifiers::CONTROL
            ),
            InputAction::Routed(RoutedAction::Image(ImageAction::ZoomIn))
        );
        assert_eq!(
            route_mouse(
                ViewId::MediaPlayer,
                InputMode::Normal,
                MouseEventKind::ScrollUp,
                KeyModifiers::CONTROL
            ),
            InputAction::None
        );
    }
}
