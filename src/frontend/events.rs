//! Frontend-agnostic input events.
//!
//! Crossterm's event stream is narrowed to the handful of shapes the core
//! reacts to. Key releases and repeats, focus changes and mouse motion are
//! dropped here so `AppCore` never sees them.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Wheel only; clicks and drags are not bound to anything
    Mouse {
        kind: MouseEventKind,
        modifiers: KeyModifiers,
    },
    /// Terminal resized; the next draw picks up the new area
    Resize,
    /// Bracketed paste, e.g. a file dropped onto the terminal
    Paste { text: String },
}

impl FrontendEvent {
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key {
                code: key.code,
                modifiers: key.modifiers,
            }),
            Event::Mouse(mouse)
                if matches!(
                    mouse.kind,
                    MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                ) =>
            {
                Some(Self::Mouse {
                    kind: mouse.kind,
                    modifiers: mouse.modifiers,
                })
            }
            Event::Resize(..) => Some(Self::Resize),
            Event::Paste(text) => Some(Self::Paste { text }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseButton, MouseEvent};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('n'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::CONTROL,
        })
    }

    #[test]
    fn test_only_key_presses_pass() {
        assert_eq!(
            FrontendEvent::from_crossterm(key(KeyEventKind::Press)),
            Some(FrontendEvent::Key {
                code: KeyCode::Char('n'),
                modifiers: KeyModifiers::NONE,
            })
        );
        assert_eq!(FrontendEvent::from_crossterm(key(KeyEventKind::Release)), None);
        assert_eq!(FrontendEvent::from_crossterm(key(KeyEventKind::Repeat)), None);
    }

    #[test]
    fn test_only_wheel_mouse_events_pass() {
        assert_eq!(
            FrontendEvent::from_crossterm(mouse(MouseEventKind::ScrollDown)),
            Some(FrontendEvent::Mouse {
                kind: MouseEventKind::ScrollDown,
                modifiers: KeyModifiers::CONTROL,
            })
        );
        assert_eq!(
            FrontendEvent::from_crossterm(mouse(MouseEventKind::Down(MouseButton::Left))),
            None
        );
        assert_eq!(FrontendEvent::from_crossterm(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_resize_and_paste() {
        assert_eq!(
            FrontendEvent::from_crossterm(Event::Resize(120, 40)),
            Some(FrontendEvent::Resize)
        );
        assert_eq!(
            FrontendEvent::from_crossterm(Event::Paste("/tmp/a.png".into())),
            Some(FrontendEvent::Paste {
                text: "/tmp/a.png".into()
            })
        );
        assert_eq!(FrontendEvent::from_crossterm(Event::FocusLost), None);
    }
}
