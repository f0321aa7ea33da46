use crate::core::AppCore;
use crate::data::ui_state::ViewId;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io;
use std::time::Duration;

use super::{image_view, media_view, menu_view, overlay, text_view};

/// TUI Frontend using ratatui
///
/// Renders the application using ratatui and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture and bracketed
    /// paste, and enters alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )
        .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            restored: false,
        })
    }

    /// Set poll timeout (for controlling frame rate)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // First poll waits up to one frame; drain whatever else is queued
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = FrontendEvent::from_crossterm(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            draw_app(core, area, f.buffer_mut());
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

/// Header, active view, status bar, then any modal on top
fn draw_app(core: &mut AppCore, area: Rect, buf: &mut Buffer) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let view = core.current_view();
    render_header(view, header, buf);

    match view {
        ViewId::Menu => menu_view::render(core, body, buf),
        ViewId::MediaPlayer => media_view::render(&core.media, body, buf),
        ViewId::TextViewer => text_view::render(&mut core.text, body, buf),
        ViewId::ImageViewer => image_view::render(&mut core.image, body, buf),
    }

    render_status(core, status, buf);

    if let Some(prompt) = &core.ui.prompt {
        overlay::render_prompt(prompt, area, buf);
    }
    if let Some(notice) = &core.ui.notice {
        overlay::render_notice(notice, area, buf);
    }
}

fn render_header(view: ViewId, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", view.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", key_hints(view)), Style::default().fg(Color::DarkGray)),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn key_hints(view: ViewId) -> &'static str {
    match view {
        ViewId::Menu => "arrows select · Enter open · 1-4 shortcut · q quit",
        ViewId::MediaPlayer => {
            "Space play/pause · ←/→ seek · n/p track · +/- volume · o open · Esc menu"
        }
        ViewId::TextViewer => {
            "←/→ page · ↑/↓ list · Enter load · d remove · o open · Esc menu"
        }
        ViewId::ImageViewer => {
            "arrows pan · +/- zoom · c clear · o open · Esc menu"
        }
    }
}

fn render_status(core: &AppCore, area: Rect, buf: &mut Buffer) {
    let gesture = if core.ui.gesture_listening {
        Span::styled(" gestures on ", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        Span::styled(" gestures off ", Style::default().fg(Color::Black).bg(Color::DarkGray))
    };
    let camera = if core.camera.is_running() {
        Span::styled(" camera ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        gesture,
        camera,
        Span::raw(" "),
        Span::raw(core.ui.status_text.clone()),
    ]);
    Paragraph::new(line).render(area, buf);
}
