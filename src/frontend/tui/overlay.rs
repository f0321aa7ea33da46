//! Modal overlays: the path prompt and notices.

use crate::data::ui_state::{Notice, NoticeLevel, PathPrompt};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Rect of `width` x `height` centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_prompt(prompt: &PathPrompt, area: Rect, buf: &mut Buffer) {
    let rect = centered(area, 70, 5);
    Clear.render(rect, buf);

    let chars: Vec<char> = prompt.input.chars().collect();
    let before: String = chars[..prompt.cursor.min(chars.len())].iter().collect();
    let under = chars.get(prompt.cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
    let after: String = chars.iter().skip(prompt.cursor + 1).collect();

    let lines = vec![
        Line::from(vec![
            Span::raw(before),
            Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ]),
        Line::styled(
            "Enter to open · Esc to cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", prompt.target.title()));
    Paragraph::new(lines).block(block).render(rect, buf);
}

pub fn render_notice(notice: &Notice, area: Rect, buf: &mut Buffer) {
    let color = match notice.level {
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };

    let rect = centered(area, 60, 8);
    Clear.render(rect, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", notice.title));

    let lines = vec![
        Line::raw(notice.message.as_str()),
        Line::raw(""),
        Line::styled("[Enter] OK", Style::default().fg(Color::DarkGray)),
    ];
    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}
