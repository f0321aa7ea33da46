//! Main menu: a 2x2 grid of large buttons.

use crate::core::AppCore;
use crate::data::ui_state::MenuEntry;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub fn render(core: &AppCore, area: Rect, buf: &mut Buffer) {
    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    let camera_running = core.camera.is_running();

    for (row_idx, row) in rows.iter().enumerate() {
        let cells =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(*row);
        for (col_idx, cell) in cells.iter().enumerate() {
            let index = row_idx * 2 + col_idx;
            if let Some(entry) = MenuEntry::from_index(index) {
                render_button(
                    entry,
                    index,
                    index == core.ui.menu_selected,
                    camera_running,
                    *cell,
                    buf,
                );
            }
        }
    }
}

fn render_button(
    entry: MenuEntry,
    index: usize,
    selected: bool,
    camera_running: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let (border_style, text_style) = if selected {
        (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::White))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    // Vertically centre the label
    let top = inner.height.saturating_sub(2) / 2;
    let label_area = Rect {
        y: inner.y + top,
        height: inner.height.saturating_sub(top),
        ..inner
    };

    let lines = vec![
        Line::styled(entry.label(camera_running), text_style),
        Line::styled(format!("[{}]", index + 1), Style::default().fg(Color::DarkGray)),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(label_area, buf);
}
