//! Text viewer panel: document sidebar plus a two-page spread.

use crate::widgets::media_player::display_name;
use crate::widgets::TextViewerState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

const SIDEBAR_WIDTH: u16 = 28;

pub fn render(viewer: &mut TextViewerState, area: Rect, buf: &mut Buffer) {
    let [sidebar, pages] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)]).areas(area);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(pages);

    let left_block = Block::default().borders(Borders::ALL);
    let inner = left_block.inner(left);
    viewer.set_page_geometry(usize::from(inner.height), usize::from(inner.width));

    render_sidebar(viewer, sidebar, buf);

    if viewer.loaded.is_none() {
        Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                " No document loaded. Press 'o' to open a file",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .block(Block::default().borders(Borders::ALL))
        .render(pages, buf);
        return;
    }

    let label = viewer.page_label();
    let (left_page, right_page) = viewer.visible_pair();
    render_page(left_page.map(|p| p.lines.as_slice()), left_block, left, buf);
    render_page(
        right_page.map(|p| p.lines.as_slice()),
        Block::default()
            .borders(Borders::ALL)
            .title_bottom(Line::from(format!(" {} ", label)).right_aligned()),
        right,
        buf,
    );
}

fn render_page(lines: Option<&[String]>, block: Block, area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = lines
        .unwrap_or_default()
        .iter()
        .map(|l| Line::raw(l.as_str()))
        .collect();
    Paragraph::new(lines).block(block).render(area, buf);
}

fn render_sidebar(viewer: &TextViewerState, area: Rect, buf: &mut Buffer) {
    let loaded = viewer.loaded.as_ref().map(|d| d.path.as_path());
    let items: Vec<ListItem> = viewer
        .documents
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let marker = if Some(path.as_path()) == loaded { "•" } else { " " };
            let mut style = Style::default();
            if idx == viewer.selected {
                style = style.fg(Color::Black).bg(Color::Cyan);
            } else if Some(path.as_path()) == loaded {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(format!("{} {}", marker, display_name(path))).style(style)
        })
        .collect();

    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Documents "))
        .render(area, buf);
}
