//! Image viewer panel
//!
//! Each terminal cell shows two device pixels stacked: the upper half block
//! takes the top pixel as foreground and the bottom pixel as background.

use crate::widgets::media_player::display_name;
use crate::widgets::ImageViewerState;
use image::Rgba;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

pub fn render(viewer: &mut ImageViewerState, area: Rect, buf: &mut Buffer) {
    let title = match &viewer.image {
        Some(img) => format!(
            " {} ({}x{}) {:.0}% ",
            display_name(&img.path),
            img.pixels.width(),
            img.pixels.height(),
            viewer.effective_scale() * 100.0
        ),
        None => String::from(" Image Viewer "),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    viewer.set_viewport(f64::from(inner.width), f64::from(inner.height) * 2.0);

    if viewer.image.is_none() {
        render_empty(viewer, inner, buf);
        return;
    }

    for row in 0..inner.height {
        for col in 0..inner.width {
            let x = f64::from(col);
            let y = f64::from(row) * 2.0;
            let top = viewer.sample(x, y).map(to_color);
            let bottom = viewer.sample(x, y + 1.0).map(to_color);
            if top.is_none() && bottom.is_none() {
                continue;
            }

            if let Some(cell) = buf.cell_mut((inner.x + col, inner.y + row)) {
                cell.set_symbol("▀")
                    .set_fg(top.unwrap_or(Color::Reset))
                    .set_bg(bottom.unwrap_or(Color::Reset));
            }
        }
    }
}

fn render_empty(viewer: &ImageViewerState, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            " No image loaded. Press 'o' to open a file",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if !viewer.recent.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(" Recent images:"));
        for (idx, path) in viewer.recent.iter().take(9).enumerate() {
            lines.push(Line::raw(format!("  [{}] {}", idx + 1, path.display())));
        }
    }

    Paragraph::new(lines).render(area, buf);
}

/// Blend onto black by alpha
fn to_color(pixel: Rgba<u8>) -> Color {
    let [r, g, b, a] = pixel.0;
    let blend = |c: u8| ((u16::from(c) * u16::from(a)) / 255) as u8;
    Color::Rgb(blend(r), blend(g), blend(b))
}
