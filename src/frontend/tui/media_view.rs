//! Media player panel: now-playing info, progress, volume, playlist.

use crate::widgets::media_player::display_name;
use crate::widgets::{MediaPlayerState, PlaybackState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Widget},
};
use std::time::Duration;

pub fn render(player: &MediaPlayerState, area: Rect, buf: &mut Buffer) {
    let [info, progress, volume, playlist] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);

    render_info(player, info, buf);
    render_progress(player, progress, buf);

    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Volume "))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::from(player.volume))
        .render(volume, buf);

    render_playlist(player, playlist, buf);
}

fn render_info(player: &MediaPlayerState, area: Rect, buf: &mut Buffer) {
    let (symbol, color) = match player.state {
        PlaybackState::Playing => ("▶", Color::Green),
        PlaybackState::Paused => ("⏸", Color::Yellow),
        PlaybackState::Stopped => ("■", Color::DarkGray),
    };
    let title = player
        .current_name()
        .unwrap_or_else(|| String::from("Nothing loaded. Press 'o' to open a file"));

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::styled(
            format!("   {}", player.status_text),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Now Playing "))
        .render(area, buf);
}

fn render_progress(player: &MediaPlayerState, area: Rect, buf: &mut Buffer) {
    let position = player.position();
    let (ratio, label) = match player.duration {
        Some(total) if !total.is_zero() => (
            (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0),
            format!("{} / {}", format_time(position), format_time(total)),
        ),
        _ => (0.0, format_time(position)),
    };

    Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(label)
        .render(area, buf);
}

fn render_playlist(player: &MediaPlayerState, area: Rect, buf: &mut Buffer) {
    let items: Vec<ListItem> = player
        .playlist
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let style = if Some(idx) == player.current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{:>3}. {}", idx + 1, display_name(path))).style(style)
        })
        .collect();

    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Playlist "))
        .render(area, buf);
}

/// mm:ss, or h:mm:ss past the hour
pub fn format_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::from_secs(0)), "00:00");
        assert_eq!(format_time(Duration::from_secs(75)), "01:15");
        assert_eq!(format_time(Duration::from_secs(3725)), "1:02:05");
    }
}
