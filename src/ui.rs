//! UI rendering helpers for the terminal user interface.
//!
//! `draw` renders the `App` surface with `ratatui` and records where the
//! clickable controls ended up so mouse events can be mapped back to them.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, HighlightSpacing, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus, HitAreas, Row};
use crate::config::{ControlsSettings, UiSettings};

const CONTROLS: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("←/→", "prev/next"),
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("/", "filter"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let mut parts: Vec<String> = CONTROLS.iter().map(|(k, v)| format!("[{k}] {v}")).collect();
    parts.insert(4, format!("[H/L] scrub -/+{}s", controls.scrub_seconds));
    parts.insert(
        5,
        format!("[+/-] volume ±{:.0}%", controls.volume_step * 100.0),
    );
    parts.push("mouse: buttons, bars, rows".to_string());
    parts.join(" | ")
}

/// Visible slice `start..end` of `total` rows in `height` lines, keeping
/// `selected` centered when possible.
pub fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn left_padding() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Build one playlist line: matched filter characters emphasized, the
/// duration pushed to the right edge.
fn row_line(row: &Row, query: &str, active: bool, width: usize) -> Line<'static> {
    let text = row.display();
    let marker = if active { "♪ " } else { "  " };
    let base = if active {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(marker, base)];
    let positions = App::fuzzy_match_positions(&text, query).unwrap_or_default();
    if positions.is_empty() {
        spans.push(Span::styled(text.clone(), base));
    } else {
        let mut next = positions.iter().peekable();
        for (ci, ch) in text.chars().enumerate() {
            if next.peek() == Some(&&ci) {
                next.next();
                spans.push(Span::styled(
                    ch.to_string(),
                    base.add_modifier(Modifier::UNDERLINED).fg(Color::Yellow),
                ));
            } else {
                spans.push(Span::styled(ch.to_string(), base));
            }
        }
    }

    let used = marker.chars().count() + text.chars().count() + row.time.chars().count();
    let gap = width.saturating_sub(used).max(1);
    spans.push(Span::raw(" ".repeat(gap)));
    spans.push(Span::styled(row.time.clone(), base.fg(Color::DarkGray)));
    Line::from(spans)
}

/// Render the entire UI into `frame` and record hit areas on `app`.
pub fn draw(frame: &mut Frame, app: &mut App, ui_settings: &UiSettings, controls: &ControlsSettings) {
    let filter_shown = app.focus == Focus::Filter || !app.filter_query.trim().is_empty();
    let now_playing_height = if ui_settings.show_cover { 5 } else { 4 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(now_playing_height),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(if filter_shown { 3 } else { 0 }),
            Constraint::Length(4),
        ])
        .split(frame.area());
    let mut hit = HitAreas::default();

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spindle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    {
        let mut lines = vec![
            Line::from(Span::styled(
                app.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                app.artist.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ];
        if ui_settings.show_cover {
            match &app.cover {
                Some(cover) => lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", app.cover_alt), Style::default().fg(Color::DarkGray)),
                    Span::raw(cover.clone()),
                ])),
                None => lines.push(Line::default()),
            }
        }
        let state = match &app.media_error {
            Some(e) => Line::from(Span::styled(format!(" {e} "), Style::default().fg(Color::Red))),
            None if app.playing => Line::from(" playing "),
            None => Line::from(" paused "),
        };
        let now_playing = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .padding(left_padding())
                    .title(" now playing ")
                    .title_bottom(state.right_aligned()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(now_playing, chunks[1]);
    }

    // Transport: buttons, elapsed, seek bar, duration
    {
        let block = Block::bordered().title(" playback ");
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Length(6),
                Constraint::Min(5),
                Constraint::Length(6),
            ])
            .split(inner);

        let button = Style::default().add_modifier(Modifier::REVERSED);
        frame.render_widget(
            Paragraph::new("|<<").alignment(Alignment::Center).style(button),
            cells[0],
        );
        frame.render_widget(
            Paragraph::new(app.play_label())
                .alignment(Alignment::Center)
                .style(button),
            cells[2],
        );
        frame.render_widget(
            Paragraph::new(">>|").alignment(Alignment::Center).style(button),
            cells[4],
        );
        frame.render_widget(
            Paragraph::new(app.elapsed.as_str()).alignment(Alignment::Center),
            cells[6],
        );
        let seek = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio((app.seek_value / 100.0).clamp(0.0, 1.0))
            .label("");
        frame.render_widget(seek, cells[7]);
        frame.render_widget(
            Paragraph::new(app.duration.as_str()).alignment(Alignment::Center),
            cells[8],
        );

        hit.prev = cells[0];
        hit.play = cells[2];
        hit.next = cells[4];
        hit.seek = cells[7];
    }

    // Volume
    {
        let block = Block::bordered().title(" volume ");
        let inner = block.inner(chunks[3]);
        let volume = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
            .ratio(app.volume_value.clamp(0.0, 1.0))
            .label(format!("{:.0}%", app.volume_value * 100.0));
        frame.render_widget(volume, chunks[3]);
        hit.volume = inner;
    }

    // Playlist
    {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" playlist ({}) ", app.rows.len()));
        let inner = block.inner(chunks[4]);
        let (start, end) = visible_window(app.rows.len(), inner.height as usize, app.cursor);
        let width = (inner.width as usize).saturating_sub(2);
        let query = app.filter_query.trim();

        if app.rows.is_empty() {
            let empty = Paragraph::new("no tracks match the filter".dark_gray())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[4]);
        } else {
            let items: Vec<ListItem> = app.rows[start..end]
                .iter()
                .map(|row| ListItem::new(row_line(row, query, app.active == Some(row.index), width)))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ")
                .highlight_spacing(HighlightSpacing::Always);
            let mut state = ListState::default();
            state.select(Some(app.cursor.saturating_sub(start)));
            frame.render_stateful_widget(list, chunks[4], &mut state);
        }

        hit.list = inner;
        hit.list_start = start;
    }

    // Filter prompt
    if filter_shown {
        let title = if app.focus == Focus::Filter {
            " filter (enter keeps, esc clears) "
        } else {
            " filter "
        };
        let block = Block::bordered().padding(left_padding()).title(title);
        let inner = block.inner(chunks[5]);
        frame.render_widget(
            Paragraph::new(format!("/{}", app.filter_query)).block(block),
            chunks[5],
        );
        if app.focus == Focus::Filter {
            let x = inner.x + 1 + app.filter_query.chars().count() as u16;
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_padding()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[6]);

    app.hit = hit;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ViewUpdate;
    use crate::playlist::{Playlist, Track};
    use ratatui::{Terminal, backend::TestBackend};

    fn app_with_tracks(n: usize) -> App {
        let tracks = (0..n)
            .map(|i| Track::new(format!("Song {i}"), "Band", format!("audio/{i}.mp3")))
            .collect();
        let mut app = App::new();
        app.build_playlist(&Playlist::new(tracks).unwrap());
        app
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| draw(f, app, &UiSettings::default(), &ControlsSettings::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn window_keeps_selection_centered() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(100, 10, 0), (0, 10));
        assert_eq!(visible_window(100, 10, 50), (45, 55));
        assert_eq!(visible_window(100, 10, 99), (90, 100));
        assert_eq!(visible_window(3, 0, 1), (0, 3));
    }

    #[test]
    fn controls_text_mentions_configured_steps() {
        let text = controls_text(&ControlsSettings {
            scrub_seconds: 7,
            volume_step: 0.1,
        });
        assert!(text.contains("[H/L] scrub -/+7s"));
        assert!(text.contains("±10%"));
        assert!(text.contains("[q] quit"));
    }

    #[test]
    fn draw_records_hit_areas() {
        let mut app = app_with_tracks(3);
        let screen = render(&mut app, 80, 30);

        assert!(screen.contains("Band - Song 1"));
        assert!(screen.contains("Play"));
        let hit = app.hit;
        assert!(hit.prev.width > 0 && hit.play.width > 0 && hit.next.width > 0);
        assert_eq!(hit.prev.y, hit.seek.y);
        assert!(hit.seek.x > hit.next.x);
        assert!(hit.volume.y > hit.seek.y);
        assert!(hit.list.y > hit.volume.y);
        assert_eq!(hit.list_start, 0);
    }

    #[test]
    fn draw_scrolls_long_playlists() {
        let mut app = app_with_tracks(200);
        app.apply(ViewUpdate::ActiveRow(150));
        render(&mut app, 80, 30);

        let height = app.hit.list.height as usize;
        assert!(app.hit.list_start > 0);
        assert!(app.hit.list_start <= 150 && 150 < app.hit.list_start + height);
    }

    #[test]
    fn missing_cover_renders_nothing() {
        let mut app = app_with_tracks(1);
        app.apply(ViewUpdate::NowPlaying {
            title: "Song 0".into(),
            artist: "Band".into(),
            cover: None,
            cover_alt: "Song 0 – Band cover".into(),
        });
        let screen = render(&mut app, 80, 30);
        assert!(!screen.contains("cover:"));

        app.apply(ViewUpdate::NowPlaying {
            title: "Song 0".into(),
            artist: "Band".into(),
            cover: Some("art/0.jpg".into()),
            cover_alt: "Song 0 – Band cover".into(),
        });
        let screen = render(&mut app, 80, 30);
        assert!(screen.contains("art/0.jpg"));
    }

    #[test]
    fn media_error_replaces_play_state() {
        let mut app = app_with_tracks(1);
        assert!(render(&mut app, 80, 30).contains("paused"));

        app.media_error = Some("cannot open".into());
        let screen = render(&mut app, 80, 30);
        assert!(screen.contains("cannot open"));
        assert!(!screen.contains(" paused "));
    }
}
