//! Key and mouse mapping.
//!
//! Terminal events are turned into `Action`s here, without touching any
//! state, so the event loop only has to execute them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::app::{App, Focus};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TogglePlay,
    Next,
    Prev,
    /// Load and play a track by playlist index.
    PlayRow(usize),
    /// Play the row under the cursor.
    PlaySelected,
    CursorDown,
    CursorUp,
    /// Drag input on the seek control, percent.
    SeekDrag(f64),
    /// Release of a seek drag, percent.
    SeekRelease(f64),
    ScrubForward,
    ScrubBack,
    /// Absolute volume from the volume control.
    SetVolume(f64),
    VolumeUp,
    VolumeDown,
    OpenFilter,
    FilterInput(char),
    FilterBackspace,
    /// Leave the prompt and drop the filter.
    FilterCancel,
    /// Leave the prompt and keep the filter.
    FilterSubmit,
    Quit,
}

/// Map a key press. While the filter prompt has focus, keys go to the prompt
/// and global shortcuts are ignored.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match focus {
        Focus::Filter => match key.code {
            KeyCode::Esc => Some(Action::FilterCancel),
            KeyCode::Enter => Some(Action::FilterSubmit),
            KeyCode::Backspace => Some(Action::FilterBackspace),
            KeyCode::Char(c) if !c.is_control() => Some(Action::FilterInput(c)),
            _ => None,
        },
        Focus::Playlist => match key.code {
            KeyCode::Char(' ') => Some(Action::TogglePlay),
            KeyCode::Right => Some(Action::Next),
            KeyCode::Left => Some(Action::Prev),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorUp),
            KeyCode::Enter => Some(Action::PlaySelected),
            KeyCode::Char('L') => Some(Action::ScrubForward),
            KeyCode::Char('H') => Some(Action::ScrubBack),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::VolumeUp),
            KeyCode::Char('-') => Some(Action::VolumeDown),
            KeyCode::Char('/') => Some(Action::OpenFilter),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

/// Fraction of `area`'s width at `column`, `0.0..=1.0`.
pub fn ratio_at(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x) as f64;
    (offset / (area.width - 1) as f64).clamp(0.0, 1.0)
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.width > 0 && area.contains(Position { x: column, y: row })
}

/// Map a mouse event against the hit areas of the last draw.
pub fn map_mouse(ev: MouseEvent, app: &App) -> Option<Action> {
    let (col, row) = (ev.column, ev.row);
    let areas = &app.hit;

    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if hit(areas.seek, col, row) {
                Some(Action::SeekDrag(ratio_at(areas.seek, col) * 100.0))
            } else if hit(areas.volume, col, row) {
                Some(Action::SetVolume(ratio_at(areas.volume, col)))
            } else if hit(areas.prev, col, row) {
                Some(Action::Prev)
            } else if hit(areas.play, col, row) {
                Some(Action::TogglePlay)
            } else if hit(areas.next, col, row) {
                Some(Action::Next)
            } else if hit(areas.list, col, row) {
                let pos = areas.list_start + (row - areas.list.y) as usize;
                app.rows.get(pos).map(|r| Action::PlayRow(r.index))
            } else {
                None
            }
        }
        // Drags keep tracking the control they started on, even off its row.
        MouseEventKind::Drag(MouseButton::Left) if app.seek_drag => {
            Some(Action::SeekDrag(ratio_at(areas.seek, col) * 100.0))
        }
        MouseEventKind::Drag(MouseButton::Left) if hit(areas.volume, col, row) => {
            Some(Action::SetVolume(ratio_at(areas.volume, col)))
        }
        MouseEventKind::Up(MouseButton::Left) if app.seek_drag => {
            Some(Action::SeekRelease(ratio_at(areas.seek, col) * 100.0))
        }
        _ => None,
    }
}
