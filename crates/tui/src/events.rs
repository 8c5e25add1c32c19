// crates/tui/src/events.rs
//! Terminal event polling and mouse drag tracking

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use mentorscroll_deck::{Edge, InputEvent};
use std::time::Duration;

/// Pixels one terminal column stands for when measuring a drag
pub const PX_PER_COLUMN: f32 = 8.0;

/// Pixels one terminal row stands for when measuring a drag
pub const PX_PER_ROW: f32 = 16.0;

/// Columns at each side of the screen that act as edge buttons
pub const EDGE_ZONE_COLUMNS: u16 = 3;

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Nothing happened within the tick rate
    Tick,
    Quit,
    Resize(u16, u16),
}

/// Polls crossterm with a fixed tick rate
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Waits at most `timeout` for the next event
    pub fn next_within(&self, timeout: Duration) -> crate::error::TuiResult<AppEvent> {
        if event::poll(timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        Ok(AppEvent::Quit)
                    } else {
                        Ok(AppEvent::Key(key))
                    }
                }
                CrosstermEvent::Mouse(mouse) => Ok(AppEvent::Mouse(mouse)),
                CrosstermEvent::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }

    pub fn next(&self) -> crate::error::TuiResult<AppEvent> {
        self.next_within(self.tick_rate)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

/// Turns left-button press and release pairs into deck input
///
/// A release that barely moved is a click; clicks inside an edge zone become
/// edge buttons. Anything else is reported as a drag in pixels.
#[derive(Debug, Default)]
pub struct DragTracker {
    start: Option<(u16, u16)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Feeds one mouse event; `width` is the terminal width in columns
    pub fn feed(&mut self, mouse: &MouseEvent, width: u16) -> Option<InputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (column, row) = self.start.take()?;
                let dx = (mouse.column as f32 - column as f32) * PX_PER_COLUMN;
                let dy = (mouse.row as f32 - row as f32) * PX_PER_ROW;

                if dx == 0.0 && dy == 0.0 {
                    return edge_at(mouse.column, width).map(InputEvent::EdgeButton);
                }
                Some(InputEvent::Drag { dx, dy })
            }
            _ => None,
        }
    }
}

/// Which edge zone `column` falls in, if any
pub fn edge_at(column: u16, width: u16) -> Option<Edge> {
    if width <= EDGE_ZONE_COLUMNS * 2 {
        return None;
    }
    if column < EDGE_ZONE_COLUMNS {
        Some(Edge::Left)
    } else if column >= width - EDGE_ZONE_COLUMNS {
        Some(Edge::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_event_handler_default() {
        let handler = EventHandler::default();
        assert_eq!(handler.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn test_drag_measured_in_pixels() {
        let mut tracker = DragTracker::new();
        assert_eq!(
            tracker.feed(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 10), 80),
            None
        );
        assert!(tracker.is_dragging());

        let input = tracker.feed(&mouse(MouseEventKind::Up(MouseButton::Left), 30, 11), 80);
        assert_eq!(input, Some(InputEvent::Drag { dx: -80.0, dy: 16.0 }));
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_click_on_edge() {
        let mut tracker = DragTracker::new();
        tracker.feed(&mouse(MouseEventKind::Down(MouseButton::Left), 79, 5), 80);
        let input = tracker.feed(&mouse(MouseEventKind::Up(MouseButton::Left), 79, 5), 80);
        assert_eq!(input, Some(InputEvent::EdgeButton(Edge::Right)));

        tracker.feed(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 5), 80);
        let input = tracker.feed(&mouse(MouseEventKind::Up(MouseButton::Left), 40, 5), 80);
        assert_eq!(input, None);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut tracker = DragTracker::new();
        let input = tracker.feed(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 5), 80);
        assert_eq!(input, None);
    }

    #[test]
    fn test_edge_zones() {
        assert_eq!(edge_at(0, 80), Some(Edge::Left));
        assert_eq!(edge_at(2, 80), Some(Edge::Left));
        assert_eq!(edge_at(3, 80), None);
        assert_eq!(edge_at(77, 80), Some(Edge::Right));
        assert_eq!(edge_at(0, 6), None);
    }
}
