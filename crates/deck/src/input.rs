//! Normalizing drags, keys and edge buttons into navigation commands

use serde::{Deserialize, Serialize};

/// Default horizontal travel, in pixels, before a drag counts as a swipe
pub const DEFAULT_DRAG_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

/// Raw directional input from any source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Completed drag gesture; negative `dx` is leftward
    Drag { dx: f32, dy: f32 },
    Key(NavKey),
    EdgeButton(Edge),
}

/// What the deck should do in response to input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavCommand {
    Next,
    Previous,
}

/// Maps every input source onto the same pair of commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    drag_threshold: f32,
}

impl InputMapper {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            drag_threshold: drag_threshold.abs(),
        }
    }

    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    /// Returns the command for `event`, or `None` if it should be ignored
    ///
    /// Swiping left brings the next card in, like pushing the top card away.
    /// A drag that moved more vertically than horizontally is ambiguous and
    /// discarded, as is one that stopped short of the threshold.
    pub fn map(&self, event: InputEvent) -> Option<NavCommand> {
        match event {
            InputEvent::Drag { dx, dy } => {
                if dy.abs() > dx.abs() {
                    log::trace!("Drag discarded: vertical ({}, {})", dx, dy);
                    return None;
                }
                if dx.abs() < self.drag_threshold {
                    return None;
                }
                if dx < 0.0 {
                    Some(NavCommand::Next)
                } else {
                    Some(NavCommand::Previous)
                }
            }
            InputEvent::Key(NavKey::Right) | InputEvent::EdgeButton(Edge::Right) => {
                Some(NavCommand::Next)
            }
            InputEvent::Key(NavKey::Left) | InputEvent::EdgeButton(Edge::Left) => {
                Some(NavCommand::Previous)
            }
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}
