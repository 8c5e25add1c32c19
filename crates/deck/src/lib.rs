//! Card deck navigation for MentorScroll
//!
//! [`DeckNavigator`] keeps the current position in an ordered collection of
//! [`ReelCard`](mentorscroll_core::ReelCard)s, serializes navigation through a
//! two-phase transition lock and computes the stacked geometry used to draw
//! the current card and its neighbours.
//!
//! No operation here can fail. A request is either accepted or dropped.
//!
//! # Example
//!
//! ```
//! use mentorscroll_deck::{DeckNavigator, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut deck = DeckNavigator::with_clock(Vec::new(), clock.clone());
//! assert!(!deck.next());
//! clock.advance(Duration::from_secs(1));
//! assert!(deck.tick().is_empty());
//! ```

mod clock;
mod input;
mod navigator;
mod tag;
pub mod transform;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{Edge, InputEvent, InputMapper, NavCommand, NavKey, DEFAULT_DRAG_THRESHOLD};
pub use navigator::{DeckEvent, DeckNavigator, DeckStatus, Direction, TransitionTimings};
pub use tag::{DeckId, RequestTag, Tagged};
pub use transform::{CardTransform, MAX_VISIBLE_DISTANCE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _ = InputMapper::default();
        let _ = TransitionTimings::default();
        let _ = DeckId::new();
        let _ = CardTransform::IDENTITY;
        let _: DeckNavigator = DeckNavigator::new(Vec::new());
    }
}
