//! Domain types for MentorScroll
//!
//! - `reel`: cards, card ids and series membership
//! - `content`: parsed content records, difficulty and content type
//! - `presentation`: cosmetic decoration and synthetic engagement numbers
//! - `common`: timestamps and the `Validator` trait

mod common;
mod content;
mod presentation;
mod reel;

pub use common::{Timestamp, Validator};
pub use content::{BodySection, ContentType, Difficulty, ParsedContent, Quiz};
pub use presentation::{
    format_count, AnimationStyle, BackgroundPattern, ColorTheme, EngagementStats, Presentation,
};
pub use reel::{CardBody, CardId, ReelCard, SeriesId, SeriesRef};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _card_id: CardId = CardId::new();
        let _series_id: SeriesId = SeriesId::new();
        let _presentation = Presentation::default();
        let _parsed = ParsedContent::titled("t");
    }
}
