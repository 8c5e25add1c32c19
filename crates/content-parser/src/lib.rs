//! Turns generated prose into structured card content
//!
//! The parser is a set of line heuristics behind a single entry point,
//! [`ContentParser::parse`]. It never fails: empty or garbled input comes back
//! as a minimal record titled with the requested topic.
//!
//! # Example
//!
//! ```
//! use mentorscroll_content_parser::{ContentParser, ParseContext};
//! use mentorscroll_core::{ContentType, ExpertSlug};
//!
//! let ctx = ParseContext::new("Habits", ExpertSlug::new("dr-mind"), ContentType::Practical);
//! let parsed = ContentParser::new().parse(
//!     "SMALL WINS\n- make your bed\n- walk ten minutes\nKey Insight: consistency beats intensity",
//!     &ctx,
//! );
//!
//! assert_eq!(parsed.title, "SMALL WINS");
//! assert_eq!(parsed.action_items, vec!["make your bed", "walk ten minutes"]);
//! assert_eq!(parsed.key_insight.as_deref(), Some("consistency beats intensity"));
//! ```

mod lines;
mod metadata;
mod outline;
mod parser;
mod quiz;

pub use metadata::{decorate, reading_minutes, synthesize_stats, StatRanges, WORDS_PER_MINUTE};
pub use outline::{parse_series_outline, EpisodeOutline};
pub use parser::{ContentParser, ParseContext, MAX_TITLE_CHARS, MIN_PARAGRAPH_CHARS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _ = ContentParser::new();
        let _ = StatRanges::default();
        let _ = parse_series_outline("");
        let _ = reading_minutes(0);
    }
}
