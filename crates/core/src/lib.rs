//! Shared domain model for MentorScroll
//!
//! Holds the card types the deck navigates, the parsed content records the
//! parser produces, the static expert catalog and the application error type.
//!
//! # Example
//!
//! ```
//! use mentorscroll_core::{ContentType, ExpertSlug, ParsedContent, ReelCard};
//!
//! let card = ReelCard::generated(
//!     ExpertSlug::new("dr-quantum"),
//!     "Quantum tunneling",
//!     ContentType::Hook,
//!     ParsedContent::titled("You're tunneling right now"),
//! );
//! assert!(card.is_generated());
//! ```

pub mod error;
pub mod experts;
pub mod types;

pub use error::{AppError, ErrorSeverity, RecoveryAction, Result};
pub use experts::{
    catalog, experts_in_domain, find_expert, icon_for, Expert, ExpertSlug, KeywordEntry,
    KeywordTable,
};
pub use types::{
    format_count, AnimationStyle, BackgroundPattern, BodySection, CardBody, CardId, ColorTheme,
    ContentType, Difficulty, EngagementStats, ParsedContent, Presentation, Quiz, ReelCard,
    SeriesId, SeriesRef, Timestamp, Validator,
};
