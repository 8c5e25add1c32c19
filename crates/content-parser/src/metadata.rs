//! Synthetic presentation metadata
//!
//! The numbers produced here are decoration for the feed. They are random
//! within plausible ranges and mean nothing. Do not store, aggregate or report
//! them as analytics.

use mentorscroll_core::{
    find_expert, icon_for, AnimationStyle, BackgroundPattern, ColorTheme, Difficulty,
    EngagementStats, ExpertSlug, ParsedContent, Presentation,
};
use rand::Rng;
use std::ops::Range;

/// Reading speed used for the time estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Bounds for each synthetic counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRanges {
    pub views: Range<u32>,
    pub likes: Range<u32>,
    pub saves: Range<u32>,
    pub discussions: Range<u32>,
}

impl Default for StatRanges {
    fn default() -> Self {
        Self {
            views: 1_000..51_000,
            likes: 100..5_100,
            saves: 50..1_050,
            discussions: 10..210,
        }
    }
}

impl StatRanges {
    /// Ranges for series episodes, which start from a warmer audience
    pub fn series() -> Self {
        Self {
            views: 5_000..35_000,
            likes: 200..3_200,
            saves: 100..900,
            discussions: 20..170,
        }
    }
}

/// Draws fake engagement counters from `ranges`
pub fn synthesize_stats<R: Rng + ?Sized>(rng: &mut R, ranges: &StatRanges) -> EngagementStats {
    EngagementStats {
        views: draw(rng, &ranges.views),
        likes: draw(rng, &ranges.likes),
        saves: draw(rng, &ranges.saves),
        discussions: draw(rng, &ranges.discussions),
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, range: &Range<u32>) -> u32 {
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range.clone())
    }
}

/// `ceil(words / 200)` minutes, never less than one
pub fn reading_minutes(word_count: usize) -> u32 {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Builds the full presentation block for a generated card
pub fn decorate<R: Rng + ?Sized>(
    parsed: &ParsedContent,
    expert: &ExpertSlug,
    difficulty: Difficulty,
    ranges: &StatRanges,
    rng: &mut R,
) -> Presentation {
    let profile = find_expert(expert.as_str());
    Presentation {
        theme: profile.map_or_else(ColorTheme::neutral, |e| e.theme()),
        icon: icon_for(expert).to_string(),
        pattern: profile.map_or(BackgroundPattern::Dots, |e| e.pattern),
        animation: AnimationStyle::for_difficulty(difficulty),
        stats: synthesize_stats(rng, ranges),
        reading_minutes: reading_minutes(parsed.word_count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorscroll_core::BodySection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(0), 1);
        assert_eq!(reading_minutes(200), 1);
        assert_eq!(reading_minutes(201), 2);
        assert_eq!(reading_minutes(1000), 5);
    }

    #[test]
    fn test_stats_within_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        let ranges = StatRanges::default();
        for _ in 0..500 {
            let s = synthesize_stats(&mut rng, &ranges);
            assert!(ranges.views.contains(&s.views));
            assert!(ranges.likes.contains(&s.likes));
            assert!(ranges.saves.contains(&s.saves));
            assert!(ranges.discussions.contains(&s.discussions));
        }
    }

    #[test]
    fn test_seeded_stats_are_deterministic() {
        let ranges = StatRanges::default();
        let a = synthesize_stats(&mut StdRng::seed_from_u64(1), &ranges);
        let b = synthesize_stats(&mut StdRng::seed_from_u64(1), &ranges);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_range_yields_start() {
        let ranges = StatRanges {
            views: 7..7,
            ..StatRanges::default()
        };
        let s = synthesize_stats(&mut StdRng::seed_from_u64(2), &ranges);
        assert_eq!(s.views, 7);
    }

    #[test]
    fn test_decorate_known_expert() {
        let mut parsed = ParsedContent::titled("Tunnels");
        parsed
            .body_sections
            .push(BodySection::Paragraph("word ".repeat(450)));
        let p = decorate(
            &parsed,
            &ExpertSlug::new("dr-quantum"),
            Difficulty::Advanced,
            &StatRanges::default(),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(p.pattern, BackgroundPattern::Particles);
        assert_eq!(p.animation, AnimationStyle::Pulse);
        assert_eq!(p.theme.from, "purple-600");
        assert_eq!(p.reading_minutes, 3);
    }

    #[test]
    fn test_decorate_unknown_expert() {
        let p = decorate(
            &ParsedContent::titled("x"),
            &ExpertSlug::new("guest"),
            Difficulty::Beginner,
            &StatRanges::default(),
            &mut StdRng::seed_from_u64(4),
        );
        assert_eq!(p.icon, "🤖");
        assert_eq!(p.theme, ColorTheme::neutral());
        assert_eq!(p.pattern, BackgroundPattern::Dots);
    }
}
