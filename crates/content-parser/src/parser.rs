//! Free text to [`ParsedContent`]

use crate::lines::{
    bullet_body, has_signal_emoji, hook_text, insight_text, is_action_trigger, is_shouted,
    list_item, markdown_heading, step_body,
};
use crate::metadata::{decorate, StatRanges};
use crate::quiz::{parse_quiz, quiz_opening};
use mentorscroll_core::{
    find_expert, BodySection, ContentType, Difficulty, ExpertSlug, ParsedContent, ReelCard,
};
use rand::Rng;

/// Lines at or below this many characters are dropped as noise
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// First lines at or above this many characters never become the title
pub const MAX_TITLE_CHARS: usize = 80;

/// What the caller already knows about the text being parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    pub topic: String,
    pub expert: ExpertSlug,
    pub content_type: ContentType,
    pub difficulty: Difficulty,
}

impl ParseContext {
    pub fn new(topic: impl Into<String>, expert: ExpertSlug, content_type: ContentType) -> Self {
        Self {
            topic: topic.into(),
            expert,
            content_type,
            difficulty: Difficulty::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// Line based extractor for generated card text
///
/// Parsing never fails. Anything the heuristics cannot place is dropped and
/// the result is always a valid record.
#[derive(Debug, Clone, Default)]
pub struct ContentParser {
    stat_ranges: StatRanges,
}

impl ContentParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stat_ranges(mut self, ranges: StatRanges) -> Self {
        self.stat_ranges = ranges;
        self
    }

    pub fn stat_ranges(&self) -> &StatRanges {
        &self.stat_ranges
    }

    /// Extracts title, hook, body, insight, action items and quiz from `text`
    pub fn parse(&self, text: &str, ctx: &ParseContext) -> ParsedContent {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let Some(&first) = lines.first() else {
            log::debug!("Empty response for '{}', using topic as title", ctx.topic);
            return ParsedContent::titled(ctx.topic.as_str());
        };

        let heading = markdown_heading(first);
        let first_text = heading.unwrap_or(first);
        let mut parsed = ParsedContent::titled(resolve_title(first_text, &ctx.topic));

        let mut collecting = false;
        let mut i = 0;

        if heading.is_some() || has_signal_emoji(first) || is_shouted(first) {
            if !is_usable_title(first_text) {
                parsed
                    .body_sections
                    .push(BodySection::Heading(first_text.to_string()));
            }
            collecting = is_shouted(first_text);
            i = 1;
        }

        while i < lines.len() {
            let line = lines[i];
            i += 1;

            if let Some(opening) = quiz_opening(line) {
                let (quiz, consumed) = parse_quiz(opening, &lines[i..]);
                i += consumed;
                if parsed.quiz.is_none() {
                    parsed.quiz = quiz;
                }
                collecting = false;
                continue;
            }

            if collecting {
                if let Some(item) = list_item(line) {
                    if !item.is_empty() {
                        parsed.action_items.push(item.to_string());
                    }
                    continue;
                }
                collecting = false;
            }

            classify(line, &mut parsed);

            if is_action_trigger(line) && list_item(line).is_none() {
                collecting = true;
            }
        }

        log::debug!(
            "Parsed '{}': {} sections, {} action items, quiz: {}",
            parsed.title,
            parsed.body_sections.len(),
            parsed.action_items.len(),
            parsed.quiz.is_some()
        );
        parsed
    }

    /// Parses `text` and packages it as a decorated card
    ///
    /// The engagement counters on the returned card are synthetic.
    pub fn build_card<R: Rng + ?Sized>(
        &self,
        text: &str,
        ctx: &ParseContext,
        rng: &mut R,
    ) -> ReelCard {
        let parsed = self.parse(text, ctx);
        let presentation = decorate(
            &parsed,
            &ctx.expert,
            ctx.difficulty,
            &self.stat_ranges,
            rng,
        );

        let profile = find_expert(ctx.expert.as_str());
        let subtitle = profile.map_or("", |e| e.short_description);
        let expert_tags = profile.map_or(&[][..], |e| e.tags);

        let tags = expert_tags
            .iter()
            .map(|t| t.to_string())
            .chain([ctx.content_type.as_str().to_string(), "ai-generated".to_string()]);

        ReelCard::generated(
            ctx.expert.clone(),
            ctx.topic.as_str(),
            ctx.content_type,
            parsed,
        )
        .with_subtitle(subtitle)
        .with_tags(tags)
        .with_difficulty(ctx.difficulty)
        .with_presentation(presentation)
    }
}

fn is_usable_title(line: &str) -> bool {
    line.chars().count() < MAX_TITLE_CHARS && !line.contains('.')
}

fn resolve_title(first: &str, topic: &str) -> String {
    if is_usable_title(first) {
        first.to_string()
    } else {
        topic.to_string()
    }
}

/// Files one line into the body or a dedicated field
fn classify(line: &str, parsed: &mut ParsedContent) {
    if let Some(step) = step_body(line) {
        if !step.is_empty() {
            parsed.body_sections.push(BodySection::Step(step.to_string()));
        }
    } else if let Some(bullet) = bullet_body(line) {
        if !bullet.is_empty() {
            parsed
                .body_sections
                .push(BodySection::Bullet(bullet.to_string()));
        }
    } else if let Some(heading) = markdown_heading(line) {
        parsed
            .body_sections
            .push(BodySection::Heading(heading.to_string()));
    } else if let Some(insight) = insight_text(line) {
        if parsed.key_insight.is_none() && !insight.is_empty() {
            parsed.key_insight = Some(insight);
        }
    } else if let Some(hook) = hook_text(line) {
        if parsed.hook_line.is_none() && !hook.is_empty() {
            parsed.hook_line = Some(hook);
        }
    } else if line.chars().count() > MIN_PARAGRAPH_CHARS && line != parsed.title {
        parsed
            .body_sections
            .push(BodySection::Paragraph(line.to_string()));
    }
}
