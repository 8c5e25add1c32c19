//! Reel cards and series membership

use crate::experts::ExpertSlug;
use crate::types::common::{finish, Timestamp, Validator};
use crate::types::content::{ContentType, Difficulty, ParsedContent};
use crate::types::presentation::Presentation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    /// Creates a new random CardId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CardId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a learning series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesId(Uuid);

impl SeriesId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a card inside an ordered series
///
/// `1 <= episode <= total_episodes` holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSeriesRef")]
pub struct SeriesRef {
    series_id: SeriesId,
    episode: u32,
    total_episodes: u32,
}

impl SeriesRef {
    /// Returns `None` unless `1 <= episode <= total_episodes`
    pub fn new(series_id: SeriesId, episode: u32, total_episodes: u32) -> Option<Self> {
        if episode == 0 || episode > total_episodes {
            return None;
        }
        Some(Self {
            series_id,
            episode,
            total_episodes,
        })
    }

    pub fn series_id(&self) -> SeriesId {
        self.series_id
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn total_episodes(&self) -> u32 {
        self.total_episodes
    }

    pub fn is_last(&self) -> bool {
        self.episode == self.total_episodes
    }
}

#[derive(Deserialize)]
struct RawSeriesRef {
    series_id: SeriesId,
    episode: u32,
    total_episodes: u32,
}

impl TryFrom<RawSeriesRef> for SeriesRef {
    type Error = String;

    fn try_from(raw: RawSeriesRef) -> Result<Self, Self::Error> {
        SeriesRef::new(raw.series_id, raw.episode, raw.total_episodes).ok_or_else(|| {
            format!(
                "episode {} outside 1..={}",
                raw.episode, raw.total_episodes
            )
        })
    }
}

/// Card payload: generated text or a reference to external media, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardBody {
    Generated(ParsedContent),
    Media {
        video_url: String,
        thumbnail_url: Option<String>,
    },
}

/// One unit of content in the deck
///
/// Cards are built once and then only read. The deck owns them and hands out
/// shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelCard {
    pub id: CardId,
    pub title: String,
    pub subtitle: String,
    pub topic: String,
    pub body: CardBody,
    pub expert: ExpertSlug,
    pub tags: BTreeSet<String>,
    pub difficulty: Difficulty,
    pub content_type: ContentType,
    pub series: Option<SeriesRef>,
    pub presentation: Presentation,
    pub created_at: Timestamp,
}

impl ReelCard {
    /// Creates a card from parsed generator output
    pub fn generated(
        expert: ExpertSlug,
        topic: impl Into<String>,
        content_type: ContentType,
        parsed: ParsedContent,
    ) -> Self {
        Self {
            id: CardId::new(),
            title: parsed.title.clone(),
            subtitle: String::new(),
            topic: topic.into(),
            body: CardBody::Generated(parsed),
            expert,
            tags: BTreeSet::new(),
            difficulty: Difficulty::default(),
            content_type,
            series: None,
            presentation: Presentation::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a card pointing at a static video
    pub fn media(
        expert: ExpertSlug,
        title: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: CardId::new(),
            topic: title.clone(),
            title,
            subtitle: String::new(),
            body: CardBody::Media {
                video_url: video_url.into(),
                thumbnail_url: None,
            },
            expert,
            tags: BTreeSet::new(),
            difficulty: Difficulty::default(),
            content_type: ContentType::default(),
            series: None,
            presentation: Presentation::default(),
            created_at: Timestamp::now(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_series(mut self, series: SeriesRef) -> Self {
        self.series = Some(series);
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        if let CardBody::Media { thumbnail_url, .. } = &mut self.body {
            *thumbnail_url = Some(url.into());
        }
        self
    }

    /// True for AI authored cards
    pub fn is_generated(&self) -> bool {
        matches!(self.body, CardBody::Generated(_))
    }

    /// Parsed text of a generated card
    pub fn content(&self) -> Option<&ParsedContent> {
        match &self.body {
            CardBody::Generated(parsed) => Some(parsed),
            CardBody::Media { .. } => None,
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match &self.body {
            CardBody::Media { video_url, .. } => Some(video_url),
            CardBody::Generated(_) => None,
        }
    }

    pub fn display_duration(&self) -> Duration {
        self.content_type.display_duration()
    }
}

impl Validator for ReelCard {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.expert.as_str().is_empty() {
            errors.push("Expert reference cannot be empty".to_string());
        }

        match &self.body {
            CardBody::Generated(parsed) => {
                if let Err(mut inner) = parsed.validate() {
                    errors.append(&mut inner);
                }
            }
            CardBody::Media { video_url, .. } => {
                if video_url.trim().is_empty() {
                    errors.push("Media card needs a video URL".to_string());
                }
            }
        }

        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::content::BodySection;

    fn parsed(title: &str) -> ParsedContent {
        let mut p = ParsedContent::titled(title);
        p.body_sections
            .push(BodySection::Paragraph("A long enough paragraph".into()));
        p
    }

    #[test]
    fn test_card_id_roundtrip() {
        let id = CardId::new();
        assert_eq!(CardId::from_string(&id.as_string()).unwrap(), id);
        assert_ne!(CardId::new(), id);
    }

    #[test]
    fn test_series_ref_bounds() {
        let series = SeriesId::new();
        assert!(SeriesRef::new(series, 0, 3).is_none());
        assert!(SeriesRef::new(series, 4, 3).is_none());
        assert!(SeriesRef::new(series, 1, 0).is_none());
        let last = SeriesRef::new(series, 3, 3).unwrap();
        assert!(last.is_last());
        assert_eq!(last.series_id(), series);
    }

    #[test]
    fn test_series_ref_deserialize_checks_bounds() {
        let id = SeriesId::new();
        let bad = format!(
            r#"{{"series_id":"{}","episode":5,"total_episodes":2}}"#,
            id
        );
        assert!(serde_json::from_str::<SeriesRef>(&bad).is_err());
    }

    #[test]
    fn test_generated_card() {
        let card = ReelCard::generated(
            ExpertSlug::new("dr-quantum"),
            "Quantum tunneling",
            ContentType::Explanation,
            parsed("Tunneling"),
        )
        .with_tags(["physics", "physics", "quantum"])
        .with_difficulty(Difficulty::Advanced);

        assert!(card.is_generated());
        assert_eq!(card.title, "Tunneling");
        assert_eq!(card.tags.len(), 2);
        assert_eq!(card.display_duration().as_secs(), 45);
        assert!(card.content().is_some());
        assert!(card.video_url().is_none());
        assert!(card.is_valid());
    }

    #[test]
    fn test_media_card() {
        let card = ReelCard::media(ExpertSlug::new("eco-emma"), "Solar", "https://cdn/v.mp4")
            .with_thumbnail("https://cdn/t.jpg");

        assert!(!card.is_generated());
        assert_eq!(card.video_url(), Some("https://cdn/v.mp4"));
        assert!(matches!(
            card.body,
            CardBody::Media { thumbnail_url: Some(_), .. }
        ));
        assert!(card.is_valid());
    }

    #[test]
    fn test_media_card_requires_url() {
        let card = ReelCard::media(ExpertSlug::new("eco-emma"), "Solar", " ");
        assert!(!card.is_valid());
    }
}
