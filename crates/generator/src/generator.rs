// crates/generator/src/generator.rs
//! Turning persona replies into reel cards

use crate::directory::PersonaDirectory;
use crate::error::{GeneratorError, GeneratorResult};
use crate::prompts;
use mentorscroll_content_parser::{parse_series_outline, ContentParser, ParseContext, StatRanges};
use mentorscroll_core::{
    catalog, find_expert, ContentType, Difficulty, Expert, ExpertSlug, KeywordTable, ReelCard,
    SeriesId, SeriesRef,
};
use mentorscroll_persona_client::{PersonaService, UserId};
use mentorscroll_resilience::Pacer;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Tuning for the multi-call operations
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Spacing between calls when collecting perspectives
    pub perspective_delay: Duration,
    /// Spacing between calls when generating trending reels
    pub trending_delay: Duration,
    /// Spacing between episode calls of a series
    pub series_delay: Duration,
    pub max_perspectives: usize,
    pub keywords: KeywordTable,
    pub series_difficulty: Difficulty,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            perspective_delay: Duration::from_millis(500),
            trending_delay: Duration::from_millis(200),
            series_delay: Duration::from_millis(500),
            max_perspectives: 3,
            keywords: KeywordTable::default(),
            series_difficulty: Difficulty::Intermediate,
        }
    }
}

impl GeneratorSettings {
    pub fn with_perspective_delay(mut self, delay: Duration) -> Self {
        self.perspective_delay = delay;
        self
    }

    pub fn with_trending_delay(mut self, delay: Duration) -> Self {
        self.trending_delay = delay;
        self
    }

    pub fn with_series_delay(mut self, delay: Duration) -> Self {
        self.series_delay = delay;
        self
    }

    pub fn with_max_perspectives(mut self, max: usize) -> Self {
        self.max_perspectives = max;
        self
    }

    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }
}

/// Generates reels by prompting expert personas and parsing their replies
///
/// All persona calls go through [`PersonaService::generate`], so nothing the
/// generator asks shows up in a persona's chat history.
pub struct ReelGenerator<S: ?Sized> {
    service: Arc<S>,
    user: UserId,
    directory: PersonaDirectory,
    parser: ContentParser,
    series_parser: ContentParser,
    settings: GeneratorSettings,
}

impl<S: PersonaService + ?Sized> ReelGenerator<S> {
    pub fn new(service: Arc<S>, user: UserId, directory: PersonaDirectory) -> Self {
        Self {
            service,
            user,
            directory,
            parser: ContentParser::new(),
            series_parser: ContentParser::new().with_stat_ranges(StatRanges::series()),
            settings: GeneratorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_parser(mut self, parser: ContentParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn directory(&self) -> &PersonaDirectory {
        &self.directory
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Asks `expert` for one reel about `topic` and builds a card from the reply
    pub async fn generate_reel<R: Rng + ?Sized>(
        &self,
        expert: &ExpertSlug,
        topic: &str,
        content_type: ContentType,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> GeneratorResult<ReelCard> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GeneratorError::InvalidRequest(
                "A topic is required".to_string(),
            ));
        }
        let persona = self.directory.resolve(expert)?;
        let profile = find_expert(expert.as_str());

        let prompt = prompts::reel_prompt(profile, topic, content_type, difficulty);
        log::debug!("Generating {} reel on '{}' with {}", content_type, topic, expert);
        let reply = self.service.generate(&self.user, persona, &prompt).await?;

        let ctx =
            ParseContext::new(topic, expert.clone(), content_type).with_difficulty(difficulty);
        Ok(self.parser.build_card(&reply, &ctx, rng))
    }

    /// Explanation reels on `topic` from up to `max_perspectives` matching experts
    ///
    /// Experts are asked one after another, `perspective_delay` apart. An expert
    /// that fails is logged and left out. Cards come back in the order the
    /// experts were selected.
    pub async fn alternative_perspectives<R: Rng + ?Sized>(
        &self,
        topic: &str,
        rng: &mut R,
    ) -> Vec<ReelCard> {
        let experts = self
            .settings
            .keywords
            .match_topic(topic, self.settings.max_perspectives);
        log::info!(
            "Collecting {} perspectives on '{}': {:?}",
            experts.len(),
            topic,
            experts
        );

        let pacer = Pacer::new(self.settings.perspective_delay);
        let mut cards = Vec::with_capacity(experts.len());
        for expert in &experts {
            pacer.ready().await;
            match self
                .generate_reel(
                    expert,
                    topic,
                    ContentType::Explanation,
                    Difficulty::default(),
                    rng,
                )
                .await
            {
                Ok(card) => cards.push(card),
                Err(e) => log::warn!("Skipping {} perspective: {}", expert, e),
            }
            pacer.finished().await;
        }
        cards
    }

    /// Up to `count` reels on random trending topics of provisioned catalog experts
    ///
    /// Each pick is an independent random expert, topic and content type.
    /// Failed picks are logged and skipped, so fewer than `count` cards may
    /// come back.
    pub async fn trending_reels<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> GeneratorResult<Vec<ReelCard>> {
        let candidates: Vec<&'static Expert> = catalog()
            .iter()
            .filter(|e| self.directory.contains(&e.slug()) && !e.trending_topics.is_empty())
            .collect();
        if candidates.is_empty() {
            return Err(GeneratorError::InvalidRequest(
                "No catalog experts are provisioned".to_string(),
            ));
        }

        let pacer = Pacer::new(self.settings.trending_delay);
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(expert) = candidates.choose(rng).copied() else {
                break;
            };
            let Some(topic) = expert.trending_topics.choose(rng).copied() else {
                continue;
            };
            let content_type = ContentType::ALL[rng.random_range(0..ContentType::ALL.len())];

            pacer.ready().await;
            match self
                .generate_reel(&expert.slug(), topic, content_type, Difficulty::default(), rng)
                .await
            {
                Ok(card) => cards.push(card),
                Err(e) => log::warn!("Skipping trending reel '{}': {}", topic, e),
            }
            pacer.finished().await;
        }
        Ok(cards)
    }

    /// Plans a series on `subject` with `expert` and generates every episode
    ///
    /// The outline reply decides how many episodes there really are. Episodes
    /// whose generation fails are skipped; the others keep their numbering.
    pub async fn learning_series<R: Rng + ?Sized>(
        &self,
        expert: &ExpertSlug,
        subject: &str,
        episodes: u32,
        rng: &mut R,
    ) -> GeneratorResult<Vec<ReelCard>> {
        let subject = subject.trim();
        if subject.is_empty() || episodes == 0 {
            return Err(GeneratorError::InvalidRequest(
                "A series needs a subject and at least one episode".to_string(),
            ));
        }
        let persona = self.directory.resolve(expert)?;
        let profile = find_expert(expert.as_str());

        let outline_prompt = prompts::series_outline_prompt(profile, subject, episodes);
        let outline_reply = self
            .service
            .generate(&self.user, persona, &outline_prompt)
            .await?;
        let outline = parse_series_outline(&outline_reply);
        if outline.is_empty() {
            return Err(GeneratorError::EmptySeries(subject.to_string()));
        }

        let total = outline.len() as u32;
        let series_id = SeriesId::new();
        log::info!(
            "Series {} on '{}' planned with {} episodes",
            series_id,
            subject,
            total
        );

        let pacer = Pacer::new(self.settings.series_delay);
        let mut cards = Vec::with_capacity(outline.len());
        let mut last_error = None;
        for (index, episode) in outline.iter().enumerate() {
            let number = index as u32 + 1;
            let Some(series) = SeriesRef::new(series_id, number, total) else {
                continue;
            };

            pacer.ready().await;
            let prompt = prompts::episode_prompt(profile, subject, episode, total);
            let reply = self.service.generate(&self.user, persona, &prompt).await;
            pacer.finished().await;
            match reply {
                Ok(reply) => {
                    let ctx = ParseContext::new(
                        episode.title.as_str(),
                        expert.clone(),
                        ContentType::Explanation,
                    )
                    .with_difficulty(self.settings.series_difficulty);
                    let card = self
                        .series_parser
                        .build_card(&reply, &ctx, rng)
                        .with_tags(["series".to_string()])
                        .with_series(series);
                    cards.push(card);
                }
                Err(e) => {
                    log::warn!("Episode {} of '{}' failed: {}", number, subject, e);
                    last_error = Some(e);
                }
            }
        }

        match (cards.is_empty(), last_error) {
            (true, Some(e)) => Err(e.into()),
            _ => Ok(cards),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.perspective_delay, Duration::from_millis(500));
        assert_eq!(settings.trending_delay, Duration::from_millis(200));
        assert_eq!(settings.max_perspectives, 3);
        assert_eq!(settings.series_difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_settings_builders() {
        let settings = GeneratorSettings::default()
            .with_max_perspectives(2)
            .with_perspective_delay(Duration::ZERO)
            .with_keywords(KeywordTable::new(vec![ExpertSlug::new("dr-mind")]));
        assert_eq!(settings.max_perspectives, 2);
        assert_eq!(settings.perspective_delay, Duration::ZERO);
        assert_eq!(settings.keywords.fallback(), &[ExpertSlug::new("dr-mind")]);
    }
}
