//! Learning series outlines

use serde::{Deserialize, Serialize};

/// One planned episode of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeOutline {
    pub number: u32,
    pub title: String,
    pub hook: Option<String>,
    pub concept: Option<String>,
    pub insight: Option<String>,
}

impl EpisodeOutline {
    fn new(number: u32, title: String) -> Self {
        Self {
            number,
            title,
            hook: None,
            concept: None,
            insight: None,
        }
    }
}

/// Number and title from an `Episode <n>: <title>` line
fn episode_heading(line: &str) -> Option<(u32, &str)> {
    let prefix = line.get(..8)?;
    if !prefix.eq_ignore_ascii_case("episode ") {
        return None;
    }
    let rest = &line[8..];
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let number = rest[..digits].parse().ok()?;
    let title = rest[digits..].trim_start().strip_prefix(':')?.trim();
    Some((number, title))
}

fn labelled<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let prefix = line.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    line[label.len()..]
        .trim_start()
        .strip_prefix(':')
        .map(str::trim)
}

/// Parses `Episode n:` blocks with optional `Hook:`, `Concept:` and `Insight:`
/// lines into outlines, in the order they appear
///
/// Lines before the first episode heading, and episodes with an empty title,
/// are skipped.
pub fn parse_series_outline(text: &str) -> Vec<EpisodeOutline> {
    let mut episodes = Vec::new();
    let mut current: Option<EpisodeOutline> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let line = line.trim_start_matches(['-', '•', '*', ' ']);

        if let Some((number, title)) = episode_heading(line) {
            if let Some(done) = current.take() {
                episodes.push(done);
            }
            if !title.is_empty() {
                current = Some(EpisodeOutline::new(number, title.to_string()));
            }
            continue;
        }

        let Some(episode) = current.as_mut() else {
            continue;
        };

        if let Some(hook) = labelled(line, "hook") {
            episode.hook = Some(hook.to_string());
        } else if let Some(concept) = labelled(line, "concept") {
            episode.concept = Some(concept.to_string());
        } else if let Some(insight) = labelled(line, "insight") {
            episode.insight = Some(insight.to_string());
        }
    }

    if let Some(done) = current {
        episodes.push(done);
    }
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTLINE: &str = "Here is your series!

Episode 1: The Spark
Hook: 🔥 Fire changed everything
Concept: Combustion
Insight: Energy is stored sunlight

Episode 2: Steam Power
hook: 🚂 One kettle, one revolution
CONCEPT : Pressure
";

    #[test]
    fn test_parse_outline() {
        let episodes = parse_series_outline(OUTLINE);
        assert_eq!(episodes.len(), 2);

        assert_eq!(episodes[0].number, 1);
        assert_eq!(episodes[0].title, "The Spark");
        assert_eq!(episodes[0].hook.as_deref(), Some("🔥 Fire changed everything"));
        assert_eq!(episodes[0].insight.as_deref(), Some("Energy is stored sunlight"));

        assert_eq!(episodes[1].title, "Steam Power");
        assert_eq!(episodes[1].concept.as_deref(), Some("Pressure"));
        assert!(episodes[1].insight.is_none());
    }

    #[test]
    fn test_bulleted_outline() {
        let episodes = parse_series_outline("- Episode 3: Later\n- Hook: now");
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].number, 3);
        assert_eq!(episodes[0].hook.as_deref(), Some("now"));
    }

    #[test]
    fn test_empty_and_untitled() {
        assert!(parse_series_outline("").is_empty());
        assert!(parse_series_outline("Episode 1:\nHook: orphan").is_empty());
        assert!(parse_series_outline("Episode one: words").is_empty());
    }
}
