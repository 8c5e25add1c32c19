//! Parsed content records and the enums that classify them

use crate::types::common::{finish, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Audience level a card is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// Kind of card; selects the prompt template and how long a card stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Hook,
    Explanation,
    Practical,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::Hook, Self::Explanation, Self::Practical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::Explanation => "explanation",
            Self::Practical => "practical",
        }
    }

    /// Suggested display time for a card of this type
    pub fn display_duration(&self) -> Duration {
        match self {
            Self::Hook => Duration::from_secs(30),
            Self::Explanation => Duration::from_secs(45),
            Self::Practical => Duration::from_secs(60),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hook" => Ok(Self::Hook),
            "explanation" => Ok(Self::Explanation),
            "practical" => Ok(Self::Practical),
            other => Err(format!("Unknown content type: {}", other)),
        }
    }
}

/// One typed line of a card body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum BodySection {
    Paragraph(String),
    Bullet(String),
    Step(String),
    Heading(String),
}

impl BodySection {
    pub fn text(&self) -> &str {
        match self {
            Self::Paragraph(t) | Self::Bullet(t) | Self::Step(t) | Self::Heading(t) => t,
        }
    }

    pub fn is_step(&self) -> bool {
        matches!(self, Self::Step(_))
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Self::Bullet(_))
    }
}

/// Multiple choice question attached to a card
///
/// `correct` always indexes into `options`; the only way to build one is
/// through [`Quiz::new`], which checks that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuiz")]
pub struct Quiz {
    question: String,
    options: Vec<String>,
    correct: usize,
}

impl Quiz {
    /// Builds a quiz, returning `None` if `correct` is out of range
    pub fn new(question: impl Into<String>, options: Vec<String>, correct: usize) -> Option<Self> {
        if correct >= options.len() {
            return None;
        }
        Some(Self {
            question: question.into(),
            options,
            correct,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }
}

#[derive(Deserialize)]
struct RawQuiz {
    question: String,
    options: Vec<String>,
    correct: usize,
}

impl TryFrom<RawQuiz> for Quiz {
    type Error = String;

    fn try_from(raw: RawQuiz) -> Result<Self, Self::Error> {
        let RawQuiz {
            question,
            options,
            correct,
        } = raw;
        let len = options.len();
        Quiz::new(question, options, correct)
            .ok_or_else(|| format!("quiz answer {} out of range for {} options", correct, len))
    }
}

/// Structured record extracted from free text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedContent {
    pub title: String,
    pub hook_line: Option<String>,
    pub body_sections: Vec<BodySection>,
    pub key_insight: Option<String>,
    pub action_items: Vec<String>,
    pub quiz: Option<Quiz>,
}

impl ParsedContent {
    /// A record holding only a title, used for empty input
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// True when nothing beyond the title was extracted
    pub fn is_bare(&self) -> bool {
        self.hook_line.is_none()
            && self.body_sections.is_empty()
            && self.key_insight.is_none()
            && self.action_items.is_empty()
            && self.quiz.is_none()
    }

    /// Number of whitespace separated words across every extracted field
    pub fn word_count(&self) -> usize {
        let count = |s: &str| s.split_whitespace().count();
        count(&self.title)
            + self.hook_line.as_deref().map_or(0, count)
            + self.body_sections.iter().map(|s| count(s.text())).sum::<usize>()
            + self.key_insight.as_deref().map_or(0, count)
            + self.action_items.iter().map(|s| count(s)).sum::<usize>()
    }
}

impl Validator for ParsedContent {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if let Some(quiz) = &self.quiz {
            if quiz.options.len() < 2 {
                errors.push("Quiz needs at least two options".to_string());
            }
            if quiz.correct >= quiz.options.len() {
                errors.push("Quiz answer must index an option".to_string());
            }
        }

        finish(errors)
    }
}
