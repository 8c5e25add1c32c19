// crates/persona-client/src/types.rs
//! Values exchanged with the persona service

use chrono::{DateTime, Utc};
use mentorscroll_core::Expert;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest short description the service accepts
pub const SHORT_DESCRIPTION_MAX: usize = 50;

/// Profile image used when a descriptor has none
pub const DEFAULT_PROFILE_IMAGE: &str = "https://sensay.io/assets/default-replica-profile.webp";

/// End user on whose behalf calls are made
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the service assigned to a persona
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(String);

impl PersonaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything needed to provision a persona
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaDescriptor {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub greeting: String,
    pub system_message: String,
    pub tags: Vec<String>,
    pub profile_image: Option<String>,
}

impl PersonaDescriptor {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            greeting: format!("Hi! I'm {}. Ask me anything.", name),
            system_message: format!("You are {}.", name),
            name,
            slug: slug.into(),
            short_description: String::new(),
            tags: Vec::new(),
            profile_image: None,
        }
    }

    /// Descriptor for a catalog expert
    pub fn from_expert(expert: &Expert) -> Self {
        Self {
            name: expert.name.to_string(),
            slug: expert.slug.to_string(),
            short_description: expert.short_description.to_string(),
            greeting: expert.greeting.to_string(),
            system_message: expert.system_message.to_string(),
            tags: expert.tags.iter().map(|t| t.to_string()).collect(),
            profile_image: None,
        }
    }

    /// Descriptor for a persona created by a user
    ///
    /// The slug is derived from the name plus `suffix`, which callers use to
    /// keep slugs unique.
    pub fn for_creator(name: &str, domain: &str, description: &str, suffix: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: format!("{}-{}", slugify(name), suffix),
            short_description: description.to_string(),
            greeting: format!(
                "Hi! I'm {}, your AI expert in {}. I'm ready to share knowledge and answer your questions!",
                name, domain
            ),
            system_message: format!(
                "You are {}, an expert in {}. {}. Provide helpful, accurate, and engaging responses based on your training. Be conversational but knowledgeable.",
                name, domain, description
            ),
            tags: Vec::new(),
            profile_image: None,
        }
    }

    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self
    }

    pub fn with_greeting(mut self, text: impl Into<String>) -> Self {
        self.greeting = text.into();
        self
    }

    pub fn with_system_message(mut self, text: impl Into<String>) -> Self {
        self.system_message = text.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image = Some(url.into());
        self
    }

    /// Short description cut down to what the service accepts
    pub fn short_description_for_service(&self) -> String {
        truncate_description(&self.short_description)
    }
}

/// Cuts text over 50 characters to 47 characters plus `...`
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > SHORT_DESCRIPTION_MAX {
        let kept: String = text.chars().take(SHORT_DESCRIPTION_MAX - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Lower case, non alphanumerics to `-`, runs of `-` collapsed
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() {
            c.to_ascii_lowercase()
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// Knowledge to add to a persona
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingInput {
    /// Raw text stored in a new knowledge base entry
    Text(String),
    /// A file uploaded through a signed URL
    Document { filename: String, content: Vec<u8> },
}

/// Persona as listed by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaSummary {
    #[serde(rename = "uuid")]
    pub id: PersonaId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(
        default,
        rename = "shortDescription",
        alias = "short_description"
    )]
    pub short_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, rename = "created_at", alias = "timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}
