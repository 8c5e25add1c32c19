// crates/generator/src/chat.rs
//! Conversations with a single expert

use crate::error::{GeneratorError, GeneratorResult};
use crate::prompts;
use mentorscroll_core::{find_expert, ExpertSlug};
use mentorscroll_persona_client::{ChatMessage, PersonaId, PersonaService, UserId};
use std::sync::Arc;

/// Shown in place of an answer when the persona call fails
pub const CHAT_ERROR_MESSAGE: &str = "Sorry, I had trouble responding. Please try again.";

/// Starter questions offered under the chat input
pub const SUGGESTED_QUESTIONS: [&str; 6] = [
    "Can you explain this more simply?",
    "How does this apply to real life?",
    "What should I learn next?",
    "Can you give me an example?",
    "Why is this important?",
    "How can I remember this better?",
];

const DEFAULT_GREETING: &str = "Hi! What would you like to learn about today?";

/// The reel a conversation was opened from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelContext {
    pub title: String,
    pub topic: String,
}

/// A conversation with one expert persona
///
/// Starts with a welcome message. When a call fails, an assistant bubble with
/// [`CHAT_ERROR_MESSAGE`] is added and the question is kept so
/// [`retry`](Self::retry) can send it again.
pub struct ChatSession<S: ?Sized> {
    service: Arc<S>,
    user: UserId,
    expert: ExpertSlug,
    persona: PersonaId,
    reel: Option<ReelContext>,
    messages: Vec<ChatMessage>,
    pending: Option<String>,
}

impl<S: PersonaService + ?Sized> ChatSession<S> {
    pub fn new(service: Arc<S>, user: UserId, expert: ExpertSlug, persona: PersonaId) -> Self {
        let mut session = Self {
            service,
            user,
            expert,
            persona,
            reel: None,
            messages: Vec::new(),
            pending: None,
        };
        let welcome = session.welcome();
        session.messages.push(ChatMessage::assistant(welcome));
        session
    }

    /// Ties the conversation to a reel; questions are sent with its context
    ///
    /// Resets the transcript to a welcome message that mentions the reel.
    pub fn with_reel(mut self, title: impl Into<String>, topic: impl Into<String>) -> Self {
        self.reel = Some(ReelContext {
            title: title.into(),
            topic: topic.into(),
        });
        self.messages = vec![ChatMessage::assistant(self.welcome())];
        self.pending = None;
        self
    }

    fn welcome(&self) -> String {
        let greeting = find_expert(self.expert.as_str()).map_or(DEFAULT_GREETING, |e| e.greeting);
        match &self.reel {
            Some(reel) => format!(
                "{}\n\nI see you're interested in \"{}\" - great choice! What would you like to know more about? 🤔",
                greeting, reel.title
            ),
            None => greeting.to_string(),
        }
    }

    pub fn expert(&self) -> &ExpertSlug {
        &self.expert
    }

    pub fn reel(&self) -> Option<&ReelContext> {
        self.reel.as_ref()
    }

    /// The transcript, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The question waiting to be retried, if the last call failed
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Sends a question and returns the answer
    ///
    /// Blank input is ignored and yields `Ok(None)`. On failure the error
    /// bubble is already in the transcript when the error is returned.
    pub async fn send(&mut self, text: &str) -> GeneratorResult<Option<&str>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.messages.push(ChatMessage::user(text));
        self.exchange(text.to_string()).await.map(Some)
    }

    /// Sends the failed question again
    ///
    /// Removes the error bubble first. Returns `Ok(None)` when nothing failed.
    pub async fn retry(&mut self) -> GeneratorResult<Option<&str>> {
        let Some(text) = self.pending.take() else {
            return Ok(None);
        };
        if self
            .messages
            .last()
            .is_some_and(|m| !m.is_user() && m.content == CHAT_ERROR_MESSAGE)
        {
            self.messages.pop();
        }
        self.exchange(text).await.map(Some)
    }

    async fn exchange(&mut self, text: String) -> GeneratorResult<&str> {
        let outgoing = match &self.reel {
            Some(reel) => prompts::contextual_question(&reel.title, &reel.topic, &text),
            None => text.clone(),
        };

        match self.service.chat(&self.user, &self.persona, &outgoing).await {
            Ok(answer) => {
                self.pending = None;
                self.messages.push(ChatMessage::assistant(answer));
                Ok(self.last_content())
            }
            Err(e) => {
                log::warn!("Chat with {} failed: {}", self.expert, e);
                self.pending = Some(text);
                self.messages.push(ChatMessage::assistant(CHAT_ERROR_MESSAGE));
                Err(GeneratorError::from(e))
            }
        }
    }

    fn last_content(&self) -> &str {
        self.messages.last().map_or("", |m| m.content.as_str())
    }
}
