// crates/persona-client/src/service.rs
//! The seam between the app and the persona service

use crate::error::PersonaResult;
use crate::types::{
    ChatMessage, PersonaDescriptor, PersonaId, PersonaSummary, TrainingInput, UserId,
};
use async_trait::async_trait;

/// Persona chat service
///
/// Every call names the user it acts for. Implementations hold credentials,
/// never a current user.
#[async_trait]
pub trait PersonaService: Send + Sync {
    /// Makes sure the user exists, creating it if the service has never seen it
    async fn ensure_user(&self, user: &UserId) -> PersonaResult<()>;

    /// Provisions a persona owned by `user`
    async fn create_persona(
        &self,
        user: &UserId,
        descriptor: &PersonaDescriptor,
    ) -> PersonaResult<PersonaId>;

    /// Adds knowledge to a persona
    async fn train_persona(
        &self,
        user: &UserId,
        persona: &PersonaId,
        input: TrainingInput,
    ) -> PersonaResult<()>;

    /// Sends a chat message and returns the persona's answer
    ///
    /// The exchange is kept in the persona's chat history.
    async fn chat(&self, user: &UserId, persona: &PersonaId, message: &str)
        -> PersonaResult<String>;

    /// Like [`chat`](Self::chat), but the exchange is not recorded
    async fn generate(
        &self,
        user: &UserId,
        persona: &PersonaId,
        prompt: &str,
    ) -> PersonaResult<String>;

    async fn list_personas(&self, user: &UserId) -> PersonaResult<Vec<PersonaSummary>>;

    async fn chat_history(
        &self,
        user: &UserId,
        persona: &PersonaId,
    ) -> PersonaResult<Vec<ChatMessage>>;

    async fn delete_persona(&self, user: &UserId, persona: &PersonaId) -> PersonaResult<()>;
}
