//! Reel generation on top of expert personas
//!
//! [`ReelGenerator`] prompts expert personas through a
//! [`PersonaService`](mentorscroll_persona_client::PersonaService), parses the
//! replies and packages them as cards: single reels, alternative perspectives
//! on a topic, trending picks and multi-episode learning series.
//! [`ChatSession`] and [`PersonaCreation`] cover talking to an expert and
//! creating a new one.
//!
//! # Example
//!
//! ```no_run
//! use mentorscroll_generator::{PersonaDirectory, ReelGenerator};
//! use mentorscroll_persona_client::{ClientConfig, PersonaClient, UserId};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(PersonaClient::new(ClientConfig::new("api-key"))?);
//! let user = UserId::new("mentorscroll_main_user");
//! let directory = PersonaDirectory::load(client.as_ref(), &user).await?;
//! let generator = ReelGenerator::new(client, user, directory);
//!
//! let cards = generator
//!     .alternative_perspectives("quantum computing", &mut rand::rng())
//!     .await;
//! for card in &cards {
//!     println!("{} ({})", card.title, card.expert);
//! }
//! # Ok(())
//! # }
//! ```

mod chat;
mod creation;
mod directory;
mod error;
mod generator;
mod knowledge;
pub mod prompts;

pub use chat::{ChatSession, ReelContext, CHAT_ERROR_MESSAGE, SUGGESTED_QUESTIONS};
pub use creation::{CreationStep, ExpertDraft, PersonaCreation};
pub use directory::{
    provision_catalog, remove_personas, CleanupReport, PersonaDirectory, ProvisionOutcome,
    ProvisionStatus, PROVISION_DELAY,
};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{GeneratorSettings, ReelGenerator};
pub use knowledge::seed_knowledge;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _ = GeneratorSettings::default();
        let _ = PersonaDirectory::new();
        let _ = CreationStep::default();
        let _ = ExpertDraft::default();
        let _ = seed_knowledge("dr-quantum");
        let _: GeneratorResult<()> = Ok(());
        assert_eq!(SUGGESTED_QUESTIONS.len(), 6);
        assert!(!CHAT_ERROR_MESSAGE.is_empty());
    }
}
