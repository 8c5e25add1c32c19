// crates/persona-client/src/lib.rs
//! Client for the persona chat service
//!
//! [`PersonaService`] is the seam the generator talks to. [`PersonaClient`]
//! implements it over HTTPS with injected credentials; tests substitute their
//! own implementation.
//!
//! # Example
//!
//! ```no_run
//! use mentorscroll_persona_client::{ClientConfig, PersonaClient, PersonaService, UserId};
//!
//! # async fn run() -> Result<(), mentorscroll_persona_client::PersonaError> {
//! let client = PersonaClient::new(ClientConfig::new("org-secret"))?;
//! let user = UserId::new("reader-1");
//! client.ensure_user(&user).await?;
//! for persona in client.list_personas(&user).await? {
//!     println!("{} ({})", persona.name, persona.id);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod service;
mod types;
mod wire;

pub use client::PersonaClient;
pub use config::{ClientConfig, API_KEY_ENV, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{PersonaError, PersonaResult};
pub use service::PersonaService;
pub use types::{
    slugify, truncate_description, ChatMessage, ChatRole, PersonaDescriptor, PersonaId,
    PersonaSummary, TrainingInput, UserId, DEFAULT_PROFILE_IMAGE, SHORT_DESCRIPTION_MAX,
};
