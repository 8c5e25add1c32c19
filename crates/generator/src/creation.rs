// crates/generator/src/creation.rs
//! Step-by-step creation of a user-defined expert persona

use crate::error::{GeneratorError, GeneratorResult};
use mentorscroll_core::Timestamp;
use mentorscroll_persona_client::{
    PersonaDescriptor, PersonaId, PersonaService, TrainingInput, UserId,
};
use std::fmt;
use std::sync::Arc;

/// Where a creation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationStep {
    #[default]
    Setup,
    Training,
    Publishing,
    Complete,
}

impl fmt::Display for CreationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Setup => "setup",
            Self::Training => "training",
            Self::Publishing => "publishing",
            Self::Complete => "complete",
        };
        f.write_str(label)
    }
}

/// What the creator filled in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpertDraft {
    pub name: String,
    pub domain: String,
    pub description: String,
    pub tags: Vec<String>,
    pub knowledge: Vec<TrainingInput>,
}

impl ExpertDraft {
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_knowledge(mut self, input: TrainingInput) -> Self {
        self.knowledge.push(input);
        self
    }

    fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("domain", &self.domain),
            ("description", &self.description),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Drives a draft through setup, training and publishing
///
/// Any failure sends the workflow back to [`CreationStep::Setup`] with an
/// error banner; the draft can then be submitted again.
pub struct PersonaCreation<S: ?Sized> {
    service: Arc<S>,
    user: UserId,
    step: CreationStep,
    persona: Option<PersonaId>,
    error: Option<String>,
    slug_suffix: Option<String>,
}

impl<S: PersonaService + ?Sized> PersonaCreation<S> {
    pub fn new(service: Arc<S>, user: UserId) -> Self {
        Self {
            service,
            user,
            step: CreationStep::Setup,
            persona: None,
            error: None,
            slug_suffix: None,
        }
    }

    /// Fixes the suffix appended to the slug instead of the current time
    pub fn with_slug_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.slug_suffix = Some(suffix.into());
        self
    }

    pub fn step(&self) -> CreationStep {
        self.step
    }

    /// Banner text from the last failure, cleared on the next submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn persona(&self) -> Option<&PersonaId> {
        self.persona.as_ref()
    }

    /// Creates, trains and publishes the persona described by `draft`
    pub async fn submit(&mut self, draft: &ExpertDraft) -> GeneratorResult<PersonaId> {
        self.error = None;
        self.persona = None;

        if let Some(field) = draft.missing_field() {
            let err = GeneratorError::InvalidRequest(format!("The expert needs a {}", field));
            self.error = Some(err.user_message());
            return Err(err);
        }

        match self.run(draft).await {
            Ok(persona) => {
                self.step = CreationStep::Complete;
                self.persona = Some(persona.clone());
                log::info!("Expert '{}' is live as {}", draft.name, persona);
                Ok(persona)
            }
            Err(e) => {
                log::warn!("Creating '{}' failed during {}: {}", draft.name, self.step, e);
                self.step = CreationStep::Setup;
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn run(&mut self, draft: &ExpertDraft) -> GeneratorResult<PersonaId> {
        self.step = CreationStep::Training;
        self.service.ensure_user(&self.user).await?;

        let suffix = self
            .slug_suffix
            .clone()
            .unwrap_or_else(|| Timestamp::now().as_millis().to_string());
        let descriptor = PersonaDescriptor::for_creator(
            draft.name.trim(),
            draft.domain.trim(),
            draft.description.trim(),
            &suffix,
        )
        .with_tags(draft.tags.iter().cloned());
        let persona = self.service.create_persona(&self.user, &descriptor).await?;

        for input in &draft.knowledge {
            self.service
                .train_persona(&self.user, &persona, input.clone())
                .await?;
        }

        self.step = CreationStep::Publishing;
        let listed = self.service.list_personas(&self.user).await?;
        if !listed.iter().any(|p| p.id == persona) {
            return Err(GeneratorError::InvalidRequest(format!(
                "'{}' was created but is not listed yet. Please try again.",
                draft.name.trim()
            )));
        }
        Ok(persona)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        assert_eq!(ExpertDraft::new("", "x", "y").missing_field(), Some("name"));
        assert_eq!(ExpertDraft::new("a", " ", "y").missing_field(), Some("domain"));
        assert_eq!(ExpertDraft::new("a", "b", "c").missing_field(), None);
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(CreationStep::default(), CreationStep::Setup);
        assert_eq!(CreationStep::Publishing.to_string(), "publishing");
    }
}
