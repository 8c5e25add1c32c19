// crates/generator/src/directory.rs
//! Which persona answers for which expert, and keeping that mapping populated

use crate::error::{GeneratorError, GeneratorResult};
use crate::knowledge::seed_knowledge;
use mentorscroll_core::{catalog, ExpertSlug};
use mentorscroll_persona_client::{
    PersonaDescriptor, PersonaId, PersonaService, PersonaSummary, TrainingInput, UserId,
};
use mentorscroll_resilience::Pacer;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default spacing between persona creations during provisioning
pub const PROVISION_DELAY: Duration = Duration::from_secs(2);

/// Expert slug to persona id lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaDirectory {
    by_slug: BTreeMap<ExpertSlug, PersonaId>,
}

impl PersonaDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the lookup from a persona listing
    ///
    /// Personas without a slug are skipped. When two share a slug the first
    /// one listed wins.
    pub fn from_summaries<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a PersonaSummary>,
    {
        let mut directory = Self::new();
        for summary in summaries {
            if summary.slug.is_empty() {
                continue;
            }
            directory
                .by_slug
                .entry(ExpertSlug::new(summary.slug.as_str()))
                .or_insert_with(|| summary.id.clone());
        }
        directory
    }

    /// Lists the user's personas and indexes them by slug
    pub async fn load<S>(service: &S, user: &UserId) -> GeneratorResult<Self>
    where
        S: PersonaService + ?Sized,
    {
        let personas = service.list_personas(user).await?;
        let directory = Self::from_summaries(&personas);
        log::debug!(
            "Loaded {} personas for {} ({} with slugs)",
            personas.len(),
            user,
            directory.len()
        );
        Ok(directory)
    }

    pub fn insert(&mut self, slug: ExpertSlug, persona: PersonaId) {
        self.by_slug.insert(slug, persona);
    }

    pub fn get(&self, slug: &ExpertSlug) -> Option<&PersonaId> {
        self.by_slug.get(slug)
    }

    /// Like [`get`](Self::get) but an absent persona is an error
    pub fn resolve(&self, slug: &ExpertSlug) -> GeneratorResult<&PersonaId> {
        self.get(slug)
            .ok_or_else(|| GeneratorError::NotProvisioned(slug.clone()))
    }

    pub fn contains(&self, slug: &ExpertSlug) -> bool {
        self.by_slug.contains_key(slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &ExpertSlug> {
        self.by_slug.keys()
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }

    /// Catalog experts that have no persona yet
    pub fn missing_catalog_experts(&self) -> Vec<ExpertSlug> {
        catalog()
            .iter()
            .map(|e| e.slug())
            .filter(|slug| !self.contains(slug))
            .collect()
    }
}

/// What happened to one catalog expert during provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionStatus {
    /// A persona with this slug already existed
    Existing(PersonaId),
    /// Created now; `trained` is false when uploading seed knowledge failed
    Created { persona: PersonaId, trained: bool },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub name: &'static str,
    pub slug: ExpertSlug,
    pub status: ProvisionStatus,
}

impl ProvisionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, ProvisionStatus::Failed(_))
    }

    pub fn persona(&self) -> Option<&PersonaId> {
        match &self.status {
            ProvisionStatus::Existing(id) | ProvisionStatus::Created { persona: id, .. } => {
                Some(id)
            }
            ProvisionStatus::Failed(_) => None,
        }
    }
}

/// Creates and trains a persona for every catalog expert missing from `directory`
///
/// Creations are spaced `delay` apart. A failure for one expert is recorded and
/// the rest still run. Created personas are added to `directory`.
pub async fn provision_catalog<S>(
    service: &S,
    user: &UserId,
    directory: &mut PersonaDirectory,
    delay: Duration,
) -> GeneratorResult<Vec<ProvisionOutcome>>
where
    S: PersonaService + ?Sized,
{
    service.ensure_user(user).await?;

    let pacer = Pacer::new(delay);
    let mut outcomes = Vec::with_capacity(catalog().len());

    for expert in catalog() {
        let slug = expert.slug();
        if let Some(existing) = directory.get(&slug) {
            log::info!("{} already provisioned as {}", expert.name, existing);
            outcomes.push(ProvisionOutcome {
                name: expert.name,
                slug,
                status: ProvisionStatus::Existing(existing.clone()),
            });
            continue;
        }

        pacer.ready().await;
        let descriptor = PersonaDescriptor::from_expert(expert);
        let status = match service.create_persona(user, &descriptor).await {
            Ok(persona) => {
                log::info!("Created {} as {}", expert.name, persona);
                let trained = match seed_knowledge(expert.slug) {
                    Some(text) => {
                        match service
                            .train_persona(user, &persona, TrainingInput::Text(text.to_string()))
                            .await
                        {
                            Ok(()) => true,
                            Err(e) => {
                                log::warn!("Training {} failed: {}", expert.name, e);
                                false
                            }
                        }
                    }
                    None => false,
                };
                directory.insert(slug.clone(), persona.clone());
                ProvisionStatus::Created { persona, trained }
            }
            Err(e) => {
                log::error!("Creating {} failed: {}", expert.name, e);
                ProvisionStatus::Failed(e.to_string())
            }
        };
        pacer.finished().await;

        outcomes.push(ProvisionOutcome {
            name: expert.name,
            slug,
            status,
        });
    }

    Ok(outcomes)
}

/// Result of [`remove_personas`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: Vec<PersonaSummary>,
    pub failed: Vec<(PersonaSummary, String)>,
}

/// Deletes every listed persona that `select` picks
///
/// Failures are collected rather than stopping the sweep.
pub async fn remove_personas<S, F>(
    service: &S,
    user: &UserId,
    personas: Vec<PersonaSummary>,
    select: F,
) -> CleanupReport
where
    S: PersonaService + ?Sized,
    F: Fn(&PersonaSummary) -> bool,
{
    let mut report = CleanupReport::default();
    for persona in personas.into_iter().filter(|p| select(p)) {
        match service.delete_persona(user, &persona.id).await {
            Ok(()) => {
                log::info!("Deleted {} ({})", persona.name, persona.id);
                report.deleted.push(persona);
            }
            Err(e) => {
                log::warn!("Deleting {} failed: {}", persona.name, e);
                report.failed.push((persona, e.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, slug: &str) -> PersonaSummary {
        PersonaSummary {
            id: PersonaId::new(id),
            name: slug.to_string(),
            slug: slug.to_string(),
            short_description: String::new(),
            tags: Vec::new(),
            private: false,
        }
    }

    #[test]
    fn test_from_summaries_first_wins() {
        let listed = vec![
            summary("1", "dr-quantum"),
            summary("2", "dr-quantum"),
            summary("3", ""),
            summary("4", "eco-emma"),
        ];
        let directory = PersonaDirectory::from_summaries(&listed);
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.get(&ExpertSlug::new("dr-quantum")),
            Some(&PersonaId::new("1"))
        );
    }

    #[test]
    fn test_resolve_missing() {
        let directory = PersonaDirectory::new();
        let err = directory.resolve(&ExpertSlug::new("dr-mind")).unwrap_err();
        assert!(matches!(err, GeneratorError::NotProvisioned(_)));
    }

    #[test]
    fn test_missing_catalog_experts() {
        let directory = PersonaDirectory::from_summaries(&[summary("1", "dr-quantum")]);
        let missing = directory.missing_catalog_experts();
        assert_eq!(missing.len(), catalog().len() - 1);
        assert!(!missing.contains(&ExpertSlug::new("dr-quantum")));
    }
}
