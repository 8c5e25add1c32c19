// crates/cli/src/commands.rs

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use console::style;
use mentorscroll_config::{Config, ConfigManager, GeneratorConfig, PersonaConfig, API_KEY_ENV};
use mentorscroll_core::{
    catalog, find_expert, format_count, icon_for, ContentType, Difficulty, ExpertSlug, ReelCard,
};
use mentorscroll_generator::{
    prompts, provision_catalog, remove_personas, ChatSession, ExpertDraft, GeneratorSettings,
    PersonaCreation, PersonaDirectory, ProvisionStatus, ReelGenerator,
};
use mentorscroll_persona_client::{
    ClientConfig, PersonaClient, PersonaService, PersonaSummary, TrainingInput, UserId,
};
use mentorscroll_resilience::{CircuitBreakerConfig, RetryPolicy};
use mentorscroll_tui::{App, TuiApp};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// File extensions uploaded as raw text rather than as documents
const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

/// Create and train a persona for every catalog expert
pub async fn setup_experts(config: &Config, user: &UserId) -> Result<()> {
    let client = connect(config)?;
    let mut directory = PersonaDirectory::load(client.as_ref(), user)
        .await
        .context("Failed to list existing personas")?;

    println!(
        "\n{} Setting up {} experts for {}",
        style("🎓").bold(),
        style(catalog().len()).bold().cyan(),
        user
    );
    println!("{}", "=".repeat(80));

    let delay = Duration::from_millis(config.generator.provision_delay_ms);
    let outcomes = provision_catalog(client.as_ref(), user, &mut directory, delay)
        .await
        .context("Failed to provision experts")?;

    for outcome in &outcomes {
        match &outcome.status {
            ProvisionStatus::Existing(id) => {
                println!("{} {} already exists ({})", style("•").dim(), outcome.name, id);
            }
            ProvisionStatus::Created { persona, trained } => {
                println!("{} Created {} ({})", style("✓").green().bold(), outcome.name, persona);
                if !trained {
                    println!("  {} Seed knowledge was not uploaded", style("!").yellow());
                }
            }
            ProvisionStatus::Failed(reason) => {
                println!("{} {}: {}", style("✗").red().bold(), outcome.name, reason);
            }
        }
    }

    let listed = client
        .list_personas(user)
        .await
        .context("Failed to verify personas")?;
    let missing = PersonaDirectory::from_summaries(&listed).missing_catalog_experts();

    println!("{}", "=".repeat(80));
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    println!("{} of {} experts ready", style(succeeded).bold(), outcomes.len());
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(ExpertSlug::as_str).collect();
        println!("{} Not listed by the service: {}", style("!").yellow(), names.join(", "));
    }

    Ok(())
}

/// Add knowledge to an expert from a file
pub async fn train(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let slug = required(matches, "slug")?;
    let file = required(matches, "file")?;

    let path = Path::new(file);
    if !path.exists() {
        bail!("File not found: {}", file);
    }
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", file))?;
    let input = training_input(path, bytes)?;

    let client = connect(config)?;
    let directory = PersonaDirectory::load(client.as_ref(), user)
        .await
        .context("Failed to list personas")?;
    let persona = directory.resolve(&ExpertSlug::new(slug))?;

    client
        .train_persona(user, persona, input)
        .await
        .with_context(|| format!("Failed to train {}", slug))?;

    println!("{} Trained {} with {}", style("✓").green().bold(), slug, file);
    Ok(())
}

/// Ask an expert a question
pub async fn chat(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let slug = ExpertSlug::new(required(matches, "slug")?);
    let message = required(matches, "message")?;

    let client = connect(config)?;
    let directory = PersonaDirectory::load(client.as_ref(), user)
        .await
        .context("Failed to list personas")?;
    let persona = directory.resolve(&slug)?.clone();

    let mut session = ChatSession::new(client, user.clone(), slug.clone(), persona);
    if let Some(title) = matches.get_one::<String>("reel") {
        let topic = matches.get_one::<String>("topic").unwrap_or(title);
        session = session.with_reel(title.as_str(), topic.as_str());
    }

    let speaker = expert_label(&slug);
    println!("{} {}", style("You:").bold(), message);
    match session.send(message).await {
        Ok(Some(answer)) => {
            println!("{} {}", style(format!("{}:", speaker)).bold().cyan(), answer);
            Ok(())
        }
        Ok(None) => bail!("Message is empty"),
        Err(e) => {
            println!(
                "{} {}",
                style(format!("{}:", speaker)).bold().cyan(),
                style(e.user_message()).red()
            );
            Err(e).context("Chat failed")
        }
    }
}

/// List the personas owned by the user
pub async fn list_personas(config: &Config, user: &UserId) -> Result<()> {
    let client = connect(config)?;
    let personas = client
        .list_personas(user)
        .await
        .context("Failed to list personas")?;

    if personas.is_empty() {
        println!("No personas yet. Use 'setup-experts' to create the catalog experts.");
        return Ok(());
    }

    println!("\n{} Personas for {}", style(personas.len()).bold().cyan(), user);
    println!("{}", "=".repeat(80));
    for persona in &personas {
        print_persona_summary(persona);
    }

    Ok(())
}

/// Smoke test one expert: an introduction, a reel and a recorded follow-up
pub async fn test_expert(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let slug = ExpertSlug::new(required(matches, "slug")?);
    let expert = find_expert(slug.as_str())
        .ok_or_else(|| anyhow!("Unknown catalog expert: {}", slug))?;

    let client = connect(config)?;
    let generator = load_generator(config, &client, user).await?;
    let persona = generator.directory().resolve(&slug)?.clone();

    println!("\n{} Testing {}", style(expert.icon).bold(), style(expert.name).bold());
    println!("{}", "=".repeat(80));

    let intro = client
        .generate(user, &persona, prompts::INTRODUCTION_PROMPT)
        .await
        .context("Introduction failed")?;
    println!("{} Introduction\n{}\n", style("1.").bold(), intro.trim());

    let topic = expert.trending_topics.first().copied().unwrap_or(expert.domain);
    let card = generator
        .generate_reel(
            &slug,
            topic,
            ContentType::Hook,
            Difficulty::Beginner,
            &mut rand::rng(),
        )
        .await
        .context("Reel generation failed")?;
    println!("{} Reel on '{}'", style("2.").bold(), topic);
    print_card(&card);

    let answer = client
        .chat(user, &persona, &prompts::simplify_prompt(topic))
        .await
        .context("Follow-up question failed")?;
    println!("\n{} Follow-up\n{}\n", style("3.").bold(), answer.trim());

    let history = client
        .chat_history(user, &persona)
        .await
        .context("Failed to read chat history")?;
    println!("{}", "=".repeat(80));
    println!(
        "{} {} answered every step ({} messages in history)",
        style("✓").green().bold(),
        expert.name,
        history.len()
    );

    Ok(())
}

/// Create a custom expert persona
pub async fn create_expert(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let mut draft = ExpertDraft::new(
        required(matches, "name")?,
        required(matches, "domain")?,
        required(matches, "description")?,
    );
    if let Some(tags) = matches.get_many::<String>("tag") {
        draft = draft.with_tags(tags.cloned());
    }
    for file in matches.get_many::<String>("knowledge").into_iter().flatten() {
        let path = Path::new(file);
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", file))?;
        draft = draft.with_knowledge(training_input(path, bytes)?);
    }

    let client = connect(config)?;
    let mut creation = PersonaCreation::new(client, user.clone());
    match creation.submit(&draft).await {
        Ok(persona) => {
            println!("{} Created {} ({})", style("✓").green().bold(), draft.name, persona);
            Ok(())
        }
        Err(e) => {
            println!(
                "{} Stopped during {}: {}",
                style("✗").red().bold(),
                creation.step(),
                creation.error().unwrap_or("unknown error")
            );
            Err(e).context("Expert creation failed")
        }
    }
}

/// Generate one reel on a topic, or a batch of trending reels
pub async fn generate(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let client = connect(config)?;
    let generator = load_generator(config, &client, user).await?;
    let mut rng = rand::rng();

    let cards = match matches.get_one::<String>("topic") {
        Some(topic) => {
            let expert = match matches.get_one::<String>("expert") {
                Some(slug) => ExpertSlug::new(slug.as_str()),
                None => generator
                    .settings()
                    .keywords
                    .match_topic(topic, 1)
                    .into_iter()
                    .next()
                    .ok_or_else(|| anyhow!("No expert matches '{}'", topic))?,
            };
            let content_type = match matches.get_one::<String>("type") {
                Some(t) => t.parse::<ContentType>().map_err(|e| anyhow!(e))?,
                None => ContentType::default(),
            };
            let difficulty = match matches.get_one::<String>("difficulty") {
                Some(level) => parse_difficulty(level)?,
                None => parse_difficulty(&config.generator.default_difficulty)?,
            };
            let card = generator
                .generate_reel(&expert, topic, content_type, difficulty, &mut rng)
                .await
                .with_context(|| format!("Failed to generate a reel on '{}'", topic))?;
            vec![card]
        }
        None => {
            let count = matches
                .get_one::<usize>("count")
                .copied()
                .unwrap_or(config.generator.trending_count);
            generator
                .trending_reels(count, &mut rng)
                .await
                .context("Failed to generate trending reels")?
        }
    };

    output_cards(&cards, matches.get_flag("json"), "Generated Reels")
}

/// Ask several experts for their take on one topic
pub async fn perspectives(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let topic = required(matches, "topic")?;

    let client = connect(config)?;
    let generator = load_generator(config, &client, user).await?;
    let cards = generator
        .alternative_perspectives(topic, &mut rand::rng())
        .await;

    if cards.is_empty() {
        bail!("No expert could answer on '{}'", topic);
    }
    output_cards(&cards, matches.get_flag("json"), &format!("Perspectives on '{}'", topic))
}

/// Generate a multi-episode learning series
pub async fn series(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let slug = ExpertSlug::new(required(matches, "slug")?);
    let subject = required(matches, "subject")?;
    let episodes = matches
        .get_one::<u32>("episodes")
        .copied()
        .unwrap_or(config.generator.series_episodes);

    let client = connect(config)?;
    let generator = load_generator(config, &client, user).await?;
    let cards = generator
        .learning_series(&slug, subject, episodes, &mut rand::rng())
        .await
        .with_context(|| format!("Failed to generate a series on '{}'", subject))?;

    output_cards(&cards, matches.get_flag("json"), &format!("Series: {}", subject))
}

/// Delete catalog expert personas, or every persona with `--purge`
pub async fn cleanup(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let purge = matches.get_flag("purge");
    let force = matches.get_flag("force");

    let client = connect(config)?;
    let personas = client
        .list_personas(user)
        .await
        .context("Failed to list personas")?;
    let doomed = personas
        .iter()
        .filter(|p| purge || is_catalog_persona(p))
        .count();

    if doomed == 0 {
        println!("Nothing to delete.");
        return Ok(());
    }

    if !force {
        println!("Are you sure you want to delete {} personas? (y/N)", doomed);
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cleanup cancelled.");
            return Ok(());
        }
    }

    let report = remove_personas(client.as_ref(), user, personas, |p| {
        purge || is_catalog_persona(p)
    })
    .await;

    for persona in &report.deleted {
        println!("{} Deleted {} ({})", style("✓").green().bold(), persona.name, persona.id);
    }
    for (persona, reason) in &report.failed {
        println!("{} {}: {}", style("✗").red().bold(), persona.name, reason);
    }

    if !report.failed.is_empty() {
        bail!("{} personas could not be deleted", report.failed.len());
    }
    Ok(())
}

/// Generate trending reels and open them in the terminal browser
pub async fn browse(config: &Config, user: &UserId, matches: &ArgMatches) -> Result<()> {
    let count = matches
        .get_one::<usize>("count")
        .copied()
        .unwrap_or(config.generator.trending_count);

    let client = connect(config)?;
    let generator = load_generator(config, &client, user).await?;
    println!("Generating {} reels...", count);
    let cards = generator
        .trending_reels(count, &mut rand::rng())
        .await
        .context("Failed to generate reels")?;

    let app = App::new(cards)
        .with_config(&config.deck)
        .with_theme(config.app.color_scheme.into());
    let mut tui = TuiApp::new(app).context("Failed to start the terminal browser")?;
    tui.run().context("Terminal browser failed")?;

    Ok(())
}

/// `config show|init|reset|path`
pub fn config(manager: &ConfigManager, config: &Config, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => {
            let text = toml::to_string_pretty(config).context("Failed to render configuration")?;
            println!("# {}", manager.config_path().display());
            println!("{}", text);
            println!(
                "# persona api key: {}",
                if config.persona.api_key().is_some() { "set" } else { "not set" }
            );
            for warning in manager.validate().unwrap_or_default() {
                println!("{} {}", style("!").yellow(), warning);
            }
        }
        Some(("init", _)) => {
            if manager.initialize().context("Failed to write configuration")? {
                println!(
                    "{} Wrote defaults to {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
            } else {
                println!("Configuration already exists at {}", manager.config_path().display());
            }
        }
        Some(("reset", _)) => {
            manager.reset().context("Failed to reset configuration")?;
            println!("{} Configuration reset to defaults", style("✓").green().bold());
        }
        Some(("path", _)) => println!("{}", manager.config_path().display()),
        _ => bail!("Unknown config command"),
    }
    Ok(())
}

fn connect(config: &Config) -> Result<Arc<PersonaClient>> {
    let client = PersonaClient::new(client_config(&config.persona)?)
        .context("Failed to create persona client")?;
    Ok(Arc::new(client))
}

async fn load_generator(
    config: &Config,
    client: &Arc<PersonaClient>,
    user: &UserId,
) -> Result<ReelGenerator<PersonaClient>> {
    let directory = PersonaDirectory::load(client.as_ref(), user)
        .await
        .context("Failed to list personas")?;
    if directory.is_empty() {
        bail!("No experts are set up for {}. Run 'setup-experts' first.", user);
    }
    Ok(ReelGenerator::new(Arc::clone(client), user.clone(), directory)
        .with_settings(generator_settings(&config.generator)?))
}

/// Client settings for the `[persona]` section
fn client_config(persona: &PersonaConfig) -> Result<ClientConfig> {
    let key = persona
        .api_key()
        .ok_or_else(|| {
            anyhow!(
                "No persona API key. Set {} or add api_key to [persona].",
                API_KEY_ENV
            )
        })?;

    Ok(ClientConfig::new(key)
        .with_base_url(persona.base_url.as_str())
        .with_api_version(persona.api_version.as_str())
        .with_timeout(persona.timeout())
        .with_retry_policy(Some(RetryPolicy::new(persona.max_attempts as usize)))
        .with_circuit_breaker(Some(CircuitBreakerConfig::new(
            persona.failure_threshold as usize,
            persona.cooldown(),
        ))))
}

fn generator_settings(config: &GeneratorConfig) -> Result<GeneratorSettings> {
    let mut settings = GeneratorSettings::default()
        .with_perspective_delay(Duration::from_millis(config.perspective_delay_ms))
        .with_trending_delay(Duration::from_millis(config.trending_delay_ms))
        .with_series_delay(Duration::from_millis(config.series_delay_ms))
        .with_max_perspectives(config.max_perspectives);
    settings.series_difficulty = parse_difficulty(&config.default_difficulty)?;
    Ok(settings)
}

fn parse_difficulty(level: &str) -> Result<Difficulty> {
    level.parse().map_err(|e: String| anyhow!(e))
}

/// Text files go up as raw text, anything else as a document
fn training_input(path: &Path, bytes: Vec<u8>) -> Result<TrainingInput> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        let text = String::from_utf8(bytes).context("Text file is not valid UTF-8")?;
        if text.trim().is_empty() {
            bail!("File is empty: {}", path.display());
        }
        return Ok(TrainingInput::Text(text));
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))?
        .to_string();
    Ok(TrainingInput::Document { filename, content: bytes })
}

fn is_catalog_persona(persona: &PersonaSummary) -> bool {
    find_expert(&persona.slug).is_some()
}

fn expert_label(slug: &ExpertSlug) -> String {
    match find_expert(slug.as_str()) {
        Some(expert) => expert.name.to_string(),
        None => slug.to_string(),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} is required", name))
}

fn output_cards(cards: &[ReelCard], json: bool, heading: &str) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(cards).context("Failed to serialize cards")?;
        println!("{}", text);
        return Ok(());
    }

    println!("\n{} {}", style(cards.len()).bold().cyan(), heading);
    println!("{}", "=".repeat(80));
    for card in cards {
        print_card(card);
    }
    Ok(())
}

fn print_card(card: &ReelCard) {
    println!("\n{} {}", icon_for(&card.expert), style(&card.title).bold());
    println!("  {}", card_meta_line(card));
    if let Some(content) = card.content() {
        if let Some(hook) = &content.hook_line {
            println!("  {}", truncate(hook, 76));
        }
        if let Some(quiz) = &content.quiz {
            println!("  ❓ {}", truncate(quiz.question(), 74));
        }
    }
}

/// "Dr. Quantum · hook · beginner · 👁 1.2K" plus the series position, if any
fn card_meta_line(card: &ReelCard) -> String {
    let mut parts = vec![
        expert_label(&card.expert),
        card.content_type.to_string(),
        card.difficulty.to_string(),
        format!("👁 {}", format_count(card.presentation.stats.views)),
    ];
    if let Some(series) = &card.series {
        parts.push(format!(
            "episode {}/{}",
            series.episode(),
            series.total_episodes()
        ));
    }
    parts.join(" · ")
}

fn print_persona_summary(persona: &PersonaSummary) {
    let catalog_mark = if is_catalog_persona(persona) {
        format!(" {}", style("catalog").cyan())
    } else {
        String::new()
    };
    println!("\n{}{}", style(&persona.name).bold(), catalog_mark);
    println!("  Slug: {} | ID: {}", persona.slug, truncate(persona.id.as_str(), 12));
    if !persona.short_description.is_empty() {
        println!("  {}", persona.short_description);
    }
    if !persona.tags.is_empty() {
        println!("  Tags: {}", persona.tags.join(", "));
    }
    if persona.private {
        println!("  {}", style("private").dim());
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorscroll_core::ParsedContent;
    use mentorscroll_persona_client::PersonaId;
    use tempfile::TempDir;

    fn summary(slug: &str) -> PersonaSummary {
        PersonaSummary {
            id: PersonaId::new("p-1"),
            name: slug.to_string(),
            slug: slug.to_string(),
            short_description: String::new(),
            tags: Vec::new(),
            private: false,
        }
    }

    #[test]
    fn test_client_config_needs_key() {
        let persona = PersonaConfig::default();
        let err = client_config(&persona).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_client_config_from_section() {
        let mut persona = PersonaConfig::default();
        persona.api_key = Some("secret".to_string());
        persona.base_url = "http://localhost:9000".to_string();
        persona.max_attempts = 5;

        let client = client_config(&persona).unwrap();
        assert_eq!(client.api_key, "secret");
        assert_eq!(client.base_url, "http://localhost:9000");
        assert_eq!(client.timeout, persona.timeout());
        assert_eq!(client.retry_policy.map(|p| p.max_attempts()), Some(5));
        assert!(client.circuit_breaker.is_some());
    }

    #[test]
    fn test_generator_settings_from_section() {
        let mut config = GeneratorConfig::default();
        config.max_perspectives = 2;
        config.trending_delay_ms = 0;
        config.default_difficulty = "advanced".to_string();

        let settings = generator_settings(&config).unwrap();
        assert_eq!(settings.max_perspectives, 2);
        assert_eq!(settings.trending_delay, Duration::ZERO);
        assert_eq!(settings.series_difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_generator_settings_rejects_bad_difficulty() {
        let mut config = GeneratorConfig::default();
        config.default_difficulty = "wizard".to_string();
        assert!(generator_settings(&config).is_err());
    }

    #[test]
    fn test_training_input_text_and_document() {
        let dir = TempDir::new().unwrap();

        let notes = dir.path().join("notes.md");
        let input = training_input(&notes, b"Qubits hold superpositions".to_vec()).unwrap();
        assert_eq!(input, TrainingInput::Text("Qubits hold superpositions".to_string()));

        let paper = dir.path().join("paper.pdf");
        let input = training_input(&paper, vec![0x25, 0x50, 0x44, 0x46]).unwrap();
        assert_eq!(
            input,
            TrainingInput::Document {
                filename: "paper.pdf".to_string(),
                content: vec![0x25, 0x50, 0x44, 0x46],
            }
        );
    }

    #[test]
    fn test_training_input_rejects_blank_text() {
        let err = training_input(Path::new("empty.txt"), b"  \n".to_vec()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_catalog_persona_detection() {
        assert!(is_catalog_persona(&summary("dr-quantum")));
        assert!(!is_catalog_persona(&summary("my-custom-tutor-x1")));
    }

    #[test]
    fn test_expert_label() {
        assert_eq!(expert_label(&ExpertSlug::new("eco-emma")), "Eco Emma");
        assert_eq!(expert_label(&ExpertSlug::new("someone-else")), "someone-else");
    }

    #[test]
    fn test_card_meta_line() {
        let card = ReelCard::generated(
            ExpertSlug::new("dr-quantum"),
            "tunneling",
            ContentType::Explanation,
            ParsedContent::titled("Tunneling"),
        );
        let line = card_meta_line(&card);
        assert!(line.starts_with("Dr. Quantum · explanation · beginner · 👁 "));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("12345678", 8), "12345678");
        assert_eq!(truncate("123456789", 8), "12345678...");
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }
}
