// crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use mentorscroll_config::{Config, ConfigManager};
use mentorscroll_persona_client::UserId;
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("mentorscroll")
        .version(env!("CARGO_PKG_VERSION"))
        .author("MentorScroll Team")
        .about("Swipeable micro-lessons written by AI expert personas")
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .value_name("USER_ID")
                .help("Persona service user to act for (defaults to app.user_id)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .subcommand(
            Command::new("setup-experts")
                .about("Create and train a persona for every catalog expert"),
        )
        .subcommand(
            Command::new("train")
                .about("Add knowledge to an expert from a file")
                .arg(
                    Arg::new("slug")
                        .required(true)
                        .value_name("EXPERT")
                        .help("Expert slug, e.g. dr-quantum"),
                )
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_name("FILE")
                        .help("Text or document to upload"),
                ),
        )
        .subcommand(
            Command::new("chat")
                .about("Ask an expert a question")
                .arg(Arg::new("slug").required(true).value_name("EXPERT").help("Expert slug"))
                .arg(
                    Arg::new("message")
                        .required(true)
                        .value_name("MESSAGE")
                        .help("Question to ask"),
                )
                .arg(
                    Arg::new("reel")
                        .long("reel")
                        .value_name("TITLE")
                        .help("Ask about a reel with this title"),
                )
                .arg(
                    Arg::new("topic")
                        .long("topic")
                        .value_name("TOPIC")
                        .help("Topic of the reel")
                        .requires("reel"),
                ),
        )
        .subcommand(Command::new("list").about("List the personas owned by the user"))
        .subcommand(
            Command::new("test-expert")
                .about("Run an introduction, a reel and a follow-up question against one expert")
                .arg(Arg::new("slug").required(true).value_name("EXPERT").help("Expert slug")),
        )
        .subcommand(
            Command::new("create-expert")
                .about("Create a custom expert persona")
                .arg(Arg::new("name").required(true).value_name("NAME").help("Display name"))
                .arg(
                    Arg::new("domain")
                        .required(true)
                        .value_name("DOMAIN")
                        .help("Field of expertise"),
                )
                .arg(
                    Arg::new("description")
                        .required(true)
                        .value_name("DESCRIPTION")
                        .help("What the expert teaches"),
                )
                .arg(
                    Arg::new("tag")
                        .short('t')
                        .long("tag")
                        .value_name("TAG")
                        .help("Tag, may be repeated")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("knowledge")
                        .short('k')
                        .long("knowledge")
                        .value_name("FILE")
                        .help("Knowledge file, may be repeated")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate reels: one on a topic, or a trending batch")
                .arg(
                    Arg::new("topic")
                        .long("topic")
                        .value_name("TOPIC")
                        .help("Topic for a single reel"),
                )
                .arg(
                    Arg::new("expert")
                        .short('e')
                        .long("expert")
                        .value_name("EXPERT")
                        .help("Expert slug (matched from the topic when omitted)"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_name("TYPE")
                        .help("Content type")
                        .value_parser(["hook", "explanation", "practical"])
                        .default_value("hook"),
                )
                .arg(
                    Arg::new("difficulty")
                        .long("difficulty")
                        .value_name("LEVEL")
                        .help("Difficulty (defaults to generator.default_difficulty)")
                        .value_parser(["beginner", "intermediate", "advanced"]),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of trending reels (defaults to generator.trending_count)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print cards as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("perspectives")
                .about("Ask several experts for their take on one topic")
                .arg(Arg::new("topic").required(true).value_name("TOPIC").help("Topic to explore"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print cards as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("series")
                .about("Generate a multi-episode learning series")
                .arg(Arg::new("slug").required(true).value_name("EXPERT").help("Expert slug"))
                .arg(
                    Arg::new("subject")
                        .required(true)
                        .value_name("SUBJECT")
                        .help("Series subject"),
                )
                .arg(
                    Arg::new("episodes")
                        .long("episodes")
                        .value_name("N")
                        .help("Number of episodes (defaults to generator.series_episodes)")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print cards as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("cleanup")
                .about("Delete catalog expert personas")
                .arg(
                    Arg::new("purge")
                        .long("purge")
                        .help("Delete every persona the user owns")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Skip confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("browse")
                .about("Browse freshly generated reels in the terminal")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of reels to generate")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or reset the configuration")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(
                    Command::new("init").about("Write the default configuration if none exists"),
                )
                .subcommand(
                    Command::new("reset").about("Overwrite the configuration with defaults"),
                )
                .subcommand(Command::new("path").about("Print the configuration file location")),
        )
}

fn config_manager(dir: Option<&String>) -> Result<ConfigManager> {
    match dir {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir)),
        None => ConfigManager::new(),
    }
    .context("Failed to open configuration directory")
}

fn init_logging(config: &Config) {
    let default_filter = if config.app.debug_mode {
        "debug"
    } else {
        config.app.log_level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let manager = config_manager(matches.get_one::<String>("config"))?;
    let config = manager
        .load_with_env_overrides()
        .context("Failed to load configuration")?;
    init_logging(&config);

    let user = UserId::new(
        matches
            .get_one::<String>("user")
            .cloned()
            .unwrap_or_else(|| config.app.user_id.clone()),
    );
    log::debug!("Acting for user {}", user);

    match matches.subcommand() {
        Some(("setup-experts", _)) => commands::setup_experts(&config, &user).await,
        Some(("train", sub_matches)) => commands::train(&config, &user, sub_matches).await,
        Some(("chat", sub_matches)) => commands::chat(&config, &user, sub_matches).await,
        Some(("list", _)) => commands::list_personas(&config, &user).await,
        Some(("test-expert", sub_matches)) => {
            commands::test_expert(&config, &user, sub_matches).await
        }
        Some(("create-expert", sub_matches)) => {
            commands::create_expert(&config, &user, sub_matches).await
        }
        Some(("generate", sub_matches)) => commands::generate(&config, &user, sub_matches).await,
        Some(("perspectives", sub_matches)) => {
            commands::perspectives(&config, &user, sub_matches).await
        }
        Some(("series", sub_matches)) => commands::series(&config, &user, sub_matches).await,
        Some(("cleanup", sub_matches)) => commands::cleanup(&config, &user, sub_matches).await,
        Some(("browse", sub_matches)) => commands::browse(&config, &user, sub_matches).await,
        Some(("config", sub_matches)) => commands::config(&manager, &config, sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
