//! MentorScroll configuration
//!
//! One TOML file holds every section. Each section implements
//! [`ConfigSection`] so it validates and merges on its own; [`Config`] only
//! stitches them together.
//!
//! Missing files and missing keys fall back to defaults. Writes go through a
//! temporary file and a rename so a crash never leaves a half-written file.
//! The persona API key is read from the file or the environment but is never
//! written.
//!
//! # Example
//!
//! ```rust,no_run
//! use mentorscroll_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("config directory");
//! let config = manager.load_with_env_overrides().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Talking to {}", config.persona.base_url);
//! ```

mod error;
mod manager;
mod overrides;
mod persistence;
mod validation;

pub mod app_config;
mod deck_config;
mod generator_config;
mod persona_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::ConfigManager;
pub use overrides::{apply_overrides, ENV_PREFIX, OVERRIDE_VARIABLES};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, ColorScheme, LogLevel, DEFAULT_USER_ID};
pub use deck_config::DeckConfig;
pub use generator_config::GeneratorConfig;
pub use persona_config::PersonaConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Environment variable holding the persona service key
pub const API_KEY_ENV: &str = "MENTORSCROLL_PERSONA_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    pub app: AppConfig,

    /// Persona service connection
    pub persona: PersonaConfig,

    /// Deck transitions and drag input
    pub deck: DeckConfig,

    /// Pacing and sizes for generated content
    pub generator: GeneratorConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section, returning all errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for result in [
            self.app.validate(),
            self.persona.validate(),
            self.deck.validate(),
            self.generator.validate(),
        ] {
            if let Err(mut e) = result {
                errors.append(&mut e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges `other` into this config, preferring values from `other`
    ///
    /// Used for the override chain: defaults < file < environment < flags.
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.persona.merge(other.persona);
        self.deck.merge(other.deck);
        self.generator.merge(other.generator);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            persona: PersonaConfig::default(),
            deck: DeckConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}
