//! Configuration manager, the main API for config operations

use crate::overrides::apply_overrides;
use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.toml";

/// Loads, saves and initializes `config.toml`
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the platform config directory
    ///
    /// - Linux: `~/.config/mentorscroll/`
    /// - macOS: `~/Library/Application Support/mentorscroll/`
    /// - Windows: `%APPDATA%\mentorscroll\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "mentorscroll")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Loads the file, or defaults when it does not exist
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the file, logging and falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Validates and atomically writes `config`
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, applies `update_fn` and saves
    ///
    /// ```rust,no_run
    /// # use mentorscroll_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.generator.max_perspectives = 2;
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a commented default file unless one exists
    ///
    /// Returns whether a file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.generate_default_with_comments()?;
        Ok(true)
    }

    /// Overwrites the file with defaults
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Returns every validation problem in the current file
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the file and applies `MENTORSCROLL_<SECTION>_<FIELD>` variables
    ///
    /// `MENTORSCROLL_PERSONA_API_KEY` is the usual way to supply the key.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        self.load_with_overrides(|name| std::env::var(name).ok())
    }

    /// Like [`load_with_env_overrides`](Self::load_with_env_overrides) with
    /// a caller-supplied lookup
    pub fn load_with_overrides<F>(&self, lookup: F) -> ConfigResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load()?;
        apply_overrides(&mut config, lookup)?;

        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("After environment overrides: {}", error);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::LogLevel;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let (_temp_dir, manager) = setup_test_manager();
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_load_or_default_with_corrupt_file() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(manager.config_path(), "[[[ nope").unwrap();
        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, manager) = setup_test_manager();

        let mut config = Config::default();
        config.generator.trending_count = 4;

        manager.save(&config).expect("Should save config");
        let loaded = manager.load().expect("Should load config");
        assert_eq!(loaded.generator.trending_count, 4);
    }

    #[test]
    fn test_update() {
        let (_temp_dir, manager) = setup_test_manager();
        manager.save(&Config::default()).expect("Should save");

        manager
            .update(|config| config.deck.nav_exit_ms = 250)
            .expect("Should update");

        let loaded = manager.load().expect("Should load");
        assert_eq!(loaded.deck.nav_exit_ms, 250);
    }

    #[test]
    fn test_initialize_creates_file_once() {
        let (_temp_dir, manager) = setup_test_manager();

        assert!(manager.initialize().expect("Should initialize"));
        assert!(manager.config_path().exists());
        assert!(!manager.initialize().expect("Should initialize"));
    }

    #[test]
    fn test_reset() {
        let (_temp_dir, manager) = setup_test_manager();

        let mut config = Config::default();
        config.generator.series_episodes = 8;
        manager.save(&config).expect("Should save");

        manager.reset().expect("Should reset");
        assert_eq!(manager.load().expect("Should load"), Config::default());
    }

    #[test]
    fn test_validate_reports_file_problems() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(
            manager.config_path(),
            "[generator]\nmax_perspectives = 9\n",
        )
        .unwrap();

        let problems = manager.validate().expect("Should validate");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("generator.max_perspectives"));
    }

    #[test]
    fn test_invalid_config_not_saved() {
        let (_temp_dir, manager) = setup_test_manager();

        let mut config = Config::default();
        config.persona.max_attempts = 0;
        manager
            .save(&config)
            .expect_err("Should not save invalid config");
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_overrides_on_top_of_file() {
        let (_temp_dir, manager) = setup_test_manager();
        manager
            .update(|config| config.app.log_level = LogLevel::Warn)
            .expect("Should update");

        let config = manager
            .load_with_overrides(|name| match name {
                "MENTORSCROLL_PERSONA_API_KEY" => Some("env-key".to_string()),
                "MENTORSCROLL_GENERATOR_TRENDING_COUNT" => Some("3".to_string()),
                _ => None,
            })
            .expect("Should load with overrides");

        assert_eq!(config.app.log_level, LogLevel::Warn);
        assert_eq!(config.persona.api_key(), Some("env-key"));
        assert_eq!(config.generator.trending_count, 3);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let (_temp_dir, manager) = setup_test_manager();
        let result = manager.load_with_overrides(|name| {
            (name == "MENTORSCROLL_APP_LOG_LEVEL").then(|| "shouty".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidOverride { .. })));
    }

    #[test]
    fn test_config_file_path() {
        let (temp_dir, manager) = setup_test_manager();
        assert!(manager.config_path().ends_with("config.toml"));
        assert_eq!(manager.config_dir(), &temp_dir.path().to_path_buf());
    }
}
