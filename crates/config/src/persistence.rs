//! Reading and atomically writing `config.toml`

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Reads the file, or returns defaults when there is none
    ///
    /// An empty or unparsable file is an error.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        // An empty file is corrupt, not a request for defaults
        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if config.version != CONFIG_VERSION {
            log::warn!(
                "Config version {} differs from {}, unknown keys were ignored",
                config.version,
                CONFIG_VERSION
            );
            config.version = CONFIG_VERSION;
        }

        // Invalid values are reported but kept so the user can fix them in place
        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("{}: {}", self.config_path.display(), error);
            }
        }

        Ok(config)
    }

    /// Validates `config` and writes it through a temporary file and rename
    ///
    /// The previous file is kept as `config.toml.backup`. The persona API key
    /// is not part of the written file.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::ValidationError)?;

        if let Some(parent) = self.config_path.parent() {
            self.ensure_directory_exists(parent)?;
        }

        if self.config_path.exists() {
            self.backup_config()?;
        }

        let toml_string = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, &toml_string)?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensures a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }

    /// Creates a backup of the current config file
    fn backup_config(&self) -> ConfigResult<()> {
        let backup_path = self.config_path.with_extension("toml.backup");
        fs::copy(&self.config_path, &backup_path)
            .map_err(|e| ConfigError::BackupError { source: e })?;
        log::debug!("Backed up config to {}", backup_path.display());
        Ok(())
    }

    /// Creates a temporary file in the same directory as the config file
    fn create_temp_file(&self) -> ConfigResult<NamedTempFile> {
        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Config path has no parent directory".to_string(),
            })?;

        NamedTempFile::new_in(dir).map_err(ConfigError::IoError)
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> ConfigResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(ConfigError::IoError)?;

        temp_file.flush().map_err(ConfigError::IoError)?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        Ok(())
    }

    /// Writes the default config preceded by a short header
    pub fn generate_default_with_comments(&self) -> ConfigResult<()> {
        let default_config = Config::default();
        default_config
            .validate()
            .map_err(ConfigError::ValidationError)?;

        if let Some(parent) = self.config_path.parent() {
            self.ensure_directory_exists(parent)?;
        }

        let body = toml::to_string_pretty(&default_config).map_err(ConfigError::SerializeError)?;
        let content = format!("{}\n{}", DEFAULT_HEADER, body);
        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, &content)?;

        log::info!("Generated default config at {}", self.config_path.display());
        Ok(())
    }
}

const DEFAULT_HEADER: &str = "\
# MentorScroll configuration
#
# The persona API key is read from MENTORSCROLL_PERSONA_API_KEY.
# It may also be set as api_key under [persona]; `config` commands never write it.
# Any value here can be overridden with MENTORSCROLL_<SECTION>_<FIELD>.
";
