//! `MENTORSCROLL_<SECTION>_<FIELD>` environment overrides

use crate::{Config, ConfigError, ConfigResult};
use std::str::FromStr;

/// Prefix shared by every override variable
pub const ENV_PREFIX: &str = "MENTORSCROLL_";

/// Variables [`apply_overrides`] understands
pub const OVERRIDE_VARIABLES: [&str; 12] = [
    "MENTORSCROLL_APP_LOG_LEVEL",
    "MENTORSCROLL_APP_USER_ID",
    "MENTORSCROLL_APP_DEBUG_MODE",
    "MENTORSCROLL_PERSONA_BASE_URL",
    "MENTORSCROLL_PERSONA_API_VERSION",
    "MENTORSCROLL_PERSONA_API_KEY",
    "MENTORSCROLL_PERSONA_TIMEOUT_SECS",
    "MENTORSCROLL_PERSONA_MAX_ATTEMPTS",
    "MENTORSCROLL_DECK_DRAG_THRESHOLD",
    "MENTORSCROLL_GENERATOR_MAX_PERSPECTIVES",
    "MENTORSCROLL_GENERATOR_TRENDING_COUNT",
    "MENTORSCROLL_GENERATOR_DEFAULT_DIFFICULTY",
];

fn parsed<T>(variable: &str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidOverride {
            variable: variable.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn flag(variable: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            variable: variable.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Applies every override `lookup` returns a value for
///
/// Returns the names of the variables that were applied. A value that does
/// not parse is an error; nothing is validated here.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<Vec<&'static str>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = Vec::new();

    for variable in OVERRIDE_VARIABLES {
        let Some(value) = lookup(variable) else {
            continue;
        };
        match variable {
            "MENTORSCROLL_APP_LOG_LEVEL" => config.app.log_level = parsed(variable, &value)?,
            "MENTORSCROLL_APP_USER_ID" => config.app.user_id = value.trim().to_string(),
            "MENTORSCROLL_APP_DEBUG_MODE" => config.app.debug_mode = flag(variable, &value)?,
            "MENTORSCROLL_PERSONA_BASE_URL" => config.persona.base_url = value.trim().to_string(),
            "MENTORSCROLL_PERSONA_API_VERSION" => {
                config.persona.api_version = value.trim().to_string()
            }
            "MENTORSCROLL_PERSONA_API_KEY" => config.persona.api_key = Some(value),
            "MENTORSCROLL_PERSONA_TIMEOUT_SECS" => {
                config.persona.timeout_secs = parsed(variable, &value)?
            }
            "MENTORSCROLL_PERSONA_MAX_ATTEMPTS" => {
                config.persona.max_attempts = parsed(variable, &value)?
            }
            "MENTORSCROLL_DECK_DRAG_THRESHOLD" => {
                config.deck.drag_threshold = parsed(variable, &value)?
            }
            "MENTORSCROLL_GENERATOR_MAX_PERSPECTIVES" => {
                config.generator.max_perspectives = parsed(variable, &value)?
            }
            "MENTORSCROLL_GENERATOR_TRENDING_COUNT" => {
                config.generator.trending_count = parsed(variable, &value)?
            }
            "MENTORSCROLL_GENERATOR_DEFAULT_DIFFICULTY" => {
                config.generator.default_difficulty = value.trim().to_ascii_lowercase()
            }
            _ => continue,
        }
        applied.push(variable);
    }

    if !applied.is_empty() {
        log::debug!("Applied environment overrides: {}", applied.join(", "));
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::LogLevel;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_variables_changes_nothing() {
        let mut config = Config::default();
        let applied = apply_overrides(&mut config, env(&[])).unwrap();
        assert!(applied.is_empty());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        let applied = apply_overrides(
            &mut config,
            env(&[
                ("MENTORSCROLL_APP_LOG_LEVEL", "debug"),
                ("MENTORSCROLL_PERSONA_API_KEY", "k-123"),
                ("MENTORSCROLL_PERSONA_TIMEOUT_SECS", " 20 "),
                ("MENTORSCROLL_GENERATOR_DEFAULT_DIFFICULTY", "Advanced"),
                ("MENTORSCROLL_APP_DEBUG_MODE", "yes"),
            ]),
        )
        .unwrap();

        assert_eq!(applied.len(), 5);
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert_eq!(config.persona.api_key(), Some("k-123"));
        assert_eq!(config.persona.timeout_secs, 20);
        assert_eq!(config.generator.default_difficulty, "advanced");
        assert!(config.app.debug_mode);
    }

    #[test]
    fn test_unparsable_value_is_an_error() {
        let mut config = Config::default();
        let err = apply_overrides(
            &mut config,
            env(&[("MENTORSCROLL_PERSONA_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride { variable, .. }
                if variable == "MENTORSCROLL_PERSONA_TIMEOUT_SECS"
        ));
    }

    #[test]
    fn test_every_variable_has_the_prefix() {
        assert!(OVERRIDE_VARIABLES.iter().all(|v| v.starts_with(ENV_PREFIX)));
    }
}
