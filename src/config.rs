//! Session configuration: set once when the session starts, read-only after.

use crate::constants::{DEFAULT_CHALLENGES_PER_LEVEL, MAX_PROBLEM_ATTEMPTS};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_CHALLENGES_PER_LEVEL: &str = "BAA_CHALLENGES_PER_LEVEL";
pub const ENV_MAX_ATTEMPTS: &str = "BAA_MAX_ATTEMPTS";
pub const ENV_REWARD: &str = "BAA_REWARD";
pub const ENV_TIMER: &str = "BAA_TIMER";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub challenges_per_level: usize,
    pub max_attempts: u32,
    /// Show the end-of-level reward regardless of score.
    pub show_reward: bool,
    pub timer_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            challenges_per_level: DEFAULT_CHALLENGES_PER_LEVEL,
            max_attempts: MAX_PROBLEM_ATTEMPTS,
            show_reward: false,
            timer_enabled: true,
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.challenges_per_level == 0 {
            return Err(ConfigError::ChallengesPerLevel(self.challenges_per_level));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::MaxAttempts(self.max_attempts));
        }
        Ok(self)
    }

    /// Defaults overridden by `BAA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so callers can feed it query
    /// parameters, env vars or a test map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_CHALLENGES_PER_LEVEL) {
            config.challenges_per_level = parse(ENV_CHALLENGES_PER_LEVEL, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_ATTEMPTS) {
            config.max_attempts = parse(ENV_MAX_ATTEMPTS, &value)?;
        }
        if let Some(value) = lookup(ENV_REWARD) {
            config.show_reward = parse_flag(ENV_REWARD, &value)?;
        }
        if let Some(value) = lookup(ENV_TIMER) {
            config.timer_enabled = parse_flag(ENV_TIMER, &value)?;
        }
        config.validate()
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_game_rules() {
        let config = GameConfig::default();
        assert_eq!(config.challenges_per_level, 5);
        assert_eq!(config.max_attempts, 2);
        assert!(!config.show_reward);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = GameConfig::from_lookup(lookup_from(&[
            (ENV_CHALLENGES_PER_LEVEL, "3"),
            (ENV_MAX_ATTEMPTS, "4"),
            (ENV_REWARD, ""),
            (ENV_TIMER, "off"),
        ]))
        .unwrap();
        assert_eq!(config.challenges_per_level, 3);
        assert_eq!(config.max_attempts, 4);
        assert!(config.show_reward);
        assert!(!config.timer_enabled);
    }

    #[test]
    fn zero_challenges_is_rejected() {
        let err = GameConfig::from_lookup(lookup_from(&[(ENV_CHALLENGES_PER_LEVEL, "0")]));
        assert_eq!(err, Err(ConfigError::ChallengesPerLevel(0)));
    }

    #[test]
    fn garbage_values_are_rejected() {
        let err = GameConfig::from_lookup(lookup_from(&[(ENV_MAX_ATTEMPTS, "many")]));
        assert!(matches!(err, Err(ConfigError::InvalidValue { key: ENV_MAX_ATTEMPTS, .. })));
    }
}
