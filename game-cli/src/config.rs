use anyhow::{Context, Result};
use game_core::{BoundingBox, GameRules};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub min_players: usize,
    pub require_question: bool,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            min_players: parse_or(&lookup, "MIN_PLAYERS", 2)?,
            require_question: parse_or(&lookup, "REQUIRE_QUESTION", true)?,
            viewport_width: parse_or(&lookup, "VIEWPORT_WIDTH", 800.0)?,
            viewport_height: parse_or(&lookup, "VIEWPORT_HEIGHT", 600.0)?,
        })
    }

    pub fn rules(&self) -> GameRules {
        GameRules::new(self.min_players, self.require_question)
    }

    /// Box that `click` coordinates are measured against
    pub fn viewport(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.viewport_width, self.viewport_height)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_players: 2,
            require_question: true,
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, raw)),
        None => Ok(default),
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
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rules(), GameRules::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MIN_PLAYERS", "3"),
            ("REQUIRE_QUESTION", "false"),
            ("VIEWPORT_WIDTH", " 1024 "),
        ]))
        .unwrap();

        assert_eq!(config.min_players, 3);
        assert!(!config.require_question);
        assert_eq!(config.viewport().width, 1024.0);
        assert_eq!(config.viewport().height, 600.0);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("MIN_PLAYERS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("Invalid MIN_PLAYERS"));
    }

    #[test]
    fn test_min_players_never_below_two() {
        let config = Config::from_lookup(lookup_from(&[("MIN_PLAYERS", "1")])).unwrap();
        assert_eq!(config.rules().min_players(), 2);
    }
}
