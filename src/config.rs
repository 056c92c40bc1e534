//! Server configuration read from the environment at startup

use crate::game::GameConfig;
use crate::oracle::PromptSet;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_SESSIONS: usize = 1000;
const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("Unknown game variant {0:?} (expected \"classic\" or \"hinted\")")]
    UnknownVariant(String),
}

/// Game rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Ten questions, no hints
    Classic,
    /// Twenty questions, two hints
    Hinted,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Hinted => "hinted",
        }
    }

    pub fn game_config(self) -> GameConfig {
        match self {
            Variant::Classic => GameConfig::CLASSIC,
            Variant::Hinted => GameConfig::HINTED,
        }
    }

    pub fn prompts(self) -> PromptSet {
        match self {
            Variant::Classic => PromptSet::classic(),
            Variant::Hinted => PromptSet::hinted(),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "hinted" => Ok(Variant::Hinted),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub variant: Variant,
    pub game: GameConfig,
    /// Steers the namer toward a kind of object
    pub category: Option<String>,
    pub max_sessions: usize,
    pub oracle_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset and blank values take defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let variant = match get("TWENTYQ_VARIANT") {
            Some(v) => v.parse()?,
            None => Variant::Classic,
        };
        let preset = variant.game_config();

        let question_limit = parse_or(
            "TWENTYQ_QUESTION_LIMIT",
            get("TWENTYQ_QUESTION_LIMIT"),
            preset.question_limit,
        )?;
        if question_limit == 0 {
            return Err(ConfigError::Zero {
                name: "TWENTYQ_QUESTION_LIMIT",
            });
        }
        let hint_budget = parse_or(
            "TWENTYQ_HINT_BUDGET",
            get("TWENTYQ_HINT_BUDGET"),
            preset.hint_budget,
        )?;

        let max_sessions = parse_or(
            "TWENTYQ_MAX_SESSIONS",
            get("TWENTYQ_MAX_SESSIONS"),
            DEFAULT_MAX_SESSIONS,
        )?;
        if max_sessions == 0 {
            return Err(ConfigError::Zero {
                name: "TWENTYQ_MAX_SESSIONS",
            });
        }
        let timeout_secs = parse_or(
            "TWENTYQ_ORACLE_TIMEOUT_SECS",
            get("TWENTYQ_ORACLE_TIMEOUT_SECS"),
            DEFAULT_ORACLE_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Zero {
                name: "TWENTYQ_ORACLE_TIMEOUT_SECS",
            });
        }

        Ok(Self {
            port: parse_or("TWENTYQ_PORT", get("TWENTYQ_PORT"), DEFAULT_PORT)?,
            variant,
            game: GameConfig::new(question_limit, hint_budget),
            category: get("TWENTYQ_CATEGORY").map(|c| c.trim().to_string()),
            max_sessions,
            oracle_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value: v }),
        None => Ok(default),
    }
}
