//! Bot configuration
//!
//! Secrets and Discord wiring come from the environment. The bot settings
//! (`MAX_TOKEN`, `CONVERSATION_START_PROMPT`, `USE_EMBED`) can also live in a
//! YAML file; environment variables of the same name take precedence.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with env + YAML settings layering

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Completion endpoint used when `SPARK_ENGINE_URL` is not set
pub const DEFAULT_ENGINE_URL: &str = "https://sparkengine.ai/api/engine/completion";
/// Model context budget used when `MAX_TOKEN` is not configured
pub const DEFAULT_MAX_TOKEN: usize = 4096;
/// Settings file looked up when `BOT_SETTINGS_PATH` is not set
pub const DEFAULT_SETTINGS_PATH: &str = "settings.yaml";

/// Settings as they appear in the optional YAML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BotSettings {
    #[serde(rename = "MAX_TOKEN", default)]
    pub max_token: Option<usize>,
    #[serde(rename = "CONVERSATION_START_PROMPT", default)]
    pub conversation_start_prompt: Option<String>,
    #[serde(rename = "USE_EMBED", default)]
    pub use_embed: Option<bool>,
}

impl BotSettings {
    /// Load settings from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {path}"))?;
        Self::parse(&contents)
    }

    /// Parse settings from YAML text. An empty document yields defaults.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: BotSettings = serde_yaml::from_str(contents)?;
        Ok(settings)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_client_id: Option<u64>,
    pub discord_guild_id: Option<u64>,
    pub spark_api_key: String,
    pub project_id: String,
    pub engine_url: String,
    pub max_token: usize,
    pub conversation_start_prompt: Option<String>,
    pub use_embed: bool,
    pub log_level: String,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| anyhow!("{key} must be set"));

        let settings_path =
            get("BOT_SETTINGS_PATH").unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
        let file_settings = if Path::new(&settings_path).exists() {
            BotSettings::load(&settings_path)?
        } else {
            BotSettings::default()
        };

        let max_token = match get("MAX_TOKEN") {
            Some(raw) => parse_number("MAX_TOKEN", &raw)?,
            None => file_settings.max_token.unwrap_or(DEFAULT_MAX_TOKEN),
        };
        let use_embed = match get("USE_EMBED") {
            Some(raw) => parse_bool("USE_EMBED", &raw)?,
            None => file_settings.use_embed.unwrap_or(true),
        };
        let conversation_start_prompt = get("CONVERSATION_START_PROMPT")
            .or(file_settings.conversation_start_prompt)
            .filter(|p| !p.trim().is_empty());

        Ok(Config {
            discord_token: require("DISCORD_BOT_TOKEN")?,
            discord_client_id: get("DISCORD_CLIENT_ID")
                .map(|raw| parse_number("DISCORD_CLIENT_ID", &raw))
                .transpose()?,
            discord_guild_id: get("DISCORD_GUILD_ID")
                .map(|raw| parse_number("DISCORD_GUILD_ID", &raw))
                .transpose()?,
            spark_api_key: require("SPARK_ENGINE_API_KEY")?,
            project_id: require("PROJECT_ID")?,
            engine_url: get("SPARK_ENGINE_URL").unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string()),
            max_token,
            conversation_start_prompt,
            use_embed,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("{key} must be a non-negative integer, got '{raw}'"))
}

/// Parse a boolean flag the way shell users tend to write them
pub fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{key} must be a boolean, got '{raw}'")),
    }
}
