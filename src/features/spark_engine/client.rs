//! Spark Engine completion client
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with token gate and response normalization

use anyhow::{Context, Result};
use log::{debug, error, warn};
use serde_json::Value;
use std::collections::HashMap;

use super::tokens::{count_tokens, prompt_budget};
use super::wire::{CompletionRequest, CompletionResponse, EngineReply};
use crate::core::config::{Config, DEFAULT_ENGINE_URL, DEFAULT_MAX_TOKEN};
use crate::features::replies::CommandType;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

pub const REMOTE_ERROR_TEXT: &str = "⚠️ Error: Unable to process request.";
pub const INVALID_RESPONSE_TEXT: &str = "⚠️ Error: Invalid response from Spark Engine.";
pub const CONNECT_ERROR_TEXT: &str = "⚠️ Error: Unable to connect to Spark Engine.";
pub const FALLBACK_ANSWER_TEXT: &str = "⚠️ Oops, something went wrong!";

/// Normalized outcome of one completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub text: String,
    /// Provider-reported accounting, empty when unavailable
    pub usage: HashMap<String, f64>,
    /// Estimated prompt size
    pub tokens: usize,
}

impl CompletionResult {
    fn message(text: impl Into<String>, tokens: usize) -> Self {
        Self {
            text: text.into(),
            usage: HashMap::new(),
            tokens,
        }
    }
}

/// Stateless client for the completion endpoint.
///
/// Cloning is cheap; the underlying `reqwest::Client` shares its pool.
#[derive(Clone, Debug)]
pub struct SparkEngine {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    project_id: String,
    max_tokens: usize,
    system_prompt: String,
}

impl SparkEngine {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENGINE_URL.to_string(),
            api_key: api_key.into(),
            project_id: project_id.into(),
            max_tokens: DEFAULT_MAX_TOKEN,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let engine = Self::new(&config.spark_api_key, &config.project_id)
            .with_endpoint(&config.engine_url)
            .with_max_tokens(config.max_token);
        match &config.conversation_start_prompt {
            Some(prompt) => engine.with_system_prompt(prompt),
            None => engine,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Send one prompt and normalize whatever comes back.
    ///
    /// Never fails: every error path is mapped to a user-facing text.
    pub async fn send_message(&self, prompt: &str) -> CompletionResult {
        let tokens = count_tokens(prompt);
        let budget = prompt_budget(self.max_tokens);
        if tokens > budget {
            warn!("Prompt rejected | Tokens: {tokens} | Budget: {budget}");
            return CompletionResult::message(
                format!("Please limit your prompt to a maximum of {budget} tokens. Thank you."),
                tokens,
            );
        }

        let combined = format!("{}\n\n{}", self.system_prompt, prompt);
        debug!("Calling Spark Engine | Tokens: {tokens} | Endpoint: {}", self.endpoint);

        let response = match self.request(&combined).await {
            Ok(response) => response,
            Err(e) => {
                error!("Spark Engine request failed: {e:#}");
                return CompletionResult::message(CONNECT_ERROR_TEXT, tokens);
            }
        };

        match response.reply() {
            EngineReply::Error => {
                error!("Spark Engine API error: {:?}", response.error);
                CompletionResult::message(REMOTE_ERROR_TEXT, tokens)
            }
            EngineReply::Invalid => {
                warn!("Spark Engine returned an unexpected payload: {:?}", response.data);
                CompletionResult {
                    text: INVALID_RESPONSE_TEXT.to_string(),
                    usage: response.usage_map(),
                    tokens,
                }
            }
            reply => CompletionResult {
                usage: response.usage_map(),
                text: reply.into_text().unwrap_or_default(),
                tokens,
            },
        }
    }

    async fn request(&self, prompt: &str) -> Result<CompletionResponse> {
        let body = CompletionRequest {
            api_key: &self.api_key,
            project_id: &self.project_id,
            prompt,
        };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("Failed to reach Spark Engine")?;
        let status = response.status();
        if !status.is_success() {
            debug!("Spark Engine answered with HTTP {status}");
        }
        let body = response
            .json::<Value>()
            .await
            .with_context(|| format!("Failed to decode Spark Engine response (HTTP {status})"))?;
        Ok(CompletionResponse::from_body(body))
    }
}

/// Ask the engine a question on behalf of a slash command.
///
/// The question is tagged with the command type so the project can route it.
/// Always yields exactly one text; an empty answer becomes a fallback message.
pub async fn ask_question(engine: &SparkEngine, question: &str, command: CommandType) -> String {
    let tagged = format!("{{{{{}}}}} {}", command.as_str(), question);
    let result = engine.send_message(&tagged).await;
    if result.text.is_empty() {
        error!("Spark Engine error: no response text for /{}", command.as_str());
        return FALLBACK_ANSWER_TEXT.to_string();
    }
    result.text
}
