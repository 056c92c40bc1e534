//! Centralized model definitions for all LLM providers

use super::{AnthropicService, LlmError, LlmService, OpenAIService};
use std::sync::Arc;

/// LLM provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    /// Get the display name for this provider
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::OpenAI => "OpenAI",
        }
    }
}

/// Model definition with metadata
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// User-facing model ID (e.g., "gpt-4o-mini")
    pub id: &'static str,
    pub provider: Provider,
    /// API name used by the provider
    pub api_name: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

impl ModelDef {
    /// Build the service for this model
    pub fn build(
        &self,
        api_key: &str,
        gateway: Option<&str>,
    ) -> Result<Arc<dyn LlmService>, LlmError> {
        if api_key.is_empty() {
            return Err(LlmError::auth(format!(
                "{} requires an API key or gateway",
                self.id
            )));
        }
        let service: Arc<dyn LlmService> = match self.provider {
            Provider::Anthropic => Arc::new(AnthropicService::new(
                api_key,
                self.id,
                self.api_name,
                gateway,
            )?),
            Provider::OpenAI => Arc::new(OpenAIService::new(
                api_key,
                self.id,
                self.api_name,
                gateway,
            )?),
        };
        Ok(service)
    }
}

/// Get all available model definitions
pub fn all_models() -> &'static [ModelDef] {
    &[
        // OpenAI models
        ModelDef {
            id: "gpt-4o-mini",
            provider: Provider::OpenAI,
            api_name: "gpt-4o-mini",
            description: "GPT-4o Mini (fast, cheap)",
        },
        ModelDef {
            id: "gpt-4o",
            provider: Provider::OpenAI,
            api_name: "gpt-4o",
            description: "GPT-4o (balanced)",
        },
        ModelDef {
            id: "gpt-3.5-turbo",
            provider: Provider::OpenAI,
            api_name: "gpt-3.5-turbo",
            description: "GPT-3.5 Turbo (legacy)",
        },
        // Anthropic models
        ModelDef {
            id: "claude-4.5-haiku",
            provider: Provider::Anthropic,
            api_name: "claude-haiku-4-5-20251001",
            description: "Claude Haiku 4.5 (fast, efficient)",
        },
        ModelDef {
            id: "claude-4.5-sonnet",
            provider: Provider::Anthropic,
            api_name: "claude-sonnet-4-5-20250929",
            description: "Claude Sonnet 4.5 (balanced performance)",
        },
    ]
}
