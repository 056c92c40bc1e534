//! Model registry for managing available LLM providers

use super::{all_models, LlmService, LoggingService, ModelDef, Provider};
use std::collections::HashMap;
use std::sync::Arc;

/// Preferred default: small and quick, the game only needs one-word answers
const PREFERRED_DEFAULT: &str = "gpt-4o-mini";

/// Configuration for LLM providers
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Gateway base URL; when set it handles authentication for every provider
    pub gateway: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            default_model: std::env::var("DEFAULT_MODEL").ok(),
        }
    }
}

/// Registry of available LLM models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: String,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();

        for model_def in all_models() {
            if let Some(service) = Self::try_create_model(model_def, config) {
                services.insert(model_def.id.to_string(), service);
            }
        }

        let default_model = config
            .default_model
            .clone()
            .filter(|id| services.contains_key(id))
            .or_else(|| {
                if services.contains_key(PREFERRED_DEFAULT) {
                    Some(PREFERRED_DEFAULT.to_string())
                } else {
                    // First available in definition order
                    all_models()
                        .iter()
                        .find(|m| services.contains_key(m.id))
                        .map(|m| m.id.to_string())
                }
            })
            .unwrap_or_else(|| PREFERRED_DEFAULT.to_string());

        if let Some(requested) = &config.default_model {
            if requested != &default_model {
                tracing::warn!(
                    requested = %requested,
                    using = %default_model,
                    "Requested default model is unavailable"
                );
            }
        }

        Self {
            services,
            default_model,
        }
    }

    /// Try to create a model service, validating prerequisites
    fn try_create_model(model_def: &ModelDef, config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
        // In gateway mode, use "implicit" as the API key
        let api_key = if config.gateway.is_some() {
            "implicit".to_string()
        } else {
            match model_def.provider {
                Provider::Anthropic => config.anthropic_api_key.as_ref()?,
                Provider::OpenAI => config.openai_api_key.as_ref()?,
            }
            .clone()
        };

        match model_def.build(&api_key, config.gateway.as_deref()) {
            Ok(service) => Some(Arc::new(LoggingService::new(service))),
            Err(e) => {
                tracing::debug!(model = model_def.id, error = %e, "Model unavailable");
                None
            }
        }
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.get(&self.default_model)
    }

    /// Get the default model ID
    pub fn default_model_id(&self) -> &str {
        &self.default_model
    }

    /// List all available model IDs
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }

    /// Describe the available models for the config endpoint
    pub fn available_model_info(&self) -> Vec<&'static ModelDef> {
        all_models()
            .iter()
            .filter(|m| self.services.contains_key(m.id))
            .collect()
    }

    /// Check if any models are available
    pub fn has_models(&self) -> bool {
        !self.services.is_empty()
    }
}
