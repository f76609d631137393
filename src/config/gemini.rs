// ABOUTME: Gemini provider configuration with explicit credential handling
// ABOUTME: GeminiConfig loads key, model, and endpoint; ApiKey keeps the secret out of logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{self, Debug, Formatter};

use crate::constants::{env_config, gemini};
use crate::errors::{AppError, AppResult};

/// A credential that passed the configuration check
///
/// Only [`GeminiConfig::require_api_key`] constructs one, so holding an
/// `ApiKey` means the key is neither missing nor the placeholder value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Raw key for the request URL
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Configuration for Gemini-backed clients
///
/// Clients receive this value at construction instead of reading process
/// state, so tests can build any configuration without touching the
/// environment.
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API key as configured; may be absent or the placeholder
    pub api_key: Option<String>,
    /// Model used for generation and chat
    pub model: String,
    /// REST endpoint base
    pub base_url: String,
}

impl GeminiConfig {
    /// Create a configuration with the given key and default model/endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::unconfigured()
        }
    }

    /// Configuration without any key
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            model: gemini::DEFAULT_MODEL.to_owned(),
            base_url: gemini::API_BASE_URL.to_owned(),
        }
    }

    /// Load from `GEMINI_API_KEY`, `FITSTUDENT_GEMINI_MODEL` and
    /// `FITSTUDENT_GEMINI_BASE_URL`
    ///
    /// A missing key is not an error here; it surfaces when a client needs it.
    #[must_use]
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_key: env::var(env_config::GEMINI_API_KEY).ok(),
            model: non_empty(env_config::GEMINI_MODEL)
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_owned()),
            base_url: non_empty(env_config::GEMINI_BASE_URL)
                .unwrap_or_else(|| gemini::API_BASE_URL.to_owned()),
        }
    }

    /// Set a custom model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom endpoint base
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a usable key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.require_api_key().is_ok()
    }

    /// Return the key, rejecting absent, blank and placeholder values alike
    ///
    /// # Errors
    ///
    /// Returns a `ConfigMissing` error with the same message in every case.
    pub fn require_api_key(&self) -> AppResult<ApiKey> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != gemini::PLACEHOLDER_API_KEY => {
                Ok(ApiKey(key.to_owned()))
            }
            _ => Err(AppError::missing_api_key()),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
