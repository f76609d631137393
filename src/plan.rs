// ABOUTME: AI plan client turning a student profile into a validated seven-day plan
// ABOUTME: One structured-output generateContent call per request, decoded into FullPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Client
//!
//! [`PlanClient::generate`] checks the credential, builds the plan prompt,
//! asks the backend for JSON constrained by [`full_plan_schema`], and decodes
//! the reply into a [`FullPlan`].
//!
//! Failures keep their class:
//!
//! - missing or placeholder key → `ConfigMissing`, and the backend is never called
//! - rejected key → `ExternalAuthFailed` (message asks the user to check the key)
//! - empty, malformed or out-of-shape payload → `ExternalInvalidResponse`
//! - anything else from the backend → propagated unchanged
//!
//! No retries are attempted.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::config::GeminiConfig;
use crate::constants::messages::EMPTY_RESPONSE;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::build_plan_prompt;
use crate::llm::{
    full_plan_schema, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GenerativeBackend,
};
use crate::models::{FullPlan, Profile};

/// Generates weekly plans through a [`GenerativeBackend`]
#[derive(Clone)]
pub struct PlanClient {
    config: GeminiConfig,
    backend: Arc<dyn GenerativeBackend>,
}

impl PlanClient {
    /// Create a client over `backend` using `config` for credential and model
    #[must_use]
    pub fn new(config: GeminiConfig, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { config, backend }
    }

    /// Generate a seven-day plan for `profile`
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` when no usable key is configured (no request is sent)
    /// - `ExternalAuthFailed` when the provider rejects the key
    /// - `ExternalInvalidResponse` when the reply is empty, is not valid plan
    ///   JSON, or does not hold exactly seven days
    /// - any other backend error unchanged
    #[instrument(skip(self, profile), fields(backend = self.backend.name(), model = %self.config.model))]
    pub async fn generate(&self, profile: &Profile) -> AppResult<FullPlan> {
        let api_key = self.config.require_api_key().inspect_err(|e| {
            error!(error = %e, "Plan generation skipped: API key not configured");
        })?;

        let request = GenerateContentRequest::from_prompt(build_plan_prompt(profile))
            .with_generation_config(GenerationConfig::structured(full_plan_schema()));

        let response = self
            .backend
            .generate_content(&api_key, &self.config.model, &request)
            .await
            .inspect_err(|e| {
                error!(
                    code = ?e.code,
                    external = e.code.is_external(),
                    error = %e,
                    "Plan generation failed"
                );
            })?;

        log_usage(&response);

        let plan = decode_plan(&response)?;
        info!(
            days = plan.weekly_plan.len(),
            rest_days = plan.weekly_plan.iter().filter(|d| d.is_rest_day()).count(),
            "Generated weekly plan"
        );
        Ok(plan)
    }
}

impl Debug for PlanClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanClient")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Decode the first candidate's text into a validated plan
fn decode_plan(response: &GenerateContentResponse) -> AppResult<FullPlan> {
    let text = response
        .text()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            error!(
                finish_reason = response.finish_reason().unwrap_or("none"),
                "Gemini returned no plan text"
            );
            AppError::decode(EMPTY_RESPONSE)
        })?;

    let plan: FullPlan = serde_json::from_str(&text).map_err(|e| {
        error!(error = %e, "Plan payload is not valid plan JSON");
        AppError::decode(format!("Failed to parse plan: {e}")).with_source(e)
    })?;

    plan.validate().inspect_err(|e| error!(error = %e, "Plan failed validation"))?;
    Ok(plan)
}

fn log_usage(response: &GenerateContentResponse) {
    if let Some(usage) = response.usage_metadata {
        debug!(
            prompt_tokens = ?usage.prompt_token_count,
            candidate_tokens = ?usage.candidates_token_count,
            total_tokens = ?usage.total_token_count,
            "Plan generation token usage"
        );
    }
}
