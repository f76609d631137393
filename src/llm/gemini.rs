// ABOUTME: Google Gemini REST backend for structured plan generation and chat sessions
// ABOUTME: Maps Gemini error bodies onto the invalid-credential, rate-limit, and provider error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Backend
//!
//! Implementation of [`GenerativeBackend`] over the Generative Language REST
//! API (`models/{model}:generateContent`).
//!
//! ## Error Mapping
//!
//! - body containing `API_KEY_INVALID` → `ExternalAuthFailed`
//! - HTTP 429 → `ExternalRateLimited`, with Gemini's retry delay when present
//! - any other non-2xx → `ExternalServiceError`
//! - connection or read failure → `ExternalServiceUnavailable`
//!
//! ## Chat Sessions
//!
//! The REST API is stateless. [`GeminiChat`] keeps the turn history privately
//! and re-sends it with every message.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{
    ChatSession, Content, GenerateContentRequest, GenerateContentResponse, GenerativeBackend,
};
use crate::config::ApiKey;
use crate::constants::gemini::{API_BASE_URL, API_KEY_INVALID_REASON, SERVICE_NAME};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Error envelope returned by Gemini on failure
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiError,
}

/// API error detail
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

// ============================================================================
// Backend Implementation
// ============================================================================

/// Google Gemini REST backend
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a backend for the given API base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Map an error status and body to the error taxonomy
    ///
    /// For rate limit (429) errors, returns a user-friendly error that
    /// carries the retry delay from Gemini when it states one.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        // Only a rejected key is rewritten; other 401/403 bodies keep Gemini's message
        if response_text.contains(API_KEY_INVALID_REASON) {
            return AppError::invalid_api_key();
        }

        let (message, api_status) = serde_json::from_str::<GeminiErrorBody>(response_text)
            .map_or_else(
                |_| (response_text.to_owned(), None),
                |body| (body.error.message, body.error.status),
            );

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            _ => AppError::external_service(
                SERVICE_NAME,
                format!(
                    "API error ({status}{}): {message}",
                    api_status.map(|s| format!(" {s}")).unwrap_or_default()
                ),
            ),
        }
    }

    /// Extract a user-friendly quota/rate limit message from a Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Gemini phrases the delay as "Please retry in 6.406453963s."
        const RETRY_PREFIX: &str = "Please retry in ";

        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, api_key, request), fields(model = %model))]
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = self.build_url(model, "generateContent");

        debug!(turns = request.contents.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(SERVICE_NAME, "HTTP request failed").with_source(e)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_unavailable(SERVICE_NAME, "Failed to read response").with_source(e)
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::decode("Failed to parse Gemini response").with_source(e)
            })?;

        debug!(
            finish_reason = gemini_response.finish_reason().unwrap_or("unknown"),
            "Received Gemini response"
        );

        Ok(gemini_response)
    }

    fn start_chat(
        &self,
        api_key: ApiKey,
        model: &str,
        system_instruction: &str,
    ) -> AppResult<Box<dyn ChatSession>> {
        debug!(model, "Opening Gemini chat session");
        Ok(Box::new(GeminiChat {
            client: self.clone(),
            api_key,
            model: model.to_owned(),
            system_instruction: system_instruction.to_owned(),
            history: Vec::new(),
        }))
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Chat Session
// ============================================================================

/// Gemini conversation that replays its history on every turn
pub struct GeminiChat {
    client: GeminiClient,
    api_key: ApiKey,
    model: String,
    system_instruction: String,
    history: Vec<Content>,
}

#[async_trait]
impl ChatSession for GeminiChat {
    #[instrument(skip(self, message), fields(model = %self.model, turns = self.history.len()))]
    async fn send_message(&mut self, message: &str) -> AppResult<Option<String>> {
        let user_turn = Content::user(message);

        let mut request = GenerateContentRequest::default()
            .with_system_instruction(self.system_instruction.as_str());
        request.contents.reserve(self.history.len() + 1);
        request.contents.extend(self.history.iter().cloned());
        request.contents.push(user_turn.clone());

        let response = self
            .client
            .generate_content(&self.api_key, &self.model, &request)
            .await?;
        let reply = response.text();

        // Gemini rejects history entries without text, so empty replies are not recorded
        if let Some(text) = reply.as_deref().filter(|t| !t.is_empty()) {
            self.history.push(user_turn);
            self.history.push(Content::model(text));
        }

        Ok(reply)
    }
}

impl Debug for GeminiChat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiChat")
            .field("model", &self.model)
            .field("turns", &self.history.len())
            .finish_non_exhaustive()
    }
}
