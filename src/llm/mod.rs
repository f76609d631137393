// ABOUTME: Generative backend abstraction for plan generation and chat
// ABOUTME: Wire types for generateContent plus the GenerativeBackend and ChatSession traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generative Backend Interface
//!
//! This module defines the contract between the AI clients
//! ([`PlanClient`](crate::plan::PlanClient),
//! [`FitnessChat`](crate::chat::FitnessChat)) and the model provider.
//!
//! ## Key Concepts
//!
//! - **`GenerativeBackend`**: async trait issuing one `generateContent` call and
//!   opening chat sessions. [`GeminiClient`] is the production implementation;
//!   tests substitute call-counting stubs.
//! - **`ChatSession`**: opaque conversational handle. Whatever history a
//!   session needs stays inside it.
//! - **`GenerateContentRequest`**: prompt contents, optional system
//!   instruction, and generation config (including the structured-output schema)
//!
//! ## Example: Generating Content
//!
//! ```rust,no_run
//! use fitstudent_ai::config::GeminiConfig;
//! use fitstudent_ai::llm::{GeminiClient, GenerateContentRequest, GenerativeBackend};
//!
//! async fn example() -> fitstudent_ai::errors::AppResult<()> {
//!     let config = GeminiConfig::from_env();
//!     let api_key = config.require_api_key()?;
//!     let client = GeminiClient::new(&config.base_url);
//!
//!     let request = GenerateContentRequest::from_prompt("Suggest a cheap high-protein breakfast");
//!     let response = client.generate_content(&api_key, &config.model, &request).await?;
//!     println!("{}", response.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

mod gemini;
pub mod prompts;
pub mod schema;

pub use gemini::{GeminiChat, GeminiClient};
pub use schema::{full_plan_schema, Schema, SchemaType};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ApiKey;
use crate::constants::gemini::JSON_MIME_TYPE;
use crate::errors::AppResult;

// ============================================================================
// Content Types
// ============================================================================

/// Author of a content turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    /// End user
    User,
    /// Model reply
    Model,
}

/// One text fragment of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning fragments, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// Plain text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }
}

/// A turn in a conversation, or a system instruction when `role` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Author of the turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,
    /// Fragments of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// User turn with a single text part
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(ContentRole::User),
            parts: vec![Part::text(text)],
        }
    }

    /// Model turn with a single text part
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some(ContentRole::Model),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less content used as a system instruction
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenated answer text, skipping reasoning fragments
    ///
    /// Returns `None` when no part carries text.
    #[must_use]
    pub fn joined_text(&self) -> Option<String> {
        let mut texts = self
            .parts
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .peekable();

        texts.peek()?;
        Some(texts.collect())
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Generation settings, including structured output
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Response MIME type; `application/json` enables structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Shape the structured response must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<&'static Schema>,
}

impl GenerationConfig {
    /// Structured JSON output constrained by `schema`
    #[must_use]
    pub fn structured(schema: &'static Schema) -> Self {
        Self {
            response_mime_type: Some(JSON_MIME_TYPE.to_owned()),
            response_schema: Some(schema),
            ..Self::default()
        }
    }
}

/// Body of a `generateContent` call
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns, oldest first
    pub contents: Vec<Content>,
    /// Persona and rules for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Generation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request with a user prompt
    #[must_use]
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            ..Self::default()
        }
    }

    /// Attach a system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::system(instruction));
        self
    }

    /// Attach generation settings
    #[must_use]
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// A response candidate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    pub content: Option<Content>,
    /// Why generation stopped (STOP, MAX_TOKENS, SAFETY, ...)
    pub finish_reason: Option<String>,
}

/// Token accounting returned with a response
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt
    pub prompt_token_count: Option<u32>,
    /// Tokens across candidates
    pub candidates_token_count: Option<u32>,
    /// Total tokens
    pub total_token_count: Option<u32>,
}

/// Body of a successful `generateContent` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidates; only the first is used
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token accounting
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Response whose first candidate is a model turn with `text`
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content::model(text)),
                finish_reason: Some("STOP".to_owned()),
            }],
            usage_metadata: None,
        }
    }

    /// Answer text of the first candidate, if any
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.first_content().and_then(Content::joined_text)
    }

    /// Content of the first candidate
    #[must_use]
    pub fn first_content(&self) -> Option<&Content> {
        self.candidates.first().and_then(|c| c.content.as_ref())
    }

    /// Finish reason of the first candidate
    #[must_use]
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

// ============================================================================
// Backend Traits
// ============================================================================

/// Connection to a generative model provider
///
/// Implementations perform exactly one provider call per `generate_content`
/// and never retry. Credential checks happen in the calling client, so a
/// backend always receives a validated [`ApiKey`].
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Provider identifier for logs
    fn name(&self) -> &'static str;

    /// Issue a single `generateContent` call
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse>;

    /// Open a conversational session seeded with `system_instruction`
    fn start_chat(
        &self,
        api_key: ApiKey,
        model: &str,
        system_instruction: &str,
    ) -> AppResult<Box<dyn ChatSession>>;
}

/// Stateful conversation with a provider
///
/// `send_message` takes `&mut self`, so one session cannot run two sends at
/// once and the provider sees turns in the order they were sent.
#[async_trait]
pub trait ChatSession: Send {
    /// Send one user message and return the reply text, if any
    async fn send_message(&mut self, message: &str) -> AppResult<Option<String>>;
}
