// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names, provider defaults, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini model override
    pub const GEMINI_MODEL: &str = "FITSTUDENT_GEMINI_MODEL";
    /// Gemini base URL override (used by tests and proxies)
    pub const GEMINI_BASE_URL: &str = "FITSTUDENT_GEMINI_BASE_URL";
}

/// Gemini provider defaults
pub mod gemini {
    /// Default model for plan generation and chat
    pub const DEFAULT_MODEL: &str = "gemini-3.1-pro-preview";

    /// Base URL for the Generative Language REST API
    pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Value shipped in sample environment files; treated as "not configured"
    pub const PLACEHOLDER_API_KEY: &str = "MY_GEMINI_API_KEY";

    /// Marker Gemini puts in error details when the key is rejected
    pub const API_KEY_INVALID_REASON: &str = "API_KEY_INVALID";

    /// MIME type that switches Gemini into structured output
    pub const JSON_MIME_TYPE: &str = "application/json";

    /// Display name used in logs and error messages
    pub const SERVICE_NAME: &str = "Gemini";
}

/// Plan shape constants
pub mod plan {
    /// Number of days in a generated plan
    pub const DAYS_PER_PLAN: usize = 7;

    /// Prompt value used when the profile has no cultural background
    pub const NOT_SPECIFIED: &str = "Not specified";

    /// Text shown for a day without a workout
    pub const REST_DAY_MESSAGE: &str = "Rest Day - Focus on recovery and light stretching.";
}

/// Service identity for structured logging
pub mod service_names {
    /// Service name reported in startup logs
    pub const FITSTUDENT_AI: &str = "fitstudent-ai";
}

/// User-facing messages
pub mod messages {
    /// Configuration error for a missing or placeholder key
    pub const MISSING_API_KEY: &str =
        "Gemini API Key is missing. Please set GEMINI_API_KEY in your environment.";

    /// Provider rejected the configured key
    pub const INVALID_API_KEY: &str = "Invalid API Key. Please check your Gemini API key.";

    /// Transcript entry appended when a chat turn fails
    pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

    /// Empty plan payload
    pub const EMPTY_RESPONSE: &str = "Empty response from Gemini";
}
