// ABOUTME: Unified error handling for the FitStudent AI planner
// ABOUTME: Defines ErrorCode, AppError and the AppResult alias shared by every crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The error
//! carries an [`ErrorCode`] so callers can tell the four failure classes of a
//! generation call apart without matching on message text:
//!
//! - **Configuration** (`ConfigMissing`): no usable credential, raised before
//!   any request is sent
//! - **Invalid credential** (`ExternalAuthFailed`): the provider rejected the key
//! - **Decode** (`ExternalInvalidResponse`): the provider answered with an empty
//!   or malformed plan
//! - **Transport/provider** (`ExternalServiceUnavailable`, `ExternalRateLimited`,
//!   `ExternalServiceError`): propagated unchanged

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::messages;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid value
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// The resource is busy with another operation
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,

    // External Services (5000-5999)
    /// The provider returned an error response
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The provider could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// The provider rejected the configured credential
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// The provider throttled the request
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,
    /// The provider answered with a payload that could not be decoded
    #[serde(rename = "EXTERNAL_INVALID_RESPONSE")]
    ExternalInvalidResponse = 5004,

    // Configuration (6000-6999)
    /// Required configuration is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceLocked => "The resource is currently busy",
            Self::ExternalServiceError => "The AI service encountered an error",
            Self::ExternalServiceUnavailable => "The AI service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with the AI service failed",
            Self::ExternalRateLimited => "AI service rate limit exceeded",
            Self::ExternalInvalidResponse => "The AI service returned an unusable response",
            Self::ConfigMissing => "Required configuration is missing",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code belongs to the external-service range (5000-5999)
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalAuthFailed
                | Self::ExternalRateLimited
                | Self::ExternalInvalidResponse
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Missing or placeholder credential
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self::new(ErrorCode::ConfigMissing, messages::MISSING_API_KEY)
    }

    /// Provider rejected the credential
    #[must_use]
    pub fn invalid_api_key() -> Self {
        Self::new(ErrorCode::ExternalAuthFailed, messages::INVALID_API_KEY)
    }

    /// Provider payload could not be turned into the expected value
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalInvalidResponse, message)
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Display, message: impl Display) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {message}"),
        )
    }

    /// External service could not be reached
    #[must_use]
    pub fn external_unavailable(service: impl Display, message: impl Display) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{service}: {message}"),
        )
    }

    /// True for a missing or placeholder credential
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        self.code == ErrorCode::ConfigMissing
    }

    /// True when the provider rejected the credential
    #[must_use]
    pub fn is_invalid_credential(&self) -> bool {
        self.code == ErrorCode::ExternalAuthFailed
    }

    /// True when the provider response could not be decoded
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        self.code == ErrorCode::ExternalInvalidResponse
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::decode("Empty response from Gemini");
        assert_eq!(
            error.to_string(),
            "The AI service returned an unusable response: Empty response from Gemini"
        );
    }

    #[test]
    fn test_taxonomy_predicates() {
        assert!(AppError::missing_api_key().is_config_error());
        assert!(AppError::invalid_api_key().is_invalid_credential());
        assert!(AppError::decode("bad").is_decode_error());

        let transport = AppError::external_unavailable("Gemini", "connection refused");
        assert!(!transport.is_config_error());
        assert!(!transport.is_invalid_credential());
        assert!(!transport.is_decode_error());
        assert!(transport.code.is_external());
    }

    #[test]
    fn test_source_is_chained() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::decode("malformed plan").with_source(parse_error);
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ExternalInvalidResponse).unwrap();
        assert_eq!(json, "\"EXTERNAL_INVALID_RESPONSE\"");
    }
}
