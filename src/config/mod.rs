// ABOUTME: Configuration management module for provider settings
// ABOUTME: Environment-only configuration loaded once at the CLI entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Configuration is read from environment variables by the binary and passed
//! explicitly into every client. Library code never consults the environment
//! on its own.
//!
//! - **Gemini**: API key, model, and endpoint for the plan and chat clients
//! - **Logging**: see [`crate::logging::LoggingConfig`]

/// Gemini credential, model, and endpoint configuration
pub mod gemini;

pub use gemini::{ApiKey, GeminiConfig};
