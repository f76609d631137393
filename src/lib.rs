// ABOUTME: Main library entry point for the FitStudent AI planner
// ABOUTME: Profile onboarding, Gemini-backed plan generation, plan display and fitness chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # FitStudent AI
//!
//! Personalized 7-day workout and meal plans for students, generated by
//! Google Gemini, plus a fitness and nutrition chat coach.
//!
//! ## Architecture
//!
//! - **Models** (from `fitstudent-core`): profile and plan data
//! - **LLM**: the [`GenerativeBackend`](llm::GenerativeBackend) seam, Gemini
//!   wire types, the structured-output schema and prompts
//! - **Plan**: [`PlanClient`](plan::PlanClient) turns a profile into a validated plan
//! - **Chat**: [`FitnessChat`](chat::FitnessChat) and the
//!   [`Conversation`](chat::Conversation) transcript
//! - **Onboarding**: the four-step profile form and the planner state
//! - **Formatters**: text and JSON rendering of a plan
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitstudent_ai::config::GeminiConfig;
//! use fitstudent_ai::errors::AppResult;
//! use fitstudent_ai::formatters::PlanView;
//! use fitstudent_ai::llm::GeminiClient;
//! use fitstudent_ai::onboarding::OnboardingForm;
//! use fitstudent_ai::plan::PlanClient;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = GeminiConfig::from_env();
//!     let backend = Arc::new(GeminiClient::new(&config.base_url));
//!     let client = PlanClient::new(config, backend);
//!
//!     let mut form = OnboardingForm::new();
//!     form.toggle_equipment("Dumbbells");
//!     let profile = loop {
//!         if let Some(profile) = form.submit()? {
//!             break profile;
//!         }
//!     };
//!
//!     let plan = client.generate(&profile).await?;
//!     println!("{}", PlanView::new(plan).render_day());
//!     Ok(())
//! }
//! ```

pub use fitstudent_core::{constants, errors, models};

/// Chat client and conversation transcript
pub mod chat;

/// Environment-based configuration
pub mod config;

/// Plan rendering
pub mod formatters;

/// Generative backend abstraction and Gemini implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Onboarding form and planner state
pub mod onboarding;

/// Plan generation client
pub mod plan;
