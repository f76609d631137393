// ABOUTME: Core types and constants for the FitStudent AI planner
// ABOUTME: Foundation crate with error handling, data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitStudent Core
//!
//! Foundation crate providing shared types and constants for the FitStudent AI
//! planner. It has no network or runtime dependencies, so the models can be
//! reused by any front-end.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Environment variable names, provider defaults, messages
//! - **models**: `Profile` and `FullPlan` with their nested types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Profile and plan data models
pub mod models;
