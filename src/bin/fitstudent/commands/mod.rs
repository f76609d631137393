// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Subcommand implementations for the fitstudent CLI
// ABOUTME: Plan generation and fitness chat

pub mod chat;
pub mod plan;
