// ABOUTME: Core data models exchanged between the onboarding flow, AI clients, and display
// ABOUTME: Re-exports the profile and plan models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Student fitness profile
pub mod profile;

/// Seven-day workout and meal plan
pub mod plan;

pub use plan::{DayMeals, DayPlan, Exercise, FullPlan, Macros, Meal, MealSlot, Workout};
pub use profile::{ActivityLevel, BudgetTier, Gender, Goal, Profile};
