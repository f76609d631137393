// ABOUTME: Prompts for plan generation and the fitness chat persona
// ABOUTME: Plan prompt interpolates every profile field; chat persona is loaded at compile time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The chat persona lives in a markdown file so it can be edited without
//! touching code. The plan prompt is assembled from the profile at request time.

use std::fmt::Write;

use crate::constants::plan::{DAYS_PER_PLAN, NOT_SPECIFIED};
use crate::models::Profile;

/// System instruction for the fitness and nutrition chat advisor
pub const FITNESS_COACH_INSTRUCTION: &str = include_str!("fitness_coach.md");

/// Build the plan-generation prompt for `profile`
///
/// Every profile field appears verbatim. An absent or blank cultural
/// background is written as `Not specified`.
#[must_use]
pub fn build_plan_prompt(profile: &Profile) -> String {
    let mut prompt = format!(
        "Generate a highly personalized {DAYS_PER_PLAN}-day workout and meal plan for a student with the following profile:\n"
    );

    // Writing to a String cannot fail
    let _ = writeln!(prompt, "- Age: {}", profile.age);
    let _ = writeln!(prompt, "- Gender: {}", profile.gender);
    let _ = writeln!(
        prompt,
        "- Weight: {}kg, Height: {}cm",
        profile.weight, profile.height
    );
    let _ = writeln!(prompt, "- Goal: {}", profile.goal);
    let _ = writeln!(prompt, "- Dietary Preference: {}", profile.dietary_preference);
    let _ = writeln!(
        prompt,
        "- Cultural Background: {}",
        profile.cultural_background().unwrap_or(NOT_SPECIFIED)
    );
    let _ = writeln!(
        prompt,
        "- Budget: {} (Focus on cheap, accessible ingredients for students)",
        profile.budget
    );
    let _ = writeln!(
        prompt,
        "- Available Equipment: {}",
        profile.available_equipment.join(", ")
    );
    let _ = writeln!(prompt, "- Activity Level: {}", profile.activity_level);

    prompt.push_str(
        "\nThe plan must be practical for a student living in a dorm or shared apartment.\n\
         Consider cultural food habits and budget-friendly options (e.g., bulk buying, simple prep).\n\
         Leave out the workout on rest days.\n\n\
         Return the response in JSON format.\n",
    );

    prompt
}
