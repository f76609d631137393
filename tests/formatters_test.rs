// ABOUTME: Integration tests for plan rendering and day selection
// ABOUTME: Exercises PlanView text output, rest days, macro totals and JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{fixture_plan_json, FIXTURE_ADVICE};
use fitstudent_ai::errors::ErrorCode;
use fitstudent_ai::formatters::{format_plan, OutputFormat, PlanView};
use fitstudent_ai::models::FullPlan;

fn view() -> PlanView {
    let plan: FullPlan = serde_json::from_str(&fixture_plan_json(7)).unwrap();
    PlanView::new(plan)
}

#[test]
fn test_first_day_selected_by_default() {
    let view = view();
    assert_eq!(view.selected(), 0);
    assert_eq!(view.current_day().unwrap().day, "Monday");
    assert_eq!(
        view.day_labels(),
        vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
    );
}

#[test]
fn test_select_day_out_of_range_is_rejected() {
    let mut view = view();
    view.select_day(4).unwrap();

    let err = view.select_day(7).unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(view.selected(), 4);
    assert_eq!(view.current_day().unwrap().day, "Friday");
}

#[test]
fn test_workout_day_rendering() {
    let text = view().render_day();

    assert!(text.starts_with("=== Monday ==="));
    assert!(text.contains("Workout: Dorm Strength (30 min, focus: Full body)"));
    assert!(text.contains("  - Push-ups: 3 x 12\n"));
    assert!(text.contains("  - Plank: 3 x 1 (45s) - Keep hips level\n"));
    assert!(!text.contains("Rest Day"));
}

#[test]
fn test_meal_rendering() {
    let text = view().render_day();

    assert!(text.contains("Breakfast: Egg fried rice\n  450 kcal | Protein 25g | Carbs 60g | Fats 12g"));
    assert!(text.contains("    • Rice\n    • Eggs\n    • Spinach\n"));
    assert!(text.contains("  Instructions: Cook everything in one pan."));
    assert!(text.contains("  Budget Tip: Buy rice in bulk."));
    assert!(!text.contains("Snack:"));
}

#[test]
fn test_day_ends_with_macro_totals() {
    let mut view = view();
    assert!(view
        .render_day()
        .trim_end()
        .ends_with("Daily Totals: 1750 kcal | Protein 75g | Carbs 180g | Fats 36g"));

    // Sunday adds a snack
    view.select_day(6).unwrap();
    assert!(view
        .render_day()
        .trim_end()
        .ends_with("Daily Totals: 1850 kcal | Protein 100g | Carbs 240g | Fats 48g"));
}

#[test]
fn test_rest_days_render_recovery_message() {
    let mut view = view();
    for index in [2, 6] {
        view.select_day(index).unwrap();
        let text = view.render_day();
        assert!(text.contains("Rest Day - Focus on recovery and light stretching."));
        assert!(!text.contains("Workout:"));
    }
}

#[test]
fn test_advice_rendering() {
    let advice = view().render_advice();
    assert!(advice.starts_with("General Advice\n"));
    assert!(advice.contains(FIXTURE_ADVICE));
}

#[test]
fn test_format_plan_outputs() {
    let view = view();

    let text = format_plan(view.plan(), OutputFormat::Text).unwrap();
    assert_eq!(text.matches("Daily Totals:").count(), 7);
    assert!(text.trim_end().ends_with(FIXTURE_ADVICE));

    let json = format_plan(view.plan(), OutputFormat::Json).unwrap();
    let reparsed: FullPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(&reparsed, view.plan());
}
