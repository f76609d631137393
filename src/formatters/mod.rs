// ABOUTME: Plain-text and JSON rendering of a weekly plan with a selected day
// ABOUTME: PlanView backs the plan display; OutputFormat picks text or raw JSON for the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan Display
//!
//! [`PlanView`] wraps a [`FullPlan`] with the currently selected day and
//! renders days and advice as plain text. [`format_plan`] serializes a whole
//! plan in the requested [`OutputFormat`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fitstudent_ai::formatters::PlanView;
//!
//! let mut view = PlanView::new(plan);
//! view.select_day(2)?;
//! println!("{}", view.render_day());
//! ```

use std::fmt::{self, Write};

use crate::constants::plan::REST_DAY_MESSAGE;
use crate::errors::{AppError, AppResult};
use crate::models::{DayPlan, FullPlan, Macros, Meal, MealSlot, Workout};

/// Output format selector for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Plan JSON in the wire format
    Json,
}

impl OutputFormat {
    /// Format name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a whole plan in `format`
///
/// Text output lists every day followed by the general advice.
///
/// # Errors
///
/// Returns `SerializationError` if JSON serialization fails.
pub fn format_plan(plan: &FullPlan, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for day in &plan.weekly_plan {
                out.push_str(&render_day_plan(day));
                out.push('\n');
            }
            out.push_str(&render_advice_text(&plan.general_advice));
            Ok(out)
        }
    }
}

/// A plan plus the day being looked at
#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    plan: FullPlan,
    selected: usize,
}

impl PlanView {
    /// View with the first day selected
    #[must_use]
    pub const fn new(plan: FullPlan) -> Self {
        Self { plan, selected: 0 }
    }

    /// Wrapped plan
    #[must_use]
    pub const fn plan(&self) -> &FullPlan {
        &self.plan
    }

    /// Index of the selected day
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Select a day by index
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `index` is past the last day; the selection
    /// is left unchanged.
    pub fn select_day(&mut self, index: usize) -> AppResult<()> {
        let days = self.plan.weekly_plan.len();
        if index >= days {
            return Err(AppError::invalid_input(format!(
                "Day index {index} is out of range; the plan has {days} days"
            )));
        }
        self.selected = index;
        Ok(())
    }

    /// Day labels for the tab strip
    #[must_use]
    pub fn day_labels(&self) -> Vec<&str> {
        self.plan.weekly_plan.iter().map(|d| d.day.as_str()).collect()
    }

    /// Selected day, if the plan has any days
    #[must_use]
    pub fn current_day(&self) -> Option<&DayPlan> {
        self.plan.weekly_plan.get(self.selected)
    }

    /// Selected day as text, ending with its macro totals
    #[must_use]
    pub fn render_day(&self) -> String {
        self.current_day().map(render_day_plan).unwrap_or_default()
    }

    /// General advice as text
    #[must_use]
    pub fn render_advice(&self) -> String {
        render_advice_text(&self.plan.general_advice)
    }
}

fn render_day_plan(day: &DayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", day.day);
    out.push('\n');

    match &day.workout {
        Some(workout) => render_workout(&mut out, workout),
        None => {
            let _ = writeln!(out, "{REST_DAY_MESSAGE}");
        }
    }

    for (slot, meal) in day.meals_in_order() {
        out.push('\n');
        render_meal(&mut out, slot, meal);
    }

    out.push('\n');
    let _ = writeln!(out, "Daily Totals: {}", macro_line(&day.daily_totals()));
    out
}

fn render_workout(out: &mut String, workout: &Workout) {
    let _ = writeln!(
        out,
        "Workout: {} ({} min, focus: {})",
        workout.name, workout.duration_minutes, workout.focus_area
    );
    for exercise in &workout.exercises {
        let _ = write!(
            out,
            "  - {}: {} x {}",
            exercise.name, exercise.sets, exercise.reps
        );
        if let Some(duration) = &exercise.duration {
            let _ = write!(out, " ({duration})");
        }
        if let Some(notes) = &exercise.notes {
            let _ = write!(out, " - {notes}");
        }
        out.push('\n');
    }
}

fn render_meal(out: &mut String, slot: MealSlot, meal: &Meal) {
    let _ = writeln!(out, "{slot}: {}", meal.name);
    let _ = writeln!(out, "  {}", macro_line(&meal.macros()));
    let _ = writeln!(out, "  Ingredients:");
    for ingredient in &meal.ingredients {
        let _ = writeln!(out, "    • {ingredient}");
    }
    let _ = writeln!(out, "  Instructions: {}", meal.instructions);
    if let Some(note) = &meal.budget_note {
        let _ = writeln!(out, "  Budget Tip: {note}");
    }
}

fn macro_line(macros: &Macros) -> String {
    format!(
        "{:.0} kcal | Protein {:.0}g | Carbs {:.0}g | Fats {:.0}g",
        macros.calories, macros.protein, macros.carbs, macros.fats
    )
}

fn render_advice_text(advice: &str) -> String {
    format!("General Advice\n{advice}\n")
}
