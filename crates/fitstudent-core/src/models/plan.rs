// ABOUTME: Seven-day workout and meal plan returned by the AI plan client
// ABOUTME: FullPlan, DayPlan, Meal, Workout, Exercise definitions plus macro totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::constants::plan::DAYS_PER_PLAN;
use crate::errors::AppError;

/// Macro-nutrient counts for a meal or a whole day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fats: f64,
}

impl Add for Macros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

/// A single meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Dish name
    pub name: String,
    /// Ingredients in presentation order
    pub ingredients: Vec<String>,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fats: f64,
    /// Preparation instructions
    pub instructions: String,
    /// Budget tip for this meal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_note: Option<String>,
}

impl Meal {
    /// Macro counts of this meal
    #[must_use]
    pub const fn macros(&self) -> Macros {
        Macros {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealSlot {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Optional snack
    Snack,
}

impl MealSlot {
    /// Capitalized label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

impl Display for MealSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Meals of one day; the snack is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    /// Breakfast
    pub breakfast: Meal,
    /// Lunch
    pub lunch: Meal,
    /// Dinner
    pub dinner: Meal,
    /// Snack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snack: Option<Meal>,
}

/// One exercise within a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Reps as free text ("12", "to failure")
    pub reps: String,
    /// Duration as free text ("30s")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Coaching notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A day's workout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Session name
    pub name: String,
    /// Exercises in order (may be empty)
    pub exercises: Vec<Exercise>,
    /// Session length in minutes
    pub duration_minutes: u32,
    /// Focus area ("Upper body", "Cardio")
    pub focus_area: String,
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day label ("Monday")
    pub day: String,
    /// Meals
    pub meals: DayMeals,
    /// Workout; `None` marks a rest day
    #[serde(default)]
    pub workout: Option<Workout>,
}

impl DayPlan {
    /// True when the day has no workout
    #[must_use]
    pub const fn is_rest_day(&self) -> bool {
        self.workout.is_none()
    }

    /// Meals in breakfast, lunch, dinner, snack order, skipping an absent snack
    pub fn meals_in_order(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        [
            (MealSlot::Breakfast, Some(&self.meals.breakfast)),
            (MealSlot::Lunch, Some(&self.meals.lunch)),
            (MealSlot::Dinner, Some(&self.meals.dinner)),
            (MealSlot::Snack, self.meals.snack.as_ref()),
        ]
        .into_iter()
        .filter_map(|(slot, meal)| meal.map(|m| (slot, m)))
    }

    /// Sum of macros across the day's meals
    #[must_use]
    pub fn daily_totals(&self) -> Macros {
        self.meals_in_order()
            .map(|(_, meal)| meal.macros())
            .fold(Macros::default(), Add::add)
    }
}

/// Complete seven-day plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPlan {
    /// Days in order
    pub weekly_plan: Vec<DayPlan>,
    /// Free-text advice for the whole week
    pub general_advice: String,
}

impl FullPlan {
    /// Check the invariants the response schema cannot enforce
    ///
    /// The provider is asked for seven days but nothing forces it to comply,
    /// and JSON numbers may be negative even where the schema says calories.
    ///
    /// # Errors
    ///
    /// Returns a decode error when the day count is not seven or any macro
    /// value is negative or non-finite.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.weekly_plan.len() != DAYS_PER_PLAN {
            return Err(AppError::decode(format!(
                "Expected a {DAYS_PER_PLAN}-day plan but received {} days",
                self.weekly_plan.len()
            )));
        }

        for day in &self.weekly_plan {
            for (slot, meal) in day.meals_in_order() {
                let Macros {
                    calories,
                    protein,
                    carbs,
                    fats,
                } = meal.macros();
                let valid = [calories, protein, carbs, fats]
                    .iter()
                    .all(|v| v.is_finite() && *v >= 0.0);
                if !valid {
                    return Err(AppError::decode(format!(
                        "{} {slot} has invalid macro values",
                        day.day
                    )));
                }
            }
        }

        Ok(())
    }
}
