// ABOUTME: Student fitness profile collected by the onboarding flow
// ABOUTME: Profile plus the Gender, Goal, BudgetTier, and ActivityLevel enumerations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Implements `Display`/`FromStr` over the kebab-case wire token of a unit enum
macro_rules! kebab_token_enum {
    ($name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire token for this variant
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($token => Ok(Self::$variant),)+
                    other => Err(AppError::invalid_input(format!(
                        "Unknown {} '{other}'. Expected one of: {}",
                        stringify!($name),
                        [$($token),+].join(", ")
                    ))),
                }
            }
        }
    };
}

/// Gender as offered by the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or undisclosed
    #[default]
    Other,
}

kebab_token_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

/// Primary fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    /// Lose body fat
    WeightLoss,
    /// Build muscle
    MuscleGain,
    /// Keep current body composition
    #[default]
    Maintenance,
    /// Improve aerobic capacity
    Endurance,
}

kebab_token_enum!(Goal {
    WeightLoss => "weight-loss",
    MuscleGain => "muscle-gain",
    Maintenance => "maintenance",
    Endurance => "endurance",
});

/// Food budget tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    /// Tight student budget
    Low,
    /// Moderate budget
    #[default]
    Medium,
    /// Comfortable budget
    High,
}

kebab_token_enum!(BudgetTier {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Weekly activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Office job, little exercise
    Sedentary,
    /// 1-2 days/week
    Light,
    /// 3-5 days/week
    #[default]
    Moderate,
    /// 6-7 days/week
    Active,
    /// Athlete level
    VeryActive,
}

kebab_token_enum!(ActivityLevel {
    Sedentary => "sedentary",
    Light => "light",
    Moderate => "moderate",
    Active => "active",
    VeryActive => "very-active",
});

/// A student's fitness profile
///
/// Produced once by the onboarding flow and never mutated afterwards. Every
/// field is interpolated into the plan prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Body weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Primary goal
    pub goal: Goal,
    /// Dietary preference (vegetarian, vegan, halal, no-restrictions, ...)
    pub dietary_preference: String,
    /// Cultural food background, if the student shared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_background: Option<String>,
    /// Budget tier
    pub budget: BudgetTier,
    /// Equipment the student has access to
    #[serde(default)]
    pub available_equipment: Vec<String>,
    /// Activity level
    pub activity_level: ActivityLevel,
}

impl Profile {
    /// Cultural background as entered, or `None` when absent or blank
    #[must_use]
    pub fn cultural_background(&self) -> Option<&str> {
        self.cultural_background
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Check the numeric fields the form cannot express as types
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when age, weight or height is not positive.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.age == 0 {
            return Err(AppError::invalid_input("Age must be a positive number"));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(AppError::invalid_input(
                "Weight must be a positive number of kilograms",
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(AppError::invalid_input(
                "Height must be a positive number of centimeters",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            age: 20,
            gender: Gender::Other,
            weight: 70.0,
            height: 175.0,
            goal: Goal::Maintenance,
            dietary_preference: "no-restrictions".to_owned(),
            cultural_background: None,
            budget: BudgetTier::Medium,
            available_equipment: vec!["Dumbbells".to_owned()],
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn test_profile_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_profile()).unwrap();
        assert_eq!(json["dietaryPreference"], "no-restrictions");
        assert_eq!(json["availableEquipment"][0], "Dumbbells");
        assert_eq!(json["activityLevel"], "moderate");
        assert!(json.get("culturalBackground").is_none());
    }

    #[test]
    fn test_enum_tokens_round_trip_through_from_str() {
        for goal in Goal::ALL {
            assert_eq!(goal.as_str().parse::<Goal>().unwrap(), *goal);
        }
        assert_eq!(
            "Very-Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            serde_json::to_string(&Goal::WeightLoss).unwrap(),
            "\"weight-loss\""
        );
    }

    #[test]
    fn test_unknown_token_is_invalid_input() {
        let err = "huge".parse::<BudgetTier>().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidInput);
        assert!(err.message.contains("low, medium, high"));
    }

    #[test]
    fn test_blank_cultural_background_is_absent() {
        let mut profile = sample_profile();
        profile.cultural_background = Some("   ".to_owned());
        assert_eq!(profile.cultural_background(), None);

        profile.cultural_background = Some(" West African ".to_owned());
        assert_eq!(profile.cultural_background(), Some(" West African "));
    }

    #[test]
    fn test_validate_rejects_non_positive_measurements() {
        assert!(sample_profile().validate().is_ok());

        let mut zero_age = sample_profile();
        zero_age.age = 0;
        assert!(zero_age.validate().is_err());

        let mut negative_weight = sample_profile();
        negative_weight.weight = -1.0;
        assert!(negative_weight.validate().is_err());

        let mut nan_height = sample_profile();
        nan_height.height = f64::NAN;
        assert!(nan_height.validate().is_err());
    }
}
