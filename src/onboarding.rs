// ABOUTME: Four-step onboarding form and the planner state that runs plan generation
// ABOUTME: OnboardingForm collects a Profile; Planner guards submissions with a busy flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Onboarding
//!
//! [`OnboardingForm`] walks the student through basics, activity, diet and
//! resources, then yields a [`Profile`]. [`Planner`] takes that profile,
//! runs the [`PlanClient`], and remembers the outcome for display.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{ActivityLevel, BudgetTier, FullPlan, Gender, Goal, Profile};
use crate::plan::PlanClient;

/// Equipment offered as quick toggles in the resources step
pub const SUGGESTED_EQUIPMENT: &[&str] = &[
    "Full Gym",
    "Dumbbells",
    "Resistance Bands",
    "Pull-up Bar",
    "Bodyweight Only",
    "Yoga Mat",
];

/// Dietary preference preselected in a fresh form
pub const DEFAULT_DIETARY_PREFERENCE: &str = "no-restrictions";

/// Form step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OnboardingStep {
    /// Age, gender, weight, height
    #[default]
    Basics,
    /// Goal and activity level
    Activity,
    /// Dietary preference and cultural background
    Diet,
    /// Budget and equipment
    Resources,
}

impl OnboardingStep {
    /// Steps in order
    pub const ALL: [Self; 4] = [Self::Basics, Self::Activity, Self::Diet, Self::Resources];

    /// One-based position
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::Basics => 1,
            Self::Activity => 2,
            Self::Diet => 3,
            Self::Resources => 4,
        }
    }

    /// Heading shown above the step
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Basics => "The Basics",
            Self::Activity => "Activity & Goals",
            Self::Diet => "Dietary Preferences",
            Self::Resources => "Resources & Budget",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Basics => Self::Activity,
            Self::Activity => Self::Diet,
            Self::Diet | Self::Resources => Self::Resources,
        }
    }

    const fn back(self) -> Self {
        match self {
            Self::Basics | Self::Activity => Self::Basics,
            Self::Diet => Self::Activity,
            Self::Resources => Self::Diet,
        }
    }
}

/// Answers supplied up front, e.g. from command-line flags
///
/// `None` leaves the form's current answer alone. Equipment is added when
/// not already listed; it is never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileOverrides {
    /// Age in years
    pub age: Option<u32>,
    /// Gender
    pub gender: Option<Gender>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Fitness goal
    pub goal: Option<Goal>,
    /// Dietary preference
    pub dietary_preference: Option<String>,
    /// Cultural background; blank clears it
    pub cultural_background: Option<String>,
    /// Budget tier
    pub budget: Option<BudgetTier>,
    /// Equipment to make available
    pub equipment: Vec<String>,
    /// Activity level
    pub activity_level: Option<ActivityLevel>,
}

/// Multi-step profile form
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingForm {
    step: OnboardingStep,
    draft: Profile,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingForm {
    /// Fresh form on the first step with default answers
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Basics,
            draft: Profile {
                age: 20,
                gender: Gender::Other,
                weight: 70.0,
                height: 175.0,
                goal: Goal::Maintenance,
                dietary_preference: DEFAULT_DIETARY_PREFERENCE.to_owned(),
                cultural_background: None,
                budget: BudgetTier::Medium,
                available_equipment: Vec::new(),
                activity_level: ActivityLevel::Moderate,
            },
        }
    }

    /// Form on the first step prefilled with an existing profile
    #[must_use]
    pub const fn prefilled(profile: Profile) -> Self {
        Self {
            step: OnboardingStep::Basics,
            draft: profile,
        }
    }

    /// Current step
    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Current step number, 1 to 4
    #[must_use]
    pub const fn progress(&self) -> usize {
        self.step.number()
    }

    /// Answers so far
    #[must_use]
    pub const fn draft(&self) -> &Profile {
        &self.draft
    }

    /// Move forward; stays put on the last step
    pub fn next(&mut self) {
        self.step = self.step.next();
    }

    /// Move back; stays put on the first step
    pub fn back(&mut self) {
        self.step = self.step.back();
    }

    /// Set age in years
    pub fn set_age(&mut self, age: u32) {
        self.draft.age = age;
    }

    /// Set gender
    pub fn set_gender(&mut self, gender: Gender) {
        self.draft.gender = gender;
    }

    /// Set weight in kilograms
    pub fn set_weight(&mut self, weight: f64) {
        self.draft.weight = weight;
    }

    /// Set height in centimeters
    pub fn set_height(&mut self, height: f64) {
        self.draft.height = height;
    }

    /// Set goal
    pub fn set_goal(&mut self, goal: Goal) {
        self.draft.goal = goal;
    }

    /// Set activity level
    pub fn set_activity_level(&mut self, level: ActivityLevel) {
        self.draft.activity_level = level;
    }

    /// Set dietary preference
    pub fn set_dietary_preference(&mut self, preference: impl Into<String>) {
        self.draft.dietary_preference = preference.into();
    }

    /// Set cultural background; blank clears it
    pub fn set_cultural_background(&mut self, background: impl Into<String>) {
        let background = background.into();
        self.draft.cultural_background = (!background.trim().is_empty()).then_some(background);
    }

    /// Set budget tier
    pub fn set_budget(&mut self, budget: BudgetTier) {
        self.draft.budget = budget;
    }

    /// Add `label` if absent, otherwise remove every occurrence
    pub fn toggle_equipment(&mut self, label: &str) {
        let equipment = &mut self.draft.available_equipment;
        if equipment.iter().any(|e| e == label) {
            equipment.retain(|e| e != label);
        } else {
            equipment.push(label.to_owned());
        }
    }

    /// Advance, or on the last step validate and return the profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the final validation fails; the form stays
    /// on the last step so the answers can be corrected.
    pub fn submit(&mut self) -> AppResult<Option<Profile>> {
        if self.step != OnboardingStep::Resources {
            self.next();
            return Ok(None);
        }
        self.draft.validate()?;
        Ok(Some(self.draft.clone()))
    }

    /// Form prefilled from a saved profile JSON file
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the file cannot be read or is not a profile.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::invalid_input(format!("Cannot read profile file {}: {e}", path.display()))
                .with_source(e)
        })?;
        let profile: Profile = serde_json::from_str(&raw).map_err(|e| {
            AppError::invalid_input(format!("Invalid profile file {}: {e}", path.display()))
                .with_source(e)
        })?;
        Ok(Self::prefilled(profile))
    }

    /// Apply every answer present in `overrides`
    pub fn apply_overrides(&mut self, overrides: ProfileOverrides) {
        if let Some(age) = overrides.age {
            self.set_age(age);
        }
        if let Some(gender) = overrides.gender {
            self.set_gender(gender);
        }
        if let Some(weight) = overrides.weight {
            self.set_weight(weight);
        }
        if let Some(height) = overrides.height {
            self.set_height(height);
        }
        if let Some(goal) = overrides.goal {
            self.set_goal(goal);
        }
        if let Some(level) = overrides.activity_level {
            self.set_activity_level(level);
        }
        if let Some(preference) = overrides.dietary_preference {
            self.set_dietary_preference(preference);
        }
        if let Some(background) = overrides.cultural_background {
            self.set_cultural_background(background);
        }
        if let Some(budget) = overrides.budget {
            self.set_budget(budget);
        }
        for label in &overrides.equipment {
            if !self.draft.available_equipment.contains(label) {
                self.toggle_equipment(label);
            }
        }
    }

    /// Submit through the remaining steps and return the validated profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the final validation fails.
    pub fn complete(&mut self) -> AppResult<Profile> {
        loop {
            if let Some(profile) = self.submit()? {
                return Ok(profile);
            }
        }
    }
}

#[derive(Debug, Default)]
struct PlannerState {
    profile: Option<Profile>,
    plan: Option<FullPlan>,
    error: Option<String>,
}

/// Clears the busy flag when dropped
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Top-level planner: current profile, plan and last error
#[derive(Debug)]
pub struct Planner {
    client: PlanClient,
    busy: AtomicBool,
    state: RwLock<PlannerState>,
}

impl Planner {
    /// Planner with nothing generated yet
    #[must_use]
    pub fn new(client: PlanClient) -> Self {
        Self {
            client,
            busy: AtomicBool::new(false),
            state: RwLock::new(PlannerState::default()),
        }
    }

    /// Whether a plan request is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Generate a plan for `profile` and remember the outcome
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` without calling the backend when another
    /// submission is in flight, otherwise any error from
    /// [`PlanClient::generate`]. On failure the previous plan is kept and the
    /// error message is stored.
    #[instrument(skip_all, fields(goal = %profile.goal))]
    pub async fn submit(&self, profile: Profile) -> AppResult<FullPlan> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Plan submission rejected: generation already in progress");
            return Err(AppError::new(
                ErrorCode::ResourceLocked,
                "A plan is already being generated",
            ));
        }
        let _guard = BusyGuard(&self.busy);

        match self.client.generate(&profile).await {
            Ok(plan) => {
                let mut state = self.state.write().await;
                state.profile = Some(profile);
                state.plan = Some(plan.clone());
                state.error = None;
                info!("Plan stored");
                Ok(plan)
            }
            Err(e) => {
                self.state.write().await.error = Some(e.message.clone());
                Err(e)
            }
        }
    }

    /// Profile behind the current plan
    pub async fn profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    /// Current plan
    pub async fn plan(&self) -> Option<FullPlan> {
        self.state.read().await.plan.clone()
    }

    /// Message of the last failed submission, cleared by a success
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Forget profile, plan and error
    pub async fn reset(&self) {
        *self.state.write().await = PlannerState::default();
    }
}
