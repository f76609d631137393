// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: `fitstudent plan` - builds a profile from a file and flags, then prints the generated plan
// ABOUTME: Output is every day as text, a single selected day, or the plan JSON

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use fitstudent_ai::config::GeminiConfig;
use fitstudent_ai::formatters::{format_plan, OutputFormat, PlanView};
use fitstudent_ai::llm::GenerativeBackend;
use fitstudent_ai::logging::AppLogger;
use fitstudent_ai::models::Profile;
use fitstudent_ai::onboarding::{OnboardingForm, Planner, ProfileOverrides};
use fitstudent_ai::plan::PlanClient;
use tracing::info;

use crate::PlanArgs;

/// Generate and print a plan
pub async fn run(
    config: GeminiConfig,
    backend: Arc<dyn GenerativeBackend>,
    args: PlanArgs,
) -> Result<()> {
    let profile = build_profile(&args)?;
    info!(goal = %profile.goal, budget = %profile.budget, "Generating plan");

    let planner = Planner::new(PlanClient::new(config, backend));
    let started = Instant::now();
    let outcome = planner.submit(profile.clone()).await;
    AppLogger::log_plan_request(profile.goal.as_str(), outcome.is_ok(), started.elapsed());
    let plan = outcome?;

    if args.json {
        println!("{}", format_plan(&plan, OutputFormat::Json)?);
        return Ok(());
    }

    match args.day {
        Some(index) => {
            let mut view = PlanView::new(plan);
            view.select_day(index)?;
            println!("{}", view.render_day());
        }
        None => println!("{}", format_plan(&plan, OutputFormat::Text)?),
    }
    Ok(())
}

/// Run the onboarding form over the profile file (or defaults) and flag overrides
fn build_profile(args: &PlanArgs) -> Result<Profile> {
    let mut form = match &args.profile {
        Some(path) => OnboardingForm::load(path)?,
        None => OnboardingForm::new(),
    };

    form.apply_overrides(ProfileOverrides {
        age: args.age,
        gender: args.gender,
        weight: args.weight,
        height: args.height,
        goal: args.goal,
        dietary_preference: args.diet.clone(),
        cultural_background: args.culture.clone(),
        budget: args.budget,
        equipment: args.equipment.clone(),
        activity_level: args.activity,
    });

    Ok(form.complete()?)
}
