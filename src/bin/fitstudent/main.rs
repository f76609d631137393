// ABOUTME: FitStudent CLI - generate a weekly student plan or chat with the fitness coach
// ABOUTME: Loads configuration from the environment and drives the planner and chat widget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Generate a plan from flags (unset fields use the onboarding defaults)
//! fitstudent plan --age 21 --goal muscle-gain --budget low --equipment Dumbbells
//!
//! # Generate from a saved profile and show only Wednesday
//! fitstudent plan --profile profile.json --day 2
//!
//! # Raw plan JSON
//! fitstudent plan --profile profile.json --json
//!
//! # Interactive chat (exit, quit or Ctrl-D to leave)
//! fitstudent chat
//!
//! # One question
//! fitstudent chat --message "Cheap high-protein snacks?"
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use fitstudent_ai::config::GeminiConfig;
use fitstudent_ai::llm::{GeminiClient, GenerativeBackend};
use fitstudent_ai::logging::LoggingConfig;
use fitstudent_ai::models::{ActivityLevel, BudgetTier, Gender, Goal};

#[derive(Parser)]
#[command(
    name = "fitstudent",
    version,
    about = "AI workout and meal planner for students",
    long_about = "Generates a personalized 7-day workout and meal plan with Google Gemini and answers follow-up fitness and nutrition questions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a 7-day plan
    Plan(PlanArgs),

    /// Chat with the fitness coach
    Chat {
        /// Send one message and exit instead of starting a session
        #[arg(long, short = 'm')]
        message: Option<String>,
    },
}

/// Profile inputs and output options for `plan`
#[derive(Args)]
struct PlanArgs {
    /// Profile JSON file; flags override its fields
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// male, female or other
    #[arg(long)]
    gender: Option<Gender>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<f64>,

    /// weight-loss, muscle-gain, maintenance or endurance
    #[arg(long)]
    goal: Option<Goal>,

    /// Dietary preference (vegetarian, vegan, halal, no-restrictions, ...)
    #[arg(long)]
    diet: Option<String>,

    /// Cultural food background
    #[arg(long)]
    culture: Option<String>,

    /// low, medium or high
    #[arg(long)]
    budget: Option<BudgetTier>,

    /// Available equipment; repeat for several items
    #[arg(long = "equipment")]
    equipment: Vec<String>,

    /// sedentary, light, moderate, active or very-active
    #[arg(long)]
    activity: Option<ActivityLevel>,

    /// Show only this day (0-based)
    #[arg(long)]
    day: Option<usize>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = GeminiConfig::from_env();
    let backend: Arc<dyn GenerativeBackend> = Arc::new(GeminiClient::new(&config.base_url));

    let outcome = match cli.command {
        Command::Plan(args) => commands::plan::run(config, backend, args).await,
        Command::Chat { message } => commands::chat::run(config, backend, message).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
