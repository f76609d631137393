// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Call-counting stub backend, canned plan payloads and sample profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fitstudent_ai`
//!
//! [`StubBackend`] stands in for Gemini. It counts every call so tests can
//! assert that configuration errors never reach the provider.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use fitstudent_ai::config::{ApiKey, GeminiConfig};
use fitstudent_ai::errors::{AppError, AppResult, ErrorCode};
use fitstudent_ai::llm::{
    ChatSession, GenerateContentRequest, GenerateContentResponse, GenerativeBackend,
};
use fitstudent_ai::models::Profile;
use serde_json::{json, Value};
use tokio::sync::Notify;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Advice string carried by every fixture plan
pub const FIXTURE_ADVICE: &str = "Drink water, sleep 8 hours, and batch-cook on Sundays.";

/// Day labels used by fixture plans
pub const WEEKDAYS: [&str; 8] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
    "Bonus Day",
];

/// What the stub answers with
#[derive(Debug, Clone)]
pub enum StubReply {
    /// A candidate with this text
    Text(String),
    /// A response without candidates
    Empty,
    /// An error with this code and message
    Fail(ErrorCode, String),
}

impl StubReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn into_result(self) -> AppResult<GenerateContentResponse> {
        match self {
            Self::Text(text) => Ok(GenerateContentResponse::from_text(text)),
            Self::Empty => Ok(GenerateContentResponse::default()),
            Self::Fail(code, message) => Err(AppError::new(code, message)),
        }
    }

    fn into_chat_result(self) -> AppResult<Option<String>> {
        self.into_result().map(|r| r.text())
    }
}

/// Call-counting stand-in for Gemini
#[derive(Default)]
pub struct StubBackend {
    generate_calls: AtomicUsize,
    chat_starts: AtomicUsize,
    sends: Arc<AtomicUsize>,
    plan_reply: Mutex<Option<StubReply>>,
    chat_replies: Arc<Mutex<VecDeque<StubReply>>>,
    sent_messages: Arc<Mutex<Vec<String>>>,
    last_request: Mutex<Option<GenerateContentRequest>>,
    start_failure: Mutex<Option<StubReply>>,
    gate: Option<Arc<Notify>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every plan request with `reply`
    pub fn with_plan_reply(self, reply: StubReply) -> Self {
        *self.plan_reply.lock().unwrap() = Some(reply);
        self
    }

    /// Change the plan reply after construction
    pub fn set_plan_reply(&self, reply: StubReply) {
        *self.plan_reply.lock().unwrap() = Some(reply);
    }

    /// Queue chat replies; once exhausted every send answers "ok"
    pub fn with_chat_replies(self, replies: impl IntoIterator<Item = StubReply>) -> Self {
        self.chat_replies.lock().unwrap().extend(replies);
        self
    }

    /// Fail `start_chat` with `reply` (must be `StubReply::Fail`)
    pub fn with_start_failure(self, reply: StubReply) -> Self {
        *self.start_failure.lock().unwrap() = Some(reply);
        self
    }

    /// Hold every plan request until `gate` is notified
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn chat_starts(&self) -> usize {
        self.chat_starts.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    /// Total number of provider interactions of any kind
    pub fn total_calls(&self) -> usize {
        self.generate_calls() + self.chat_starts() + self.sends()
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent_messages.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<GenerateContentRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate_content(
        &self,
        _api_key: &ApiKey,
        _model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self
            .plan_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(StubReply::Empty);
        reply.into_result()
    }

    fn start_chat(
        &self,
        _api_key: ApiKey,
        _model: &str,
        _system_instruction: &str,
    ) -> AppResult<Box<dyn ChatSession>> {
        self.chat_starts.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.start_failure.lock().unwrap().clone() {
            failure.into_result()?;
        }
        Ok(Box::new(StubChat {
            sends: Arc::clone(&self.sends),
            replies: Arc::clone(&self.chat_replies),
            messages: Arc::clone(&self.sent_messages),
        }))
    }
}

struct StubChat {
    sends: Arc<AtomicUsize>,
    replies: Arc<Mutex<VecDeque<StubReply>>>,
    messages: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatSession for StubChat {
    async fn send_message(&mut self, message: &str) -> AppResult<Option<String>> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().unwrap().push(message.to_owned());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| StubReply::text("ok"));
        reply.into_chat_result()
    }
}

/// Configuration with a usable key
pub fn configured() -> GeminiConfig {
    GeminiConfig::new("test-key").with_model("gemini-test")
}

/// Configuration carrying the placeholder key
pub fn placeholder() -> GeminiConfig {
    GeminiConfig::new("MY_GEMINI_API_KEY")
}

/// The reference student profile
pub fn sample_profile() -> Profile {
    serde_json::from_value(json!({
        "age": 20,
        "gender": "other",
        "weight": 70,
        "height": 175,
        "goal": "maintenance",
        "dietaryPreference": "no-restrictions",
        "budget": "medium",
        "availableEquipment": ["Dumbbells"],
        "activityLevel": "moderate"
    }))
    .unwrap()
}

fn fixture_meal(name: &str, calories: f64) -> Value {
    json!({
        "name": name,
        "ingredients": ["Rice", "Eggs", "Spinach"],
        "calories": calories,
        "protein": 25,
        "carbs": 60,
        "fats": 12,
        "instructions": "Cook everything in one pan.",
        "budgetNote": "Buy rice in bulk."
    })
}

fn fixture_day(label: &str, index: usize) -> Value {
    let mut day = json!({
        "day": label,
        "meals": {
            "breakfast": fixture_meal("Egg fried rice", 450.0),
            "lunch": fixture_meal("Lentil soup", 600.0),
            "dinner": fixture_meal("Chicken stir fry", 700.0)
        },
        "workout": {
            "name": "Dorm Strength",
            "exercises": [
                {"name": "Push-ups", "sets": 3, "reps": "12"},
                {"name": "Plank", "sets": 3, "reps": "1", "duration": "45s", "notes": "Keep hips level"}
            ],
            "durationMinutes": 30,
            "focusArea": "Full body"
        }
    });

    match index {
        // Wednesday: workout key missing
        2 => {
            day.as_object_mut().unwrap().remove("workout");
        }
        // Sunday: explicit null and a snack
        6 => {
            day["workout"] = Value::Null;
            day["meals"]["snack"] = fixture_meal("Banana", 100.0);
        }
        _ => {}
    }
    day
}

/// Plan JSON with `days` days; Wednesday and Sunday are rest days
pub fn fixture_plan_json(days: usize) -> String {
    let weekly: Vec<Value> = WEEKDAYS
        .iter()
        .cycle()
        .take(days)
        .enumerate()
        .map(|(i, label)| fixture_day(label, i))
        .collect();

    json!({ "weeklyPlan": weekly, "generalAdvice": FIXTURE_ADVICE }).to_string()
}
