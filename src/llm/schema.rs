// ABOUTME: Typed response-schema descriptor for Gemini structured output
// ABOUTME: Declares the FullPlan shape once and hands it to every plan request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Schema
//!
//! Gemini's structured-output mode takes an OpenAPI-style schema in
//! `generationConfig.responseSchema`. [`Schema`] models the subset the plan
//! needs, and [`full_plan_schema`] builds the plan description a single time
//! per process.
//!
//! The schema mirrors the serde shape of
//! [`FullPlan`](crate::models::FullPlan): every field that deserializes
//! without `#[serde(default)]` is listed as required, and everything else is optional.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::constants::plan::DAYS_PER_PLAN;

/// Primitive type of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// String
    String,
    /// Floating point number
    Number,
    /// Integer
    Integer,
}

/// A node of a structured-output schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Node type
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Guidance for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Order in which the model should emit properties
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    /// Properties the model must emit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array element schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Minimum array length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    /// Maximum array length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl Schema {
    const fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
            min_items: None,
            max_items: None,
        }
    }

    /// Empty object node
    #[must_use]
    pub const fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// String node
    #[must_use]
    pub const fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// Number node
    #[must_use]
    pub const fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    /// Integer node
    #[must_use]
    pub const fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    /// Array node with the given element schema
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// Add a property the model must emit
    #[must_use]
    pub fn required(mut self, name: &str, schema: Self) -> Self {
        self.required.push(name.to_owned());
        self.optional(name, schema)
    }

    /// Add a property the model may omit
    #[must_use]
    pub fn optional(mut self, name: &str, schema: Self) -> Self {
        self.property_ordering.push(name.to_owned());
        self.properties.insert(name.to_owned(), schema);
        self
    }

    /// Attach a description
    #[must_use]
    pub fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Constrain an array to exactly `len` elements
    #[must_use]
    pub fn exact_len(mut self, len: usize) -> Self {
        self.min_items = Some(len);
        self.max_items = Some(len);
        self
    }

    /// Look up a property
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties.get(name)
    }

    /// Whether `name` is a required property
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

fn meal_schema() -> Schema {
    Schema::object()
        .required("name", Schema::string())
        .required("ingredients", Schema::array_of(Schema::string()))
        .required("calories", Schema::number())
        .required("protein", Schema::number())
        .required("carbs", Schema::number())
        .required("fats", Schema::number())
        .required("instructions", Schema::string())
        .optional("budgetNote", Schema::string())
}

fn exercise_schema() -> Schema {
    Schema::object()
        .required("name", Schema::string())
        .required("sets", Schema::integer())
        .required("reps", Schema::string())
        .optional("duration", Schema::string())
        .optional("notes", Schema::string())
}

fn workout_schema() -> Schema {
    Schema::object()
        .required("name", Schema::string())
        .required("exercises", Schema::array_of(exercise_schema()))
        .required("durationMinutes", Schema::integer())
        .required("focusArea", Schema::string())
}

fn day_plan_schema() -> Schema {
    let meals = Schema::object()
        .required("breakfast", meal_schema())
        .required("lunch", meal_schema())
        .required("dinner", meal_schema())
        .optional("snack", meal_schema());

    Schema::object()
        .required("day", Schema::string())
        .required("meals", meals)
        .optional("workout", workout_schema().described("Omit on rest days"))
}

/// Schema of a [`FullPlan`](crate::models::FullPlan), built on first use
#[must_use]
pub fn full_plan_schema() -> &'static Schema {
    static FULL_PLAN_SCHEMA: OnceLock<Schema> = OnceLock::new();

    FULL_PLAN_SCHEMA.get_or_init(|| {
        Schema::object()
            .required(
                "weeklyPlan",
                Schema::array_of(day_plan_schema()).exact_len(DAYS_PER_PLAN),
            )
            .required("generalAdvice", Schema::string())
    })
}
