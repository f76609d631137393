// ABOUTME: Integration tests for the fitness chat client and the conversation transcript
// ABOUTME: Verifies session reuse, empty replies, fallback entries and credential checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{configured, init_test_logging, placeholder, StubBackend, StubReply};
use fitstudent_ai::chat::{ChatTurn, Conversation, FitnessChat, Speaker};
use fitstudent_ai::errors::ErrorCode;

const FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

fn turn(speaker: Speaker, text: &str) -> ChatTurn {
    ChatTurn {
        speaker,
        text: text.to_owned(),
    }
}

// =============================================================================
// FitnessChat
// =============================================================================

#[tokio::test]
async fn test_start_with_placeholder_key_makes_no_backend_call() {
    init_test_logging();
    let stub = StubBackend::new();

    let err = FitnessChat::start(&placeholder(), &stub).unwrap_err();

    assert!(err.is_config_error());
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_sends_share_one_session() {
    init_test_logging();
    let stub = StubBackend::new().with_chat_replies([
        StubReply::text("Try oats with peanut butter."),
        StubReply::text("Yes, three times a week is plenty."),
    ]);

    let mut chat = FitnessChat::start(&configured(), &stub).unwrap();
    let first = chat.send("Cheap breakfast?").await.unwrap();
    let second = chat.send("Is 3x a week enough?").await.unwrap();

    assert_eq!(first, "Try oats with peanut butter.");
    assert_eq!(second, "Yes, three times a week is plenty.");
    assert_eq!(stub.chat_starts(), 1);
    assert_eq!(stub.sends(), 2);
    assert_eq!(
        stub.sent_messages(),
        vec!["Cheap breakfast?", "Is 3x a week enough?"]
    );
}

#[tokio::test]
async fn test_absent_reply_is_empty_string() {
    init_test_logging();
    let stub = StubBackend::new().with_chat_replies([StubReply::Empty]);

    let mut chat = FitnessChat::start(&configured(), &stub).unwrap();

    assert_eq!(chat.send("hello").await.unwrap(), "");
}

#[tokio::test]
async fn test_send_failure_is_returned() {
    init_test_logging();
    let stub = StubBackend::new().with_chat_replies([StubReply::Fail(
        ErrorCode::ExternalServiceUnavailable,
        "connection reset".to_owned(),
    )]);

    let mut chat = FitnessChat::start(&configured(), &stub).unwrap();
    let err = chat.send("hello").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    // Session is kept; the next send goes through on it
    assert_eq!(chat.send("again").await.unwrap(), "ok");
    assert_eq!(stub.chat_starts(), 1);
}

// =============================================================================
// Conversation
// =============================================================================

#[tokio::test]
async fn test_conversation_creates_session_lazily_once() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new());
    let mut conversation = Conversation::new(configured(), stub.clone());

    assert!(!conversation.is_open());
    assert_eq!(stub.chat_starts(), 0);

    conversation.send("first").await.unwrap();
    conversation.send("second").await.unwrap();

    assert!(conversation.is_open());
    assert_eq!(stub.chat_starts(), 1);
    assert_eq!(stub.sends(), 2);
    assert_eq!(conversation.transcript().len(), 4);
}

#[tokio::test]
async fn test_open_then_send_reuses_session() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new());
    let mut conversation = Conversation::new(configured(), stub.clone());

    conversation.open().unwrap();
    conversation.open().unwrap();
    conversation.send("hi").await.unwrap();

    assert_eq!(stub.chat_starts(), 1);
}

#[tokio::test]
async fn test_empty_reply_is_recorded_without_fallback() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new().with_chat_replies([StubReply::Empty]));
    let mut conversation = Conversation::new(configured(), stub);

    let reply = conversation.send("anything?").await.unwrap().clone();

    assert_eq!(reply, turn(Speaker::Model, ""));
    assert_eq!(
        conversation.transcript(),
        &[turn(Speaker::User, "anything?"), turn(Speaker::Model, "")]
    );
}

#[tokio::test]
async fn test_failure_appends_fallback_turn() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new().with_chat_replies([StubReply::Fail(
        ErrorCode::ExternalRateLimited,
        "quota".to_owned(),
    )]));
    let mut conversation = Conversation::new(configured(), stub);

    let reply = conversation.send("  workout tips  ").await.unwrap().clone();

    assert_eq!(reply.text, FALLBACK);
    assert_eq!(
        conversation.transcript(),
        &[
            turn(Speaker::User, "workout tips"),
            turn(Speaker::Model, FALLBACK)
        ]
    );
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new());
    let mut conversation = Conversation::new(configured(), stub.clone());

    assert!(conversation.send("   \n").await.is_none());
    assert!(conversation.transcript().is_empty());
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_missing_key_yields_fallback_and_no_calls() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new());
    let mut conversation = Conversation::new(placeholder(), stub.clone());

    assert!(conversation.open().unwrap_err().is_config_error());
    let reply = conversation.send("hello").await.unwrap().clone();

    assert_eq!(reply.text, FALLBACK);
    assert!(!conversation.is_open());
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_failed_session_start_is_retried_on_next_send() {
    init_test_logging();
    let stub = Arc::new(StubBackend::new().with_start_failure(StubReply::Fail(
        ErrorCode::ExternalServiceUnavailable,
        "offline".to_owned(),
    )));
    let mut conversation = Conversation::new(configured(), stub.clone());

    conversation.send("one").await;
    conversation.send("two").await;

    assert_eq!(stub.chat_starts(), 2);
    assert_eq!(stub.sends(), 0);
    assert!(conversation
        .transcript()
        .iter()
        .filter(|t| t.speaker == Speaker::Model)
        .all(|t| t.text == FALLBACK));
}
