// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: `fitstudent chat` - one-shot question or interactive session with the fitness coach
// ABOUTME: Reads lines from stdin until exit, quit or end of input

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use fitstudent_ai::chat::Conversation;
use fitstudent_ai::config::GeminiConfig;
use fitstudent_ai::llm::GenerativeBackend;
use fitstudent_ai::logging::AppLogger;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

/// Run the chat subcommand
pub async fn run(
    config: GeminiConfig,
    backend: Arc<dyn GenerativeBackend>,
    message: Option<String>,
) -> Result<()> {
    let mut conversation = Conversation::new(config, backend);
    // Surface a missing key up front instead of as a fallback reply
    conversation.open()?;

    if let Some(message) = message {
        exchange(&mut conversation, &message).await;
        return Ok(());
    }

    println!("FitStudent coach - ask about workouts, meals or budgeting. Type 'exit' to leave.");
    let mut lines = BufReader::new(stdin()).lines();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let input = line.trim();
        if matches!(input.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }
        exchange(&mut conversation, input).await;
    }
    Ok(())
}

async fn exchange(conversation: &mut Conversation, input: &str) {
    let started = Instant::now();
    let turn = conversation.transcript().len() / 2 + 1;
    if let Some(reply) = conversation.send(input).await {
        AppLogger::log_chat_turn(turn, reply.text.chars().count(), started.elapsed());
        println!("Coach: {}", reply.text);
    }
}
