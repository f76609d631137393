// ABOUTME: Fitness chat client and the conversation transcript that drives it
// ABOUTME: FitnessChat owns one provider session; Conversation adds lazy startup and a fallback reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness Chat
//!
//! Two layers:
//!
//! - [`FitnessChat`]: one provider session seeded with the fitness coach
//!   instruction. Errors are returned to the caller.
//! - [`Conversation`]: the chat widget state. It keeps a transcript, starts
//!   the session on first use, and turns any failure into a fixed fallback
//!   reply instead of an error.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::GeminiConfig;
use crate::constants::messages::CHAT_FALLBACK_REPLY;
use crate::errors::AppResult;
use crate::llm::prompts::FITNESS_COACH_INSTRUCTION;
use crate::llm::{ChatSession, GenerativeBackend};

/// A single conversation with the fitness coach
///
/// Dropping the value ends the session. There is no explicit close.
pub struct FitnessChat {
    session: Box<dyn ChatSession>,
}

impl FitnessChat {
    /// Open a session seeded with the fitness coach instruction
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without touching `backend` when no usable key is
    /// configured, or whatever error the backend raises while opening.
    #[instrument(skip_all, fields(backend = backend.name(), model = %config.model))]
    pub fn start(config: &GeminiConfig, backend: &dyn GenerativeBackend) -> AppResult<Self> {
        let api_key = config.require_api_key()?;
        let session = backend.start_chat(api_key, &config.model, FITNESS_COACH_INSTRUCTION)?;
        debug!("Fitness chat session started");
        Ok(Self { session })
    }

    /// Send one message and return the reply
    ///
    /// A missing reply comes back as an empty string.
    ///
    /// # Errors
    ///
    /// Transport and provider errors are returned unchanged; the session is
    /// kept as is and nothing is retried.
    pub async fn send(&mut self, message: &str) -> AppResult<String> {
        let reply = self.session.send_message(message).await?;
        Ok(reply.unwrap_or_default())
    }
}

impl Debug for FitnessChat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessChat").finish_non_exhaustive()
    }
}

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The student
    User,
    /// The coach
    Model,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Who said it
    pub speaker: Speaker,
    /// What was said
    pub text: String,
}

impl ChatTurn {
    fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    fn model(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Model,
            text: text.into(),
        }
    }
}

/// Chat widget state: transcript plus a lazily started [`FitnessChat`]
pub struct Conversation {
    config: GeminiConfig,
    backend: Arc<dyn GenerativeBackend>,
    chat: Option<FitnessChat>,
    transcript: Vec<ChatTurn>,
}

impl Conversation {
    /// Create a conversation; no session is opened yet
    #[must_use]
    pub fn new(config: GeminiConfig, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            config,
            backend,
            chat: None,
            transcript: Vec::new(),
        }
    }

    /// Start the session if it is not running yet
    ///
    /// # Errors
    ///
    /// Returns the error from [`FitnessChat::start`]. A later call or send
    /// tries again.
    pub fn open(&mut self) -> AppResult<()> {
        self.session().map(|_| ())
    }

    /// Whether a session is running
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.chat.is_some()
    }

    /// Entries so far, oldest first
    #[must_use]
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Send `input` and record both sides of the exchange
    ///
    /// Blank input is ignored and returns `None`. Otherwise the user entry and
    /// a model entry are appended and the model entry is returned. When the
    /// session cannot be started or the send fails, the model entry is the
    /// fallback apology.
    pub async fn send(&mut self, input: &str) -> Option<&ChatTurn> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript.push(ChatTurn::user(message));

        let reply = match self.exchange(message).await {
            Ok(text) => text,
            Err(e) => {
                warn!(code = ?e.code, error = %e, "Chat message failed");
                CHAT_FALLBACK_REPLY.to_owned()
            }
        };

        self.transcript.push(ChatTurn::model(reply));
        self.transcript.last()
    }

    async fn exchange(&mut self, message: &str) -> AppResult<String> {
        self.session()?.send(message).await
    }

    fn session(&mut self) -> AppResult<&mut FitnessChat> {
        let chat = match self.chat.take() {
            Some(chat) => chat,
            None => FitnessChat::start(&self.config, self.backend.as_ref())?,
        };
        Ok(self.chat.insert(chat))
    }
}

impl Debug for Conversation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversation")
            .field("backend", &self.backend.name())
            .field("open", &self.is_open())
            .field("turns", &self.transcript.len())
            .finish_non_exhaustive()
    }
}
