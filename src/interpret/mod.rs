// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Natural-language command interpretation.
//!
//! Two strategies behind one contract: a pure pattern interpreter (always
//! available, never fails) and an LLM-backed one (needs a provider
//! credential, can fail with a closed error taxonomy). Both return a
//! well-formed [`PatchOp`], falling back to `noop` for anything they cannot
//! understand; errors are reserved for genuine infrastructure failure.

use std::fmt;

use serde::Serialize;

use crate::model::Document;
use crate::ops::PatchOp;

pub mod llm;
pub mod rules;

pub use llm::{ChatProvider, OpenAiChatProvider, ProviderError};

/// Compact per-element context handed to the LLM interpreter. Never carries
/// more than id, display name, and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub element_type: String,
}

/// Extracts the capped element context the LLM interpreter is allowed to see.
pub fn summarize_elements(document: &Document) -> Vec<ElementSummary> {
    document
        .elements()
        .iter()
        .map(|element| ElementSummary {
            id: element.id().to_string(),
            name: element.name().map(ToOwned::to_owned),
            element_type: element.element_type().as_tag().to_owned(),
        })
        .collect()
}

/// Infrastructure failure from the LLM-backed interpreter.
///
/// `Unauthorized` is terminal (the credential is wrong); the others are
/// retryable from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    Unauthorized,
    TooManyRequests,
    ServiceUnavailable,
    BadGateway { message: String },
}

impl InterpreterError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TooManyRequests | Self::ServiceUnavailable)
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("invalid AI provider API key"),
            Self::TooManyRequests => {
                f.write_str("AI provider rate limit exceeded, try again later")
            }
            Self::ServiceUnavailable => f.write_str("AI service timed out, try again"),
            Self::BadGateway { message } => write!(f, "AI service error: {message}"),
        }
    }
}

impl std::error::Error for InterpreterError {}

/// Interpreter strategy, chosen by the caller at construction time.
pub enum CommandInterpreter {
    /// Ordered regex rules; pure and network-free.
    Pattern,
    /// Chat-completion provider translating commands into patch JSON.
    Llm(Box<dyn ChatProvider>),
}

impl CommandInterpreter {
    pub fn pattern() -> Self {
        Self::Pattern
    }

    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::Llm(Box::new(OpenAiChatProvider::new(api_key)))
    }

    pub fn interpret(
        &self,
        command: &str,
        elements: &[ElementSummary],
    ) -> Result<PatchOp, InterpreterError> {
        match self {
            Self::Pattern => Ok(rules::interpret(command)),
            Self::Llm(provider) => llm::interpret(provider.as_ref(), command, elements),
        }
    }
}

impl fmt::Debug for CommandInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => f.write_str("CommandInterpreter::Pattern"),
            Self::Llm(_) => f.write_str("CommandInterpreter::Llm"),
        }
    }
}
