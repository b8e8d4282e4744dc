// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! LLM-backed interpreter.
//!
//! The provider sees only the system prompt (operation grammar), a capped
//! element summary, and the user command; full documents never reach the
//! provider or the logs. Malformed provider output degrades to `noop`;
//! transport failures map to the closed [`InterpreterError`] taxonomy.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use super::{ElementSummary, InterpreterError};
use crate::ops::PatchOp;

/// Hard cap on how many elements are described to the provider, keeping the
/// prompt bounded on large documents.
pub const PROMPT_ELEMENT_CAP: usize = 40;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "\
You are a BPMN diagram editor assistant. Your job is to translate natural-language \
editing commands into structured JSON patch operations.

Respond ONLY with a single JSON object. No markdown fences, no explanation.

Supported operations:
  {\"op\": \"add_node\",        \"args\": {\"type\": \"<bpmn:Type>\", \"name\": \"<name>\"}}
  {\"op\": \"connect_by_name\", \"args\": {\"sourceName\": \"<name>\", \"targetName\": \"<name>\"}}
  {\"op\": \"remove_by_name\",  \"args\": {\"name\": \"<name>\"}}
  {\"op\": \"rename_by_name\",  \"args\": {\"oldName\": \"<name>\", \"newName\": \"<name>\"}}
  {\"op\": \"convert_by_name\", \"args\": {\"name\": \"<name>\", \"type\": \"<bpmn:Type>\"}}
  {\"op\": \"move_to_lane_by_name\", \"args\": {\"name\": \"<name>\", \"laneName\": \"<lane>\"}}
  {\"op\": \"set_property_by_name\", \"args\": {\"name\": \"<name>\", \"key\": \"<key>\", \"value\": \"<value>\"}}
  {\"op\": \"noop\",            \"args\": {}}

Valid bpmn:Type values: bpmn:Task, bpmn:UserTask, bpmn:ServiceTask, bpmn:ScriptTask, \
bpmn:SendTask, bpmn:ReceiveTask, bpmn:StartEvent, bpmn:EndEvent, bpmn:IntermediateCatchEvent, \
bpmn:IntermediateThrowEvent, bpmn:ExclusiveGateway, bpmn:ParallelGateway, \
bpmn:InclusiveGateway, bpmn:EventBasedGateway, bpmn:SubProcess.

If the command is ambiguous or cannot be represented as a single operation, return \
{\"op\": \"noop\", \"args\": {}}.
";

/// Transport-level failure reported by a chat provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    InvalidCredential,
    RateLimited,
    Timeout,
    Other(String),
}

impl From<ProviderError> for InterpreterError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::InvalidCredential => Self::Unauthorized,
            ProviderError::RateLimited => Self::TooManyRequests,
            ProviderError::Timeout => Self::ServiceUnavailable,
            ProviderError::Other(message) => Self::BadGateway { message },
        }
    }
}

/// A synchronous chat-completion backend.
pub trait ChatProvider: Send + Sync {
    fn chat(&self, system_prompt: &str, user_content: &str) -> Result<String, ProviderError>;
}

/// Chat provider for the OpenAI-compatible completions API.
pub struct OpenAiChatProvider {
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiChatProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatProvider for OpenAiChatProvider {
    fn chat(&self, system_prompt: &str, user_content: &str) -> Result<String, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ProviderError::Other(err.to_string()))?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_content},
            ],
            "temperature": 0,
            "max_tokens": 256,
        });

        let response = client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Other(err.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::InvalidCredential);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ProviderError::Other(format!(
                "provider returned {status}: {detail}"
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .map_err(|err| ProviderError::Other(err.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}

/// Runs one command through the provider and parses the reply.
pub fn interpret(
    provider: &dyn ChatProvider,
    command: &str,
    elements: &[ElementSummary],
) -> Result<PatchOp, InterpreterError> {
    let capped = &elements[..elements.len().min(PROMPT_ELEMENT_CAP)];
    let context = serde_json::to_string(capped).unwrap_or_else(|_| "[]".to_owned());
    let user_content = format!("Current elements: {context}\n\nCommand: {command}");

    let raw = provider
        .chat(SYSTEM_PROMPT, &user_content)
        .map_err(InterpreterError::from)?;
    log::debug!("llm raw response: {raw:?}");
    Ok(parse_patch(&raw))
}

/// Extracts a patch operation from the raw model reply. Markdown fences and
/// surrounding prose are tolerated; anything unparseable degrades to `noop`.
pub fn parse_patch(raw: &str) -> PatchOp {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    let fence_re = FENCE_RE.get_or_init(|| {
        Regex::new(r"(?i)```(?:json)?").unwrap_or_else(|err| unreachable!("static regex: {err}"))
    });

    let cleaned = fence_re.replace_all(raw, "");
    let cleaned = cleaned.trim().trim_matches('`');

    let Some(start) = cleaned.find('{') else {
        log::warn!("llm returned no JSON object: {raw:?}");
        return PatchOp::Noop {};
    };
    let Some(end) = cleaned.rfind('}') else {
        log::warn!("llm returned no JSON object: {raw:?}");
        return PatchOp::Noop {};
    };
    if end < start {
        log::warn!("llm returned no JSON object: {raw:?}");
        return PatchOp::Noop {};
    }

    match serde_json::from_str::<PatchOp>(&cleaned[start..=end]) {
        Ok(op) => op,
        Err(err) => {
            log::warn!("llm patch did not parse ({err}): {raw:?}");
            PatchOp::Noop {}
        }
    }
}
