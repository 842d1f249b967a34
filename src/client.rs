//! Generation service client.
//!
//! One blocking chat-completion request per invocation: a fixed system
//! persona, the constructed prompt as the user message, and temperature
//! pinned to zero. There is no retry, no streaming, and no timeout beyond
//! the transport default; every transport or service failure is terminal
//! for the run.
//!
//! The client sits behind the narrow [`Generator`] trait so the pipeline
//! can run against a canned double in tests without network access.

use crate::error::{Result, SpecgenError};
use serde::{Deserialize, Serialize};

/// Chat completions endpoint.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// System persona sent with every request.
pub const SYSTEM_PROMPT: &str =
    "You are an experienced GDScript programmer working with Godot 4.";

/// Narrow seam over the generation service.
pub trait Generator {
    /// Send `prompt` on behalf of `module_name` and return the raw text reply.
    fn generate(&self, module_name: &str, prompt: &str) -> Result<String>;
}

/// Blocking client for the OpenAI chat completions API.
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create a client with the given credential and model.
    ///
    /// The credential comes from [`crate::config::Config`]; the client never
    /// reads the process environment itself.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}

impl<'a> ChatRequest<'a> {
    fn for_prompt(model: &'a str, prompt: &'a str) -> Self {
        ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            // Deterministic sampling for reproducible artifacts.
            temperature: 0.0,
        }
    }
}

impl Generator for OpenAiClient {
    fn generate(&self, module_name: &str, prompt: &str) -> Result<String> {
        let service_err = |message: String| SpecgenError::ServiceError {
            module: module_name.to_string(),
            message,
        };

        let request = ChatRequest::for_prompt(&self.model, prompt);

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| service_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(service_err(format!("API error {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| service_err(format!("unreadable API response: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| service_err("API response contained no choices".to_string()))?;

        Ok(choice.message.content.trim().to_string())
    }
}
