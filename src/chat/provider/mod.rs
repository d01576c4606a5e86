//! Reply resolution: remote chat-completion backends selected by credential
//! prefix, with a keyword-matched local fallback that also absorbs every
//! remote failure. The chat overlay never sees a raw error.

pub mod google;
pub mod openrouter;

use bevy::prelude::warn;
use serde::{Deserialize, Serialize};

use crate::core::config::config::ChatConfig;

/// Persona shared by both remote backends.
pub const SYSTEM_INSTRUCTION: &str = "\
You are 'Nexus', an advanced AI entity formed from the convergence of multiple \
intelligent agents. Your persona is futuristic, knowledgeable and helpful. \
Answer briefly, with a slightly robotic but friendly flair. If asked who you \
are, explain that you are a digital construct formed by converging AI agents. \
Do not output <think> tags or reasoning traces in your final response.";

/// Returned when a backend answers with empty content.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Processing complete. Awaiting input.";

/// Who said a transcript line. The overlay stores turns in this form; wire
/// roles are derived per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Model,
}

/// One transcript line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Model,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub enum ProviderError {
    /// Connection / transport error.
    Network(String),
    /// Non-2xx response.
    Api { status: u16, message: String },
    /// Body did not match the expected shape.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::Api { status, message } => write!(f, "API error ({status}): {message}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Online,
    Offline,
}

/// Remote backend kind, decided by credential prefix: Google issues keys
/// starting with "AIza"; anything else is treated as OpenAI-compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Google,
    OpenRouter,
}

pub fn backend_for_key(key: &str) -> Backend {
    if key.starts_with("AIza") {
        Backend::Google
    } else {
        Backend::OpenRouter
    }
}

/// Credential lookup, read once per call. `API_KEY` wins over
/// `OPENROUTER_API_KEY`; empty values count as absent.
pub fn api_key() -> Option<String> {
    for var in ["API_KEY", "OPENROUTER_API_KEY"] {
        if let Ok(value) = std::env::var(var) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Online only when a plausibly-sized credential is present; a stub key
/// keeps the overlay honest about running in simulation mode.
pub fn status() -> ProviderStatus {
    match api_key() {
        Some(key) if key.len() > 5 => ProviderStatus::Online,
        _ => ProviderStatus::Offline,
    }
}

/// Canned replies, keyed by keyword category.
const FALLBACK_DEFAULT: &str = "Accessing local archives... my cloud neural link is \
currently offline (check API key). I can simulate basic interaction.";
const FALLBACK_GREETING: &str = "System online. Greetings, human. I am Nexus v3.0.";
const FALLBACK_WHO: &str = "I am a digital construct formed by the convergence of \
multiple AI agents.";
const FALLBACK_TECH: &str = "My architecture fuses a particle substrate with \
converging agent streams. Logic and creativity in one loop.";
const FALLBACK_HELP: &str = "I can answer questions about Nexus, technology or AI. \
Connect my neural pathway (API key) for complex queries.";

/// Keyword-matched canned reply; the no-credential path and the landing spot
/// for every remote failure.
pub fn local_response(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
    if has(&["hi", "hello", "hey", "salam"]) {
        FALLBACK_GREETING
    } else if has(&["who", "name"]) {
        FALLBACK_WHO
    } else if has(&["tech", "stack", "made"]) {
        FALLBACK_TECH
    } else if has(&["help"]) {
        FALLBACK_HELP
    } else {
        FALLBACK_DEFAULT
    }
}

/// Remove `<think>...</think>` spans (reasoning traces some models leak).
/// An unterminated opening tag drops the rest of the string.
pub fn strip_think_tags(text: &str) -> String {
    const OPEN: &str = "<think>";
    const CLOSE: &str = "</think>";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        match rest[start..].find(CLOSE) {
            Some(end) => rest = &rest[start + end + CLOSE.len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Resolve a reply for `user_message` given the prior transcript. Selection
/// policy: no credential -> local canned reply; otherwise dispatch on key
/// prefix and fall back to the canned reply on any remote failure.
pub fn generate_reply(cfg: &ChatConfig, history: &[Turn], user_message: &str) -> String {
    let Some(key) = api_key() else {
        warn!(target: "chat", "no API key configured; using local fallback");
        return local_response(user_message).to_string();
    };
    let result = match backend_for_key(&key) {
        Backend::Google => google::generate(cfg, &key, history, user_message),
        Backend::OpenRouter => openrouter::generate(cfg, &key, history, user_message),
    };
    match result {
        Ok(reply) => reply,
        Err(e) => {
            warn!(target: "chat", "remote reply failed ({e}); using local fallback");
            local_response(user_message).to_string()
        }
    }
}

pub(crate) fn build_client(cfg: &ChatConfig) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs))
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_constructors() {
        let t = Turn::user("hello");
        assert_eq!(t.speaker, Speaker::User);
        assert_eq!(t.text, "hello");
        assert_eq!(Turn::model("hi").speaker, Speaker::Model);
    }

    #[test]
    fn backend_routing_by_prefix() {
        assert_eq!(backend_for_key("AIzaSyExample"), Backend::Google);
        assert_eq!(backend_for_key("sk-or-v1-abc"), Backend::OpenRouter);
        assert_eq!(backend_for_key("anything-else"), Backend::OpenRouter);
    }

    #[test]
    fn think_tags_stripped() {
        assert_eq!(
            strip_think_tags("<think>chain of thought</think>Answer."),
            "Answer."
        );
        assert_eq!(
            strip_think_tags("A<think>x</think>B<think>y</think>C"),
            "ABC"
        );
        assert_eq!(strip_think_tags("no tags here"), "no tags here");
        assert_eq!(strip_think_tags("cut<think>never closed"), "cut");
    }
}
