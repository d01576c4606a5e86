//! OpenAI-compatible backend (OpenRouter endpoint by default). Works with
//! any `chat/completions` service that honors bearer credentials.

use serde::{Deserialize, Serialize};

use super::{
    build_client, strip_think_tags, ProviderError, Speaker, Turn, EMPTY_REPLY_PLACEHOLDER,
    SYSTEM_INSTRUCTION,
};
use crate::core::config::config::ChatConfig;

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

fn wire_role(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "user",
        Speaker::Model => "assistant",
    }
}

pub fn generate(
    cfg: &ChatConfig,
    api_key: &str,
    history: &[Turn],
    user_message: &str,
) -> Result<String, ProviderError> {
    let recent = history
        .iter()
        .skip(history.len().saturating_sub(cfg.openrouter_history));
    let mut messages = vec![WireMessage {
        role: "system",
        content: SYSTEM_INSTRUCTION.to_string(),
    }];
    messages.extend(recent.map(|turn| WireMessage {
        role: wire_role(turn.speaker),
        content: turn.text.clone(),
    }));
    messages.push(WireMessage {
        role: "user",
        content: user_message.to_string(),
    });

    let body = CompletionRequest {
        model: cfg.openrouter_model.clone(),
        messages,
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
    };

    let client = build_client(cfg)?;
    let response = client
        .post(&cfg.openrouter_url)
        .bearer_auth(api_key)
        .header("HTTP-Referer", &cfg.referer)
        .header("X-Title", &cfg.site_title)
        .json(&body)
        .send()
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        });
    }

    let parsed: CompletionResponse = response
        .json()
        .map_err(|e| ProviderError::Parse(e.to_string()))?;
    let content = parsed
        .choices
        .first()
        .and_then(|c| c.message.content.as_deref())
        .unwrap_or_default();

    let cleaned = strip_think_tags(content);
    if cleaned.is_empty() {
        Ok(EMPTY_REPLY_PLACEHOLDER.to_string())
    } else {
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parses_from_choices_list() {
        let body = r#"{
            "id": "gen-1",
            "choices": [
                { "message": { "role": "assistant", "content": "Greetings." } }
            ]
        }"#;
        let parsed: CompletionResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Greetings.")
        );
    }

    #[test]
    fn missing_choices_is_tolerated() {
        let parsed: CompletionResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn request_serializes_role_tagged_messages() {
        let body = CompletionRequest {
            model: "test-model".into(),
            messages: vec![
                WireMessage {
                    role: "system",
                    content: "persona".into(),
                },
                WireMessage {
                    role: "user",
                    content: "hi".into(),
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn model_turns_map_to_assistant_role() {
        assert_eq!(wire_role(Speaker::Model), "assistant");
        assert_eq!(wire_role(Speaker::User), "user");
    }
}
