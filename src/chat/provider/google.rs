//! Google `generateContent` backend, selected when the credential carries the
//! "AIza" prefix. Prior turns are flattened into a single prompt context
//! rather than sent as role-tagged messages.

use serde::{Deserialize, Serialize};

use super::{
    build_client, strip_think_tags, ProviderError, Speaker, Turn, EMPTY_REPLY_PLACEHOLDER,
    SYSTEM_INSTRUCTION,
};
use crate::core::config::config::ChatConfig;

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Flatten the recent transcript into a labeled context block.
fn build_prompt(cfg: &ChatConfig, history: &[Turn], user_message: &str) -> String {
    let mut prompt = String::from("Context:\n");
    for turn in history
        .iter()
        .skip(history.len().saturating_sub(cfg.google_history))
    {
        let label = match turn.speaker {
            Speaker::User => "User",
            Speaker::Model => "Nexus",
        };
        prompt.push_str(label);
        prompt.push_str(": ");
        prompt.push_str(&turn.text);
        prompt.push('\n');
    }
    prompt.push_str("User: ");
    prompt.push_str(user_message);
    prompt.push_str("\nRespond as Nexus.");
    prompt
}

pub fn generate(
    cfg: &ChatConfig,
    api_key: &str,
    history: &[Turn],
    user_message: &str,
) -> Result<String, ProviderError> {
    let body = GenerateRequest {
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: build_prompt(cfg, history, user_message),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: cfg.temperature,
            max_output_tokens: cfg.max_tokens,
        },
    };

    let url = format!(
        "{}/models/{}:generateContent",
        cfg.google_url.trim_end_matches('/'),
        cfg.google_model
    );

    let client = build_client(cfg)?;
    let response = client
        .post(url)
        .query(&[("key", api_key)])
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

    let parsed: GenerateResponse = response
        .json()
        .map_err(|e| ProviderError::Parse(e.to_string()))?;
    let content = parsed
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.as_deref())
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
    fn reply_parses_from_candidates_list() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Online." } ] } }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).expect("parse");
        let text = parsed.candidates[0]
            .content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref());
        assert_eq!(text, Some("Online."));
    }

    #[test]
    fn request_uses_camel_case_generation_config() {
        let body = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: "persona".into(),
                }],
            },
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hi".into() }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 500,
            },
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "persona");
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn prompt_keeps_only_recent_turns() {
        let cfg = ChatConfig {
            google_history: 2,
            ..ChatConfig::default()
        };
        let history = vec![
            Turn::user("one"),
            Turn::model("two"),
            Turn::user("three"),
            Turn::model("four"),
        ];
        let prompt = build_prompt(&cfg, &history, "now");
        assert!(!prompt.contains("one"));
        assert!(!prompt.contains("two"));
        assert!(prompt.contains("User: three"));
        assert!(prompt.contains("Nexus: four"));
        assert!(prompt.ends_with("Respond as Nexus."));
    }
}
