//! LLM agent module for structured script generation.
//!
//! Uses rstructor for structured output from LLMs.

pub use crate::script::VideoScript;

use crate::config::Config;
use crate::script::ValidationError;
use chrono::{Datelike, Utc};
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

/// Run the script-writing agent for the given topic
pub async fn generate(topic: &str, config: &Config) -> Result<VideoScript, AgentError> {
    // Resolve the credential before anything touches the network
    let api_key = config.api_key()?;

    // Parse the model from config
    let model = parse_gemini_model(&config.agent.model);

    // Build the client
    let client = GeminiClient::new(api_key)
        .map_err(|e| AgentError::RequestFailed(e.to_string()))?
        .model(model);

    let prompt = build_prompt(topic, config, Utc::now().year());

    // One attempt, no retry: a failed call is a reported failure
    let result = client
        .generate_with_metadata(&prompt)
        .await
        .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

    parse_script(&result.text)
}

/// Build the full prompt: persona, generation parameters, instructions, and
/// the schema the reply must match.
pub fn build_prompt(topic: &str, config: &Config, year: i32) -> String {
    let generation = &config.generation;
    format!(
        r#"{persona} Generate a COMPLETE and FULL script based on the following parameters:

Topic: {topic}
Mood: {mood}
Expected Length: {length}
Target Audience: {audience}
Tone: {tone}
Current Year: {year}

Generate a FULL DETAILED SCRIPT (not just outlines) with:
- A catchy title that matches the {mood} mood
- A hook (1-2 sentences) that appeals to {audience}
- A complete introduction in a {tone} tone
- 4-6 main talking points, each fully written out in 2-3 sentences
- A strong conclusion with a call-to-action
- 5-8 relevant YouTube tags incorporating {year}
- Estimated duration appropriate for {length}

You MUST respond with valid JSON matching this exact schema:
{{
  "title": "string - the video title",
  "hook": "string - the opening hook, 1-2 sentences",
  "introduction": "string - the full introduction",
  "main_points": ["array of fully written main talking points, in order"],
  "conclusion": "string - the conclusion with a call-to-action",
  "tags": ["array of YouTube tags"],
  "estimated_duration": "string - e.g. '5 minutes'"
}}

Do not include any markdown formatting, code blocks, or explanations. Only output the raw JSON object."#,
        persona = config.agent.persona,
        topic = topic,
        mood = generation.mood,
        length = generation.length,
        audience = generation.audience,
        tone = generation.tone,
        year = year,
    )
}

/// Turn a raw model reply into a validated script.
///
/// Strips any markdown fencing, parses the JSON, and checks every field is
/// populated. Pure, so the reply handling is testable without a network.
pub fn parse_script(text: &str) -> Result<VideoScript, AgentError> {
    let cleaned = strip_markdown_json(text);

    let script: VideoScript =
        serde_json::from_str(&cleaned).map_err(|e| AgentError::ParseError(e.to_string()))?;

    script.validate()?;
    Ok(script)
}

/// Strip markdown code block wrappers from JSON response
fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();

    // Remove ```json ... ``` or ``` ... ```
    if trimmed.starts_with("```") {
        let without_prefix = if trimmed.starts_with("```json") {
            &trimmed[7..]
        } else {
            &trimmed[3..]
        };

        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        _ => GeminiModel::Gemini20Flash, // Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = r#"{
        "title": "The Internet in 5 Minutes: From ARPANET to Your Pocket",
        "hook": "Everything you use today started with four computers.",
        "introduction": "In this video we trace how a military research network became the internet.",
        "main_points": [
            "ARPANET sends its first message in 1969 and promptly crashes.",
            "TCP/IP unifies competing networks into one internet.",
            "The web and the browser put the internet in every home.",
            "Smartphones move it from the desk to the pocket."
        ],
        "conclusion": "That's fifty years in five minutes. Subscribe for more.",
        "tags": ["internet history", "ARPANET", "tech explained 2026"],
        "estimated_duration": "5 minutes"
    }"#;

    #[test]
    fn parses_full_reply() {
        let script = parse_script(FULL_REPLY).unwrap();
        assert_eq!(
            script.title,
            "The Internet in 5 Minutes: From ARPANET to Your Pocket"
        );
        assert_eq!(script.point_count(), 4);
        assert_eq!(script.estimated_duration, "5 minutes");
    }

    #[test]
    fn parses_fenced_reply() {
        let fenced = format!("```json\n{}\n```", FULL_REPLY);
        assert!(parse_script(&fenced).is_ok());
    }

    #[test]
    fn missing_field_is_named_in_error() {
        // Reply with no hook at all
        let reply = r#"{
            "title": "t",
            "introduction": "i",
            "main_points": ["p"],
            "conclusion": "c",
            "tags": ["tag"],
            "estimated_duration": "5 minutes"
        }"#;
        let err = parse_script(reply).unwrap_err();
        match err {
            AgentError::ParseError(msg) => assert!(msg.contains("hook"), "got: {msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn blank_field_is_a_validation_error() {
        let reply = r#"{
            "title": "t",
            "hook": "",
            "introduction": "i",
            "main_points": ["p"],
            "conclusion": "c",
            "tags": ["tag"],
            "estimated_duration": "5 minutes"
        }"#;
        let err = parse_script(reply).unwrap_err();
        match err {
            AgentError::Validation(v) => assert_eq!(v.field, "hook"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_reply_fails() {
        assert!(matches!(
            parse_script("Sorry, I can't help with that."),
            Err(AgentError::ParseError(_))
        ));
    }

    #[test]
    fn transport_error_passes_message_through() {
        let err = AgentError::RequestFailed("connection reset by peer".to_string());
        assert!(err.to_string().contains("connection reset by peer"));
    }

    #[test]
    fn strip_handles_plain_and_fenced() {
        assert_eq!(strip_markdown_json("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_markdown_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_markdown_json("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn prompt_carries_topic_and_parameters() {
        let config = Config::default();
        let prompt = build_prompt("The history of the internet", &config, 2026);
        assert!(prompt.contains("Topic: The history of the internet"));
        assert!(prompt.contains("Mood: Educational"));
        assert!(prompt.contains("2026"));
        assert!(prompt.contains("\"main_points\""));
    }
}
