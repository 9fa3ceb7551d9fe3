//! Gemini wire mapping.
//!
//! The `generateContent` API speaks `user`/`model` roles with a `parts`
//! array per message, and rejects requests whose final message is
//! model-authored.

use promptloom_core::message::{Message, Speaker};
use serde::{Deserialize, Serialize};

/// One text part of a Gemini message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

/// A single message in Gemini wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiMessage {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

/// Maps an assembled prompt to Gemini wire messages.
///
/// `human` becomes `user` and `assistant` becomes `model`. A trailing
/// model message is dropped because the API requires the conversation
/// to end on a user turn.
pub fn to_gemini_messages(messages: &[Message]) -> Vec<GeminiMessage> {
    let mut wire: Vec<GeminiMessage> = messages
        .iter()
        .map(|message| GeminiMessage {
            role: match message.speaker {
                Speaker::Human => "user".to_string(),
                Speaker::Assistant => "model".to_string(),
            },
            parts: vec![GeminiPart {
                text: message.text.clone(),
            }],
        })
        .collect();

    if wire.last().is_some_and(|last| last.role == "model") {
        wire.pop();
    }

    wire
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_speakers_to_gemini_roles() {
        let prompt = vec![
            Message::human("where is the parser?"),
            Message::assistant("in src/parse.rs"),
            Message::human("show me"),
        ];

        let wire = to_gemini_messages(&prompt);

        assert_eq!(wire.len(), 3);
        assert_eq!(wire[0].role, "user");
        assert_eq!(wire[1].role, "model");
        assert_eq!(wire[2].role, "user");
        assert_eq!(wire[2].parts[0].text, "show me");
    }

    #[test]
    fn drops_trailing_model_message() {
        let prompt = vec![
            Message::human("hello"),
            Message::assistant("hi, how can I help?"),
        ];

        let wire = to_gemini_messages(&prompt);

        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, "user");
    }

    #[test]
    fn keeps_trailing_user_message() {
        let prompt = vec![
            Message::assistant("I am ready."),
            Message::human("good, let's begin"),
        ];

        let wire = to_gemini_messages(&prompt);

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[1].role, "user");
    }

    #[test]
    fn empty_prompt_maps_to_empty_request() {
        assert!(to_gemini_messages(&[]).is_empty());
    }

    #[test]
    fn serializes_to_generate_content_shape() {
        let wire = to_gemini_messages(&[Message::human("hi")]);

        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "role": "user", "parts": [{ "text": "hi" }] }
            ])
        );
    }
}
