//! Anthropic wire mapping.
//!
//! The Messages API requires strict user/assistant alternation. Assembled
//! prompts carry context as runs of consecutive human turns, so runs of
//! the same role are merged into one message with a blank line between
//! the texts.

use promptloom_core::message::{Message, Speaker};
use serde::{Deserialize, Serialize};

/// A single message in Anthropic wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

/// Maps an assembled prompt to Anthropic wire messages.
///
/// `human` becomes `user`, `assistant` stays `assistant`, and consecutive
/// messages with the same role collapse into one.
pub fn to_anthropic_messages(messages: &[Message]) -> Vec<AnthropicMessage> {
    let mut wire: Vec<AnthropicMessage> = Vec::new();

    for message in messages {
        let role = match message.speaker {
            Speaker::Human => "user",
            Speaker::Assistant => "assistant",
        };

        match wire.last_mut() {
            Some(last) if last.role == role => {
                last.content.push_str("\n\n");
                last.content.push_str(&message.text);
            }
            _ => wire.push(AnthropicMessage {
                role: role.to_string(),
                content: message.text.clone(),
            }),
        }
    }

    wire
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_speakers_to_anthropic_roles() {
        let prompt = vec![
            Message::human("what does the ledger do?"),
            Message::assistant("it tracks the remaining character budget"),
        ];

        let wire = to_anthropic_messages(&prompt);

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "user");
        assert_eq!(wire[1].role, "assistant");
    }

    #[test]
    fn merges_consecutive_human_turns() {
        let prompt = vec![
            Message::human("Context from src/lib.rs:\npub fn run() {}"),
            Message::human("Context from src/main.rs:\nfn main() {}"),
            Message::human("what do these share?"),
        ];

        let wire = to_anthropic_messages(&prompt);

        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, "user");
        assert_eq!(
            wire[0].content,
            "Context from src/lib.rs:\npub fn run() {}\n\n\
             Context from src/main.rs:\nfn main() {}\n\n\
             what do these share?"
        );
    }

    #[test]
    fn alternating_prompt_is_unchanged() {
        let prompt = vec![
            Message::human("You are a coding assistant."),
            Message::assistant("Understood."),
            Message::human("hello"),
        ];

        let wire = to_anthropic_messages(&prompt);

        assert_eq!(wire.len(), 3);
        assert_eq!(wire[2].content, "hello");
    }

    #[test]
    fn serializes_to_messages_api_shape() {
        let wire = to_anthropic_messages(&[Message::human("hi")]);

        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "role": "user", "content": "hi" }
            ])
        );
    }
}
