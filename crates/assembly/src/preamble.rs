//! System preamble construction.
//!
//! The preamble establishes the assistant's identity and is the highest
//! priority content in every prompt. Its shape depends on the backend
//! protocol version: version 0 targets legacy chat backends that need the
//! human/assistant alternation seeded with an acknowledgement turn, while
//! versions 1 and up take a single human instruction (modern backends hoist
//! it themselves, and the echo turn is wasted budget).

use promptloom_core::message::Message;

/// The base identity instruction.
pub const ASSISTANT_INTRO: &str = "You are Loom, an AI coding assistant.";

/// The assistant acknowledgement used by the version-0 preamble pair.
pub const ASSISTANT_ACK: &str = "I am Loom, an AI coding assistant.";

/// Build the preamble for `api_version`. A configured pre-instruction is
/// appended to the base instruction after a single separating space; an
/// empty one is treated as absent.
pub fn simple_preamble(api_version: u32, pre_instruction: Option<&str>) -> Vec<Message> {
    let intro = match pre_instruction {
        Some(extra) if !extra.is_empty() => format!("{ASSISTANT_INTRO} {extra}"),
        _ => ASSISTANT_INTRO.to_string(),
    };

    if api_version >= 1 {
        vec![Message::human(intro)]
    } else {
        vec![Message::human(intro), Message::assistant(ASSISTANT_ACK)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptloom_core::message::Speaker;

    #[test]
    fn version_zero_emits_the_instruction_and_ack_pair() {
        let preamble = simple_preamble(0, None);
        assert_eq!(preamble.len(), 2);
        assert_eq!(preamble[0].speaker, Speaker::Human);
        assert_eq!(preamble[0].text, "You are Loom, an AI coding assistant.");
        assert_eq!(preamble[1].speaker, Speaker::Assistant);
        assert_eq!(preamble[1].text, "I am Loom, an AI coding assistant.");
    }

    #[test]
    fn version_one_emits_a_single_human_instruction() {
        let preamble = simple_preamble(1, None);
        assert_eq!(preamble.len(), 1);
        assert_eq!(preamble[0].speaker, Speaker::Human);
    }

    #[test]
    fn pre_instruction_joined_with_one_space() {
        let preamble = simple_preamble(0, Some("Always respond with 🧀 emojis"));
        assert_eq!(
            preamble[0].text,
            "You are Loom, an AI coding assistant. Always respond with 🧀 emojis"
        );
    }

    #[test]
    fn empty_pre_instruction_treated_as_absent() {
        let preamble = simple_preamble(0, Some(""));
        assert_eq!(preamble[0].text, ASSISTANT_INTRO);
    }
}
