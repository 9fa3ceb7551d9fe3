//! Message and Transcript domain types.
//!
//! These are the value objects the assembler works over: the user and the
//! assistant exchange `Message`s, the chat view records them as
//! `ChatMessage`s (message plus any context attached to that turn), and a
//! `Transcript` is the ordered history for one conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::ContextItem;

/// Identifies a conversation for the lifetime of its transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    /// Mint a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an id restored from storage.
    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
///
/// There is deliberately no system speaker: the preamble is ordinary
/// human/assistant turns, and backends that want a dedicated system slot
/// get one in their wire adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The end user
    Human,
    /// The AI assistant
    Assistant,
}

impl Speaker {
    /// The lowercase wire label, also the form counted against the budget.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Human => "human",
            Speaker::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single prompt message. Immutable once handed to the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub speaker: Speaker,

    /// The text content
    pub text: String,
}

impl Message {
    /// Create a new human message.
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Human,
            text: text.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// A transcript entry: a message plus the context items that were attached
/// to that turn when it was originally sent.
///
/// Read-only to the assembler; attached context is re-offered to later
/// prompts at lower priority than the user's explicit attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(flatten)]
    pub message: Message,

    /// Context attached to this turn (empty for most turns)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_files: Vec<ContextItem>,
}

impl ChatMessage {
    /// A human turn with attached context.
    pub fn human(text: impl Into<String>, context_files: Vec<ContextItem>) -> Self {
        Self {
            message: Message::human(text),
            context_files,
        }
    }

    /// An assistant turn (never carries context).
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            message: Message::assistant(text),
            context_files: Vec::new(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.message.speaker
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }
}

/// An ordered conversation history, oldest turn first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Unique conversation ID
    pub id: ConversationId,

    /// Ordered turns, oldest first
    messages: Vec<ChatMessage>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last turn was added
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new empty transcript.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a human turn with its attached context.
    pub fn add_human(&mut self, text: impl Into<String>, context_files: Vec<ContextItem>) {
        self.push(ChatMessage::human(text, context_files));
    }

    /// Append an assistant turn.
    pub fn add_assistant(&mut self, text: impl Into<String>) {
        self.push(ChatMessage::assistant(text));
    }

    fn push(&mut self, turn: ChatMessage) {
        self.updated_at = Utc::now();
        self.messages.push(turn);
    }

    /// The turns in chronological order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
