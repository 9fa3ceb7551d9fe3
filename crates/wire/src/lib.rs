//! # Promptloom Wire
//!
//! Pure mappings from an assembled prompt to per-backend wire schemas.
//! Role renaming and trailing-role rules live here, never in the
//! assembler, so the same prompt can be replayed against any backend.
//! No transport: callers own the HTTP.

pub mod anthropic;
pub mod gemini;

pub use anthropic::{to_anthropic_messages, AnthropicMessage};
pub use gemini::{to_gemini_messages, GeminiMessage, GeminiPart};
