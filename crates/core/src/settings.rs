//! ConfigProvider trait — read-only settings as an injected capability.
//!
//! The assembler never reads global configuration; anything it needs (the
//! chat pre-instruction, mainly) arrives through this seam. Tests supply a
//! deterministic in-memory map, production supplies the TOML-backed config.

/// A read-only view of user settings, keyed by section and key.
pub trait ConfigProvider: Send + Sync {
    /// Look up `key` within `section`. Absence is an ordinary outcome, not
    /// an error.
    fn get(&self, section: &str, key: &str) -> Option<String>;
}

/// The settings section holding chat-related keys.
pub const CHAT_SECTION: &str = "chat";

/// Extra instruction text appended to the preamble when configured.
pub const PRE_INSTRUCTION_KEY: &str = "pre_instruction";
