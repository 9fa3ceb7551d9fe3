//! # Promptloom Core
//!
//! Domain types, traits, and error definitions for the Promptloom prompt
//! assembler. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! External collaborators (context retrieval, user settings) are defined as
//! traits here. Implementations live in their respective crates. This
//! enables:
//! - Swapping backends without touching assembly logic
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod context;
pub mod error;
pub mod message;
pub mod retrieval;
pub mod settings;

// Re-export key types at crate root for ergonomics
pub use context::{ContextItem, ContextItemSource, LineRange};
pub use error::{ConstructionError, RetrievalError};
pub use message::{ChatMessage, ConversationId, Message, Speaker, Transcript};
pub use retrieval::ContextRetriever;
pub use settings::{ConfigProvider, CHAT_SECTION, PRE_INSTRUCTION_KEY};
