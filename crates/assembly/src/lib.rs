//! # Promptloom Assembly
//!
//! The budget-tracking prompt builder and the orchestration policy that
//! feeds it. Given a character budget, a conversation transcript, and
//! competing sources of context, this crate decides deterministically what
//! makes it into the prompt and reports exactly what was dropped.
//!
//! ## Components
//!
//! - [`budget`] — the character ledger and rendered-length accounting
//! - [`builder`] — incremental all-or-nothing prompt construction
//! - [`sorting`] — deterministic ordering of context batches
//! - [`preamble`] — version-gated system preamble construction
//! - [`prompter`] — the fixed-priority pipeline tying it all together

pub mod budget;
pub mod builder;
pub mod preamble;
pub mod prompter;
pub mod sorting;

pub use budget::{message_chars, text_chars, BudgetLedger, MESSAGE_OVERHEAD_CHARS};
pub use builder::{ContextOutcome, PromptBuilder};
pub use preamble::{simple_preamble, ASSISTANT_ACK, ASSISTANT_INTRO};
pub use prompter::{DefaultPrompter, PromptInfo, Prompter, ENHANCED_CONTEXT_ALLOCATION};
pub use sorting::sort_context_items;

#[cfg(test)]
pub(crate) mod test_helpers;
