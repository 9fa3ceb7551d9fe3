//! Prompter — the fixed-priority assembly pipeline.
//!
//! Sequences builder calls so that when the budget is tight, content is
//! sacrificed from the bottom of this list first:
//!
//! 1. **Preamble** (assistant identity + configured pre-instruction)
//! 2. **Transcript** (newest turns win)
//! 3. **Explicit context** (the user's attachments)
//! 4. **Prior-turn context** (inherited from earlier turns)
//! 5. **Enhanced context** (freshly retrieved, capped at a fraction of the
//!    window)
//!
//! Structure beats intent beats inheritance beats retrieval. Once a stage
//! overflows, later stages are skipped entirely — except the last, which
//! has nothing after it to protect.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use promptloom_core::context::ContextItem;
use promptloom_core::error::ConstructionError;
use promptloom_core::message::{ChatMessage, Message, Speaker, Transcript};
use promptloom_core::retrieval::ContextRetriever;
use promptloom_core::settings::{ConfigProvider, CHAT_SECTION, PRE_INSTRUCTION_KEY};

use crate::budget::message_chars;
use crate::builder::PromptBuilder;
use crate::preamble::simple_preamble;
use crate::sorting::sort_context_items;

/// Fraction of the total budget that freshly retrieved context may occupy.
/// A cap, not a reservation: earlier stages are never constrained by it.
pub const ENHANCED_CONTEXT_ALLOCATION: f64 = 0.6;

/// The assembled prompt plus the context bookkeeping callers surface to
/// the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptInfo {
    /// Ordered messages, oldest first. Never exceeds the budget.
    pub prompt: Vec<Message>,

    /// Context newly admitted by this assembly (explicit and retrieved).
    pub new_context_used: Vec<ContextItem>,

    /// Explicit attachments dropped for budget reasons, reported so the
    /// caller can tell the user. Present only when that stage overflowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_context_ignored: Option<Vec<ContextItem>>,
}

/// Strategy seam for prompt assembly.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Assemble a prompt from a transcript snapshot under `char_budget`.
    async fn make_prompt(
        &self,
        transcript: &Transcript,
        api_version: u32,
        char_budget: usize,
    ) -> Result<PromptInfo, ConstructionError>;
}

/// The standard pipeline. Holds the per-turn explicit attachments and the
/// collaborators it consults; a fresh builder is created inside every
/// `make_prompt` call, so one prompter can serve concurrent calls.
pub struct DefaultPrompter {
    explicit_context: Vec<ContextItem>,
    retriever: Option<Arc<dyn ContextRetriever>>,
    settings: Arc<dyn ConfigProvider>,
}

impl DefaultPrompter {
    /// A prompter for one turn: the user's explicit attachments plus the
    /// settings used to read the chat pre-instruction.
    pub fn new(explicit_context: Vec<ContextItem>, settings: Arc<dyn ConfigProvider>) -> Self {
        Self {
            explicit_context,
            retriever: None,
            settings,
        }
    }

    /// Attach an enhanced-context retriever.
    pub fn with_retriever(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }
}

#[async_trait]
impl Prompter for DefaultPrompter {
    async fn make_prompt(
        &self,
        transcript: &Transcript,
        api_version: u32,
        char_budget: usize,
    ) -> Result<PromptInfo, ConstructionError> {
        let enhanced_budget = (char_budget as f64 * ENHANCED_CONTEXT_ALLOCATION) as usize;
        let mut builder = PromptBuilder::new(char_budget);

        // ── Stage 1: Preamble ──
        let pre_instruction = self.settings.get(CHAT_SECTION, PRE_INSTRUCTION_KEY);
        let preamble = simple_preamble(api_version, pre_instruction.as_deref());
        let preamble_chars: usize = preamble.iter().map(message_chars).sum();
        if !builder.try_add_to_prefix(preamble) {
            return Err(ConstructionError::PreambleTooLarge {
                preamble_chars,
                budget: char_budget,
            });
        }

        // ── Stage 2: Transcript, newest first ──
        let reverse_transcript: Vec<ChatMessage> =
            transcript.messages().iter().rev().cloned().collect();
        let ignored_turns = builder.try_add_messages(&reverse_transcript);
        if ignored_turns > 0 {
            warn!(
                ignored = ignored_turns,
                budget = char_budget,
                "transcript truncated, context stages skipped"
            );
            return Ok(PromptInfo {
                prompt: builder.build(),
                new_context_used: Vec::new(),
                new_context_ignored: None,
            });
        }

        // ── Stage 3: Explicit user context ──
        let mut new_context_used = Vec::new();
        let outcome = builder.try_add_context(&self.explicit_context, None);
        new_context_used.extend(outcome.used);
        if outcome.limit_reached {
            warn!(
                ignored = outcome.ignored.len(),
                "explicit context exceeded budget"
            );
            return Ok(PromptInfo {
                prompt: builder.build(),
                new_context_used,
                new_context_ignored: Some(outcome.ignored),
            });
        }

        // ── Stage 4: Context inherited from prior turns, newest first ──
        let prior_context: Vec<ContextItem> = reverse_transcript
            .iter()
            .flat_map(|turn| turn.context_files.iter().cloned())
            .collect();
        let outcome = builder.try_add_context(&prior_context, None);
        if outcome.limit_reached {
            debug!(
                ignored = outcome.ignored.len(),
                "prior-turn context exceeded budget"
            );
            return Ok(PromptInfo {
                prompt: builder.build(),
                new_context_used,
                new_context_ignored: None,
            });
        }

        // ── Stage 5: Validate the pending turn ──
        let last = transcript.last().ok_or(ConstructionError::EmptyTranscript)?;
        if last.text().is_empty() {
            return Err(ConstructionError::EmptyLastMessage);
        }
        if last.speaker() != Speaker::Human {
            return Err(ConstructionError::LastSpeakerNotHuman {
                speaker: last.speaker(),
            });
        }

        // ── Stage 6: Enhanced retrieval, capped ──
        if let Some(retriever) = &self.retriever {
            let mut items = match retriever.retrieve(last.text(), enhanced_budget).await {
                Ok(items) => items,
                Err(error) => {
                    warn!(
                        retriever = retriever.name(),
                        %error,
                        "enhanced context retrieval failed, continuing without"
                    );
                    Vec::new()
                }
            };
            sort_context_items(&mut items);

            let outcome = builder.try_add_context(&items, Some(enhanced_budget));
            new_context_used.extend(outcome.used);
            if outcome.limit_reached {
                // Last stage: nothing left to skip, the drop is only logged.
                debug!(
                    ignored = outcome.ignored.len(),
                    allocation = enhanced_budget,
                    "enhanced context hit its allocation"
                );
            }
        }

        debug!(
            chars_used = builder.chars_used(),
            budget = char_budget,
            context_used = new_context_used.len(),
            "prompt assembled"
        );

        Ok(PromptInfo {
            prompt: builder.build(),
            new_context_used,
            new_context_ignored: None,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
