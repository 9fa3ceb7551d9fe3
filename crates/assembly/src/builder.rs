//! Prompt builder — incremental, all-or-nothing assembly under a character
//! budget.
//!
//! The builder owns two ordered regions:
//!
//! 1. **Prefix** — the system preamble, installed first and once
//! 2. **Reversed region** — transcript turns accepted newest-first, plus one
//!    synthetic human turn per accepted context item
//!
//! `build()` emits the prefix followed by the reversed region flipped back to
//! chronological order. Recency is priority, output is oldest-first; the
//! two-phase reverse construction is the invariant that reconciles the two.
//!
//! Every try-add operation is all-or-nothing per offered item: an item that
//! would overdraw the ledger is rejected whole and reported, never partially
//! admitted. A builder serves exactly one assembly call and is then
//! discarded.

use promptloom_core::context::ContextItem;
use promptloom_core::message::{ChatMessage, Message, Speaker};
use serde::{Deserialize, Serialize};

use crate::budget::{message_chars, BudgetLedger};

// ── Types ─────────────────────────────────────────────────────────────────

/// Outcome of offering a batch of context items to the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextOutcome {
    /// At least one non-duplicate item was rejected for budget reasons.
    pub limit_reached: bool,
    /// Items admitted into the prompt, in the order accepted.
    pub used: Vec<ContextItem>,
    /// Items rejected for size (too large, per-call cap, or ledger).
    pub ignored: Vec<ContextItem>,
    /// Items already present in the prompt under the same identity/range.
    pub duplicate: Vec<ContextItem>,
}

// ── Builder ───────────────────────────────────────────────────────────────

/// Assembles one bounded prompt. Create fresh per assembly call.
pub struct PromptBuilder {
    ledger: BudgetLedger,
    prefix: Vec<Message>,
    prefix_chars: usize,
    reverse_messages: Vec<Message>,
    seen_context: Vec<ContextItem>,
}

impl PromptBuilder {
    /// A fresh builder with `char_budget` characters of capacity.
    pub fn new(char_budget: usize) -> Self {
        Self {
            ledger: BudgetLedger::new(char_budget),
            prefix: Vec::new(),
            prefix_chars: 0,
            reverse_messages: Vec::new(),
            seen_context: Vec::new(),
        }
    }

    /// Remaining capacity in rendered characters.
    pub fn remaining_chars(&self) -> usize {
        self.ledger.remaining()
    }

    /// Characters reserved so far across all regions.
    pub fn chars_used(&self) -> usize {
        self.ledger.used()
    }

    /// Install `messages` as the system prefix, replacing any previous
    /// prefix and its reservation. The candidate is reserved in one shot;
    /// on failure the prefix is left empty and the other regions are
    /// untouched. Intended to be called once, first — a prompt without its
    /// preamble is not viable, so callers treat failure as fatal.
    pub fn try_add_to_prefix(&mut self, messages: Vec<Message>) -> bool {
        let needed: usize = messages.iter().map(message_chars).sum();

        self.ledger.release(self.prefix_chars);
        self.prefix.clear();
        self.prefix_chars = 0;

        if !self.ledger.reserve(needed) {
            return false;
        }
        self.prefix = messages;
        self.prefix_chars = needed;
        true
    }

    /// Add transcript turns, newest first, stopping at the first turn that
    /// does not fit — older history is never searched for a smaller turn to
    /// squeeze in. Returns how many turns from the tail (the oldest) were
    /// not included.
    ///
    /// Leading assistant turns in the input would trail the built prompt
    /// with an unanswered model turn, which downstream backends reject;
    /// they are skipped and do not count toward the returned tally.
    pub fn try_add_messages(&mut self, newest_first: &[ChatMessage]) -> usize {
        let start = newest_first
            .iter()
            .position(|turn| turn.speaker() == Speaker::Human)
            .unwrap_or(newest_first.len());
        let candidates = &newest_first[start..];

        for (offset, turn) in candidates.iter().enumerate() {
            if !self.ledger.reserve(message_chars(&turn.message)) {
                return candidates.len() - offset;
            }
            self.reverse_messages.push(turn.message.clone());
        }
        0
    }

    /// Offer a batch of context items, in the order supplied. Every item is
    /// examined; rejection of one does not stop the walk. Callers that need
    /// priority-by-relevance must pre-sort the batch.
    ///
    /// Per item, in order: an item colliding with one already admitted (same
    /// identity, overlapping range) lands in `duplicate`; an `is_too_large`
    /// item lands in `ignored`; an item whose rendered turn would push this
    /// call past `per_call_budget` lands in `ignored` even when the overall
    /// ledger has room; an item the ledger cannot cover lands in `ignored`.
    /// Accepted items become one synthetic human turn each in the reversed
    /// region.
    pub fn try_add_context(
        &mut self,
        items: &[ContextItem],
        per_call_budget: Option<usize>,
    ) -> ContextOutcome {
        let mut outcome = ContextOutcome::default();
        let used_at_entry = self.ledger.used();

        for item in items {
            if self
                .seen_context
                .iter()
                .any(|seen| item.collides_with(seen))
            {
                outcome.duplicate.push(item.clone());
                continue;
            }
            if item.is_too_large {
                outcome.ignored.push(item.clone());
                outcome.limit_reached = true;
                continue;
            }

            let rendered = render_context_item(item);
            let needed = rendered.as_ref().map(message_chars).unwrap_or(0);

            if let Some(cap) = per_call_budget {
                let call_used = self.ledger.used() - used_at_entry;
                if call_used + needed > cap {
                    outcome.ignored.push(item.clone());
                    outcome.limit_reached = true;
                    continue;
                }
            }
            if !self.ledger.reserve(needed) {
                outcome.ignored.push(item.clone());
                outcome.limit_reached = true;
                continue;
            }

            self.seen_context.push(item.clone());
            if let Some(message) = rendered {
                self.reverse_messages.push(message);
            }
            outcome.used.push(item.clone());
        }

        outcome
    }

    /// The assembled prompt: prefix messages, then the reversed region in
    /// chronological (oldest-first) order. Pure and repeatable — calling it
    /// twice with no intervening try-add yields equal sequences.
    pub fn build(&self) -> Vec<Message> {
        self.prefix
            .iter()
            .cloned()
            .chain(self.reverse_messages.iter().rev().cloned())
            .collect()
    }
}

/// Render an accepted item as its synthetic human turn. Items with no
/// usable content produce no turn but still count as used (and recorded
/// for dedup).
fn render_context_item(item: &ContextItem) -> Option<Message> {
    if item.content.trim().is_empty() {
        return None;
    }
    let text = match &item.range {
        Some(range) => format!(
            "Context from {} (lines {}):\n{}",
            item.identity, range, item.content
        ),
        None => format!("Context from {}:\n{}", item.identity, item.content),
    };
    Some(Message::human(text))
}

// ── Tests ─────────────────────────────────────────────────────────────────
