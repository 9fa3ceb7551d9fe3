//! Character budget accounting.
//!
//! Prompts are sized in rendered characters as a deliberate approximation of
//! token count: close enough for budget enforcement, cheap enough to compute
//! on every candidate item. Lengths are Unicode scalar counts, not bytes, so
//! multibyte text is not over-charged.

use promptloom_core::message::Message;

/// Per-message rendering overhead (speaker separator plus blank line in the
/// rendered wire form), charged on top of label and text.
pub const MESSAGE_OVERHEAD_CHARS: usize = 3;

/// Rendered character count of a text fragment.
pub fn text_chars(text: &str) -> usize {
    text.chars().count()
}

/// Rendered character count of a message: speaker label + text + overhead.
pub fn message_chars(message: &Message) -> usize {
    message.speaker.label().len() + text_chars(&message.text) + MESSAGE_OVERHEAD_CHARS
}

/// Tracks remaining prompt capacity. Pure accounting, no I/O.
///
/// Every accepted message decrements `remaining` by its rendered length;
/// `remaining` never goes negative. An item that would overdraw is rejected
/// whole, never partially admitted.
#[derive(Debug, Clone)]
pub struct BudgetLedger {
    capacity: usize,
    remaining: usize,
}

impl BudgetLedger {
    /// A fresh ledger with the full capacity available.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            remaining: capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Characters reserved so far.
    pub fn used(&self) -> usize {
        self.capacity - self.remaining
    }

    /// Reserve `chars` if they fit. Returns false and leaves the ledger
    /// unchanged otherwise.
    pub fn reserve(&mut self, chars: usize) -> bool {
        if chars <= self.remaining {
            self.remaining -= chars;
            true
        } else {
            false
        }
    }

    /// Return a prior reservation to the pool, saturating at capacity.
    /// Supports prefix replacement only.
    pub(crate) fn release(&mut self, chars: usize) {
        self.remaining = (self.remaining + chars).min(self.capacity);
    }
}
