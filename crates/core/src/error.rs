//! Error types for the Promptloom domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Fatal construction
//! failures are separated from collaborator failures: a budget overflow
//! during assembly is never an error (it is reported structurally as an
//! outcome), but an assembly whose preconditions do not hold fails here.

use thiserror::Error;

use crate::message::Speaker;

/// Fatal prompt-construction failures.
///
/// Each of these is a precondition violation: retrying the same call with
/// the same inputs would fail identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The system preamble alone does not fit the budget.
    #[error("Preamble length {preamble_chars} exceeded context window size {budget}")]
    PreambleTooLarge {
        preamble_chars: usize,
        budget: usize,
    },

    /// The transcript has no turns to build a prompt from.
    #[error("No message to make prompt from")]
    EmptyTranscript,

    /// The most recent turn has no text.
    #[error("Last message text was empty")]
    EmptyLastMessage,

    /// The most recent turn is not a human turn.
    #[error("Last message in prompt needs speaker \"human\", but was \"{speaker}\"")]
    LastSpeakerNotHuman { speaker: Speaker },
}

/// Failures from a context retrieval backend.
///
/// The orchestrator downgrades all of these to "no enhanced context" with a
/// warning; they are fatal only to the retriever call itself.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    #[error("Retrieval backend error: {0}")]
    Backend(String),

    #[error("Retrieval timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },
}
