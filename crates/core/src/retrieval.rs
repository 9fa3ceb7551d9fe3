//! ContextRetriever trait — the abstraction over enhanced-context backends.
//!
//! A retriever knows how to turn the user's latest question into candidate
//! context items, whether from a workspace symbol index or an embeddings
//! search. The assembler consumes it purely as `query, budget -> items` and
//! never sees the mechanism.
//!
//! Contract notes for implementors:
//! - The `char_budget` is a sizing hint. Returning more material than fits
//!   is allowed; the builder rejects the overflow.
//! - Errors are not fatal upstream: the orchestrator degrades to zero items.

use async_trait::async_trait;

use crate::context::ContextItem;
use crate::error::RetrievalError;

/// An enhanced-context source.
///
/// Implementations live outside this crate; the orchestrator holds one as
/// `Arc<dyn ContextRetriever>` and calls it at most once per assembly.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// A human-readable name for this retriever (used in logs).
    fn name(&self) -> &str;

    /// Retrieve candidate items for `query`, sized to roughly fit
    /// `char_budget` rendered characters.
    async fn retrieve(
        &self,
        query: &str,
        char_budget: usize,
    ) -> std::result::Result<Vec<ContextItem>, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextItemSource;

    struct FixedRetriever {
        items: Vec<ContextItem>,
    }

    #[async_trait]
    impl ContextRetriever for FixedRetriever {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn retrieve(
            &self,
            _query: &str,
            _char_budget: usize,
        ) -> std::result::Result<Vec<ContextItem>, RetrievalError> {
            Ok(self.items.clone())
        }
    }

    #[tokio::test]
    async fn retriever_is_object_safe() {
        let retriever: std::sync::Arc<dyn ContextRetriever> =
            std::sync::Arc::new(FixedRetriever {
                items: vec![ContextItem::new(
                    "src/hit.rs",
                    "fn hit() {}",
                    ContextItemSource::Search,
                )],
            });

        let items = retriever.retrieve("how does hit work", 1000).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(retriever.name(), "fixed");
    }
}
