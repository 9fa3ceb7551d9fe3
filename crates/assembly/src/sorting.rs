//! Context ordering policy.
//!
//! A batch of context items is sorted before it is offered to the builder so
//! that higher-value items are tried first and preferentially retained when
//! the budget runs out. The sort is stable and consults nothing beyond the
//! items themselves: identical input snapshots always produce identical
//! orderings. Deduplication is not done here — the builder enforces it at
//! accept time.

use promptloom_core::context::{ContextItem, ContextItemSource};

/// Stable-order a batch by source class: user attachments first, then
/// editor-derived items, then search results. Within a class the supplied
/// order (the retrieval collaborator's rank) is preserved.
pub fn sort_context_items(items: &mut [ContextItem]) {
    items.sort_by_key(|item| source_rank(item.source));
}

fn source_rank(source: ContextItemSource) -> u8 {
    match source {
        ContextItemSource::User => 0,
        ContextItemSource::Editor => 1,
        ContextItemSource::Search => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(identity: &str, source: ContextItemSource) -> ContextItem {
        ContextItem::new(identity, "content", source)
    }

    #[test]
    fn user_items_sort_ahead_of_editor_and_search() {
        let mut items = vec![
            item("search-hit.rs", ContextItemSource::Search),
            item("open-file.rs", ContextItemSource::Editor),
            item("mention.rs", ContextItemSource::User),
        ];
        sort_context_items(&mut items);

        assert_eq!(items[0].identity, "mention.rs");
        assert_eq!(items[1].identity, "open-file.rs");
        assert_eq!(items[2].identity, "search-hit.rs");
    }

    #[test]
    fn retrieval_rank_preserved_within_a_class() {
        let mut items = vec![
            item("first-hit.rs", ContextItemSource::Search),
            item("second-hit.rs", ContextItemSource::Search),
            item("third-hit.rs", ContextItemSource::Search),
        ];
        sort_context_items(&mut items);

        let identities: Vec<&str> = items.iter().map(|i| i.identity.as_str()).collect();
        assert_eq!(identities, ["first-hit.rs", "second-hit.rs", "third-hit.rs"]);
    }

    #[test]
    fn sorting_is_deterministic_for_identical_snapshots() {
        let snapshot = vec![
            item("b.rs", ContextItemSource::Search),
            item("a.rs", ContextItemSource::User),
            item("c.rs", ContextItemSource::Search),
            item("d.rs", ContextItemSource::Editor),
        ];

        let mut once = snapshot.clone();
        let mut twice = snapshot;
        sort_context_items(&mut once);
        sort_context_items(&mut twice);
        assert_eq!(once, twice);
    }
}
