//! Context item domain types.
//!
//! A context item is a discrete piece of grounding material (a file or a
//! retrieved snippet) offered to the assembler alongside the conversation.
//! Items carry the identity and range information the builder uses for
//! deduplication, and a pre-computed `is_too_large` hint for items that
//! could never fit a reasonable slice of the budget.

use serde::{Deserialize, Serialize};

/// Where a context item came from. Determines its priority class when a
/// batch is sorted before being offered to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextItemSource {
    /// Explicitly attached by the user (an @-mention)
    User,
    /// Taken from the editor state (open file, selection)
    Editor,
    /// Produced by a search / retrieval backend
    Search,
}

/// A 1-based, inclusive span of lines within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether two spans share at least one line.
    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A piece of auxiliary material offered to ground the assistant's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    /// Stable identity of the underlying resource (uri or path).
    /// Together with `range`, the basis for deduplication.
    pub identity: String,

    /// The material itself
    pub content: String,

    /// Which priority class this item belongs to
    pub source: ContextItemSource,

    /// Pre-computed hint: this item alone cannot fit even a generous slice
    /// of the budget. The builder rejects it without reserving anything.
    #[serde(default)]
    pub is_too_large: bool,

    /// Line span within the resource; `None` covers the whole file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<LineRange>,
}

impl ContextItem {
    /// A whole-file item.
    pub fn new(
        identity: impl Into<String>,
        content: impl Into<String>,
        source: ContextItemSource,
    ) -> Self {
        Self {
            identity: identity.into(),
            content: content.into(),
            source,
            is_too_large: false,
            range: None,
        }
    }

    /// Restrict this item to a line span.
    pub fn with_range(mut self, range: LineRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Mark this item as too large to ever fit.
    pub fn too_large(mut self) -> Self {
        self.is_too_large = true;
        self
    }

    /// Whether two items describe the same material for deduplication
    /// purposes: same identity, and their ranges collide. A rangeless item
    /// covers the whole file and collides with every span under that
    /// identity; two ranged items collide iff the spans overlap.
    pub fn collides_with(&self, other: &ContextItem) -> bool {
        if self.identity != other.identity {
            return false;
        }
        match (&self.range, &other.range) {
            (Some(a), Some(b)) => a.overlaps(b),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(identity: &str, range: Option<LineRange>) -> ContextItem {
        let mut it = ContextItem::new(identity, "content", ContextItemSource::Search);
        it.range = range;
        it
    }

    #[test]
    fn ranges_overlap_inclusively() {
        let a = LineRange::new(1, 10);
        let b = LineRange::new(10, 20);
        let c = LineRange::new(11, 20);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn different_identities_never_collide() {
        let a = item("a.rs", None);
        let b = item("b.rs", None);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn whole_file_collides_with_any_span() {
        let whole = item("a.rs", None);
        let span = item("a.rs", Some(LineRange::new(5, 9)));
        assert!(whole.collides_with(&span));
        assert!(span.collides_with(&whole));
    }

    #[test]
    fn disjoint_spans_do_not_collide() {
        let head = item("a.rs", Some(LineRange::new(1, 4)));
        let tail = item("a.rs", Some(LineRange::new(5, 9)));
        assert!(!head.collides_with(&tail));
        assert!(head.collides_with(&item("a.rs", Some(LineRange::new(4, 5)))));
    }

    #[test]
    fn context_item_serialization_roundtrip() {
        let it = ContextItem::new("src/main.rs", "fn main() {}", ContextItemSource::User)
            .with_range(LineRange::new(1, 3));
        let json = serde_json::to_string(&it).unwrap();
        assert!(json.contains("\"source\":\"user\""));

        let back: ContextItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, it);
    }
}
