//! Extraction visitors driven by the traversal engine.
//!
//! # Responsibility
//! - Define the visitor seam between traversal and extraction.
//! - Build todo items from scattered tree fragments: aggregate text,
//!   carry heading context, emit only entries with real content.
//!
//! # Invariants
//! - At most one item is in progress at any time; entering a new
//!   container or entry discards any stale draft by construction.
//! - Heading context is attached to items by value, never by reference.
//! - A content-empty sibling seen after a heading severs the heading
//!   from later containers (gap invalidation).

use crate::model::item::{generate_item_id, ContentItem, HeadingRef, ItemKind};
use crate::model::node::{AttrMap, DocNode};
use serde_json::Value;

/// Callback seam driven by [`crate::traverse::engine::DocTraverser`].
///
/// Default implementations are no-ops so visitors only override the
/// hooks they care about.
pub trait NodeVisitor {
    /// A grouped-list container was entered.
    fn enter_list_container(&mut self, _node: &DocNode) {}

    /// A grouped-list entry was entered; its subtree follows.
    fn enter_list_entry(&mut self, _node: &DocNode) {}

    /// The descent that began at the current entry has finished.
    fn finish_list_entry(&mut self) {}

    /// A section heading node was visited.
    fn visit_heading(&mut self, _node: &DocNode) {}

    /// An inline text leaf was visited.
    fn visit_text(&mut self, _node: &DocNode) {}

    /// A content-empty structural sibling was crossed.
    fn visit_gap(&mut self) {}
}

/// In-progress todo entry being assembled across the descent.
struct TodoDraft {
    source_id: Option<String>,
    is_completed: bool,
    metadata: Option<AttrMap>,
    heading: Option<HeadingRef>,
    fragments: Vec<String>,
}

/// Stateful accumulator extracting todo items from checklist entries.
///
/// State machine: `Idle` → (entry enter) `InEntry` → (entry finish)
/// emit-or-discard → `Idle`. Malformed entries degrade to "no item";
/// they never abort sibling or ancestor processing.
#[derive(Default)]
pub struct TodoVisitor {
    items: Vec<ContentItem>,
    draft: Option<TodoDraft>,
    heading_context: Option<HeadingRef>,
    gap_pending: bool,
}

impl TodoVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns items finalized so far, in document order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Takes ownership of finalized items, leaving the visitor empty.
    pub fn take_items(&mut self) -> Vec<ContentItem> {
        std::mem::take(&mut self.items)
    }

    /// Resets all state so the visitor can drive an unrelated document.
    ///
    /// # Contract
    /// - Must be called between independent traversal runs when the
    ///   same visitor instance is reused; nothing leaks across runs.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.draft = None;
        self.heading_context = None;
        self.gap_pending = false;
    }
}

impl NodeVisitor for TodoVisitor {
    fn enter_list_container(&mut self, _node: &DocNode) {
        // An item never spans two containers.
        self.draft = None;
        if self.gap_pending {
            self.heading_context = None;
            self.gap_pending = false;
        }
    }

    fn enter_list_entry(&mut self, node: &DocNode) {
        let attrs = node.attrs.clone().unwrap_or_default();
        let source_id = attrs
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string);
        let is_completed = attrs
            .get("checked")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let metadata = passthrough_metadata(attrs);

        self.draft = Some(TodoDraft {
            source_id,
            is_completed,
            metadata,
            heading: self.heading_context.clone(),
            fragments: Vec::new(),
        });
    }

    fn finish_list_entry(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };

        let content = draft.fragments.join(" ").trim().to_string();
        if content.is_empty() {
            // Content-less entries produce no item.
            return;
        }

        let id = draft.source_id.unwrap_or_else(generate_item_id);
        let mut item = ContentItem::with_id(id, ItemKind::Todo, content);
        item.is_completed = draft.is_completed;
        item.metadata = draft.metadata;
        item.heading = draft.heading;
        self.items.push(item);
    }

    fn visit_heading(&mut self, node: &DocNode) {
        let content = node.inline_text();
        if content.is_empty() {
            // Decorative headings must not sever a valid association.
            return;
        }

        let level = node.attr("level").and_then(Value::as_i64).unwrap_or(0);
        self.heading_context = Some(HeadingRef {
            id: generate_item_id(),
            content,
            level,
        });
        self.gap_pending = false;
    }

    fn visit_text(&mut self, node: &DocNode) {
        let Some(draft) = &mut self.draft else {
            return;
        };
        if let Some(text) = &node.text {
            if !text.is_empty() {
                draft.fragments.push(text.clone());
            }
        }
    }

    fn visit_gap(&mut self) {
        self.gap_pending = true;
    }
}

/// Keeps entry attributes as item metadata, minus recognized fields.
fn passthrough_metadata(mut attrs: AttrMap) -> Option<AttrMap> {
    attrs.remove("checked");
    attrs.remove("id");
    if attrs.is_empty() {
        None
    } else {
        Some(attrs)
    }
}
