//! Tree-fragment synthesis from content items.
//!
//! # Responsibility
//! - Turn structured items back into canonical document fragments.
//! - Select a construction rule per item: first match wins, with a
//!   mandatory fallback that handles every item.
//!
//! # Invariants
//! - Synthesis always produces a canonical minimal shape; byte-level
//!   round-trips with arbitrary source trees are not a contract.
//! - Re-extracting a synthesized todo reproduces its content and
//!   completion flag.

use crate::model::item::{ContentItem, ItemKind};
use crate::model::node::{AttrMap, DocNode};
use serde_json::Value;

/// One fragment-construction rule.
pub trait NodeCreationStrategy {
    /// Whether this strategy can build a fragment for the item.
    fn can_handle(&self, item: &ContentItem) -> bool;

    /// Builds the fragment. Only called when [`Self::can_handle`] holds.
    fn create_node(&self, item: &ContentItem) -> DocNode;
}

/// Fallback rule wrapping any item's content as a plain paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNodeCreationStrategy;

impl NodeCreationStrategy for DefaultNodeCreationStrategy {
    fn can_handle(&self, _item: &ContentItem) -> bool {
        true
    }

    fn create_node(&self, item: &ContentItem) -> DocNode {
        DocNode::new("paragraph").with_children(vec![DocNode::text_node(item.content.clone())])
    }
}

/// Todo rule producing a one-entry task list.
///
/// The entry's attributes carry the completion flag merged over the
/// item's metadata; the text content sits under a nested paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoNodeCreationStrategy;

impl NodeCreationStrategy for TodoNodeCreationStrategy {
    fn can_handle(&self, item: &ContentItem) -> bool {
        item.kind == ItemKind::Todo
    }

    fn create_node(&self, item: &ContentItem) -> DocNode {
        let mut attrs = item.metadata.clone().unwrap_or_default();
        attrs.insert("checked".to_string(), Value::Bool(item.is_completed));

        let entry = DocNode::new("taskItem")
            .with_attrs(attrs)
            .with_children(vec![DocNode::new("paragraph")
                .with_children(vec![DocNode::text_node(item.content.clone())])]);

        DocNode::new("taskList").with_children(vec![entry])
    }
}

/// Ordered strategy list with a guaranteed fallback.
pub struct StrategySet {
    strategies: Vec<Box<dyn NodeCreationStrategy>>,
    fallback: DefaultNodeCreationStrategy,
}

impl Default for StrategySet {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategySet {
    /// Creates a set containing only the fallback rule.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            fallback: DefaultNodeCreationStrategy,
        }
    }

    /// Creates a set with todo support registered first.
    pub fn with_todo_support() -> Self {
        let mut set = Self::new();
        set.register(Box::new(TodoNodeCreationStrategy));
        set
    }

    /// Appends one strategy; earlier registrations win ties.
    pub fn register(&mut self, strategy: Box<dyn NodeCreationStrategy>) {
        self.strategies.push(strategy);
    }

    /// Builds one fragment, using the first matching strategy.
    pub fn create_node(&self, item: &ContentItem) -> DocNode {
        self.strategies
            .iter()
            .find(|strategy| strategy.can_handle(item))
            .map(|strategy| strategy.create_node(item))
            .unwrap_or_else(|| self.fallback.create_node(item))
    }

    /// Combines per-item fragments into one `doc`-rooted tree, keeping
    /// input order.
    pub fn create_document(&self, items: &[ContentItem]) -> DocNode {
        DocNode::new("doc")
            .with_children(items.iter().map(|item| self.create_node(item)).collect())
    }
}
