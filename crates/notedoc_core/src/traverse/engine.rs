//! Node classification and depth-guarded tree traversal.
//!
//! # Responsibility
//! - Map concrete node type tags to semantic roles via configuration.
//! - Walk the tree depth-first pre-order, driving a visitor per role.
//!
//! # Invariants
//! - Children of unrecognized nodes are still visited; content can be
//!   nested arbitrarily deep under structural wrapper types.
//! - No node is visited twice; a depth ceiling turns cyclic or
//!   unbounded input into a hard error instead of a stack overflow.

use crate::model::node::DocNode;
use crate::traverse::visitor::NodeVisitor;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Semantic role of one tree node during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Section heading providing context for subsequent entries.
    Heading,
    /// Grouped-list container holding ordered entries.
    ListContainer,
    /// One grouped-list entry (the unit an item is built from).
    ListEntry,
    /// Inline text leaf.
    Text,
    /// No special action; children are still traversed.
    Unrecognized,
}

/// Configuration mapping concrete type tags to semantic roles.
///
/// Keeping the mapping as data lets new editor vocabularies plug in
/// without touching the traversal algorithm.
#[derive(Debug, Clone, Default)]
pub struct RoleMap {
    roles: BTreeMap<String, NodeRole>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generic vocabulary dispatching on base structural tags.
    pub fn base() -> Self {
        let mut map = Self::new();
        map.insert("heading", NodeRole::Heading);
        map.insert("list", NodeRole::ListContainer);
        map.insert("listItem", NodeRole::ListEntry);
        map.insert("text", NodeRole::Text);
        map
    }

    /// Task-list vocabulary used by the rich-text editor's checklists.
    pub fn task_vocabulary() -> Self {
        let mut map = Self::new();
        map.insert("heading", NodeRole::Heading);
        map.insert("taskList", NodeRole::ListContainer);
        map.insert("taskItem", NodeRole::ListEntry);
        map.insert("text", NodeRole::Text);
        map
    }

    /// Registers one tag → role mapping, replacing any previous entry.
    pub fn insert(&mut self, tag: impl Into<String>, role: NodeRole) {
        self.roles.insert(tag.into(), role);
    }

    /// Resolves the role for one type tag.
    pub fn role_of(&self, tag: &str) -> NodeRole {
        self.roles
            .get(tag)
            .copied()
            .unwrap_or(NodeRole::Unrecognized)
    }
}

/// Result type for traversal operations.
pub type TraverseResult<T> = Result<T, TraverseError>;

/// Hard traversal failure.
///
/// The only fatal condition in the extraction path: input that violates
/// the tree invariant (cyclic or unbounded nesting) exhausts the depth
/// budget instead of looping forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraverseError {
    /// Nesting depth exceeded the configured ceiling.
    DepthExceeded { limit: usize },
}

impl Display for TraverseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthExceeded { limit } => {
                write!(f, "document nesting exceeds traversal depth limit {limit}")
            }
        }
    }
}

impl Error for TraverseError {}

/// Default nesting ceiling; real documents stay far below this.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Depth-first pre-order tree walker.
pub struct DocTraverser {
    roles: RoleMap,
    max_depth: usize,
    gap_rule: fn(&DocNode) -> bool,
}

impl DocTraverser {
    /// Creates a traverser over the given role vocabulary.
    pub fn new(roles: RoleMap) -> Self {
        Self {
            roles,
            max_depth: DEFAULT_MAX_DEPTH,
            gap_rule: default_gap_rule,
        }
    }

    /// Overrides the nesting ceiling.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Overrides the structural-gap predicate.
    ///
    /// What counts as an "empty sibling" is tunable per vocabulary; the
    /// default treats any node with no text and no children as a gap.
    pub fn with_gap_rule(mut self, gap_rule: fn(&DocNode) -> bool) -> Self {
        self.gap_rule = gap_rule;
        self
    }

    /// Walks the tree, invoking the visitor per recognized role and
    /// recursing into children in original order.
    ///
    /// # Errors
    /// - [`TraverseError::DepthExceeded`] on pathological nesting.
    pub fn traverse(&self, root: &DocNode, visitor: &mut dyn NodeVisitor) -> TraverseResult<()> {
        self.visit_node(root, visitor, 0)
    }

    fn visit_node(
        &self,
        node: &DocNode,
        visitor: &mut dyn NodeVisitor,
        depth: usize,
    ) -> TraverseResult<()> {
        if depth >= self.max_depth {
            return Err(TraverseError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        let role = self.roles.role_of(&node.node_type);
        match role {
            NodeRole::Heading => visitor.visit_heading(node),
            NodeRole::ListContainer => visitor.enter_list_container(node),
            NodeRole::ListEntry => visitor.enter_list_entry(node),
            NodeRole::Text => visitor.visit_text(node),
            NodeRole::Unrecognized => {
                if (self.gap_rule)(node) {
                    visitor.visit_gap();
                }
            }
        }

        for child in node.children() {
            self.visit_node(child, visitor, depth + 1)?;
        }

        // An entry is complete once the descent that began at it ends.
        if role == NodeRole::ListEntry {
            visitor.finish_list_entry();
        }

        Ok(())
    }
}

fn default_gap_rule(node: &DocNode) -> bool {
    node.is_content_empty()
}
