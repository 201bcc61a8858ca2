//! Document tree node model.
//!
//! # Responsibility
//! - Define the wire-compatible tree node shared by validation,
//!   traversal and synthesis.
//! - Provide structural helpers (child access, inline text, emptiness).
//!
//! # Invariants
//! - Children are exclusively owned by their parent node; the model
//!   carries no parent back-references.
//! - Wire field names are `type`, `attrs`, `content`, `text`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute map carried by a node (`attrs` on the wire).
pub type AttrMap = Map<String, Value>;

/// One node of the rich-document tree.
///
/// Unknown wire fields (marks, decorations, vendor extensions) are
/// ignored on decode so documents from newer editor versions still
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    /// Node type tag, e.g. `doc`, `heading`, `taskList`, `text`.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Arbitrary per-node attributes passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<AttrMap>,
    /// Ordered child nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<DocNode>>,
    /// Inline text payload for leaf text nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DocNode {
    /// Creates an empty node with the given type tag.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            attrs: None,
            content: None,
            text: None,
        }
    }

    /// Creates a leaf `text` node.
    pub fn text_node(text: impl Into<String>) -> Self {
        let mut node = Self::new("text");
        node.text = Some(text.into());
        node
    }

    /// Replaces child content and returns the node (builder style).
    pub fn with_children(mut self, children: Vec<DocNode>) -> Self {
        self.content = Some(children);
        self
    }

    /// Replaces attributes and returns the node (builder style).
    pub fn with_attrs(mut self, attrs: AttrMap) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Returns child nodes, or an empty slice when there are none.
    pub fn children(&self) -> &[DocNode] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Returns one attribute value by key.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }

    /// Concatenates all descendant text payloads in document order.
    ///
    /// Uses an explicit worklist instead of recursion so pathologically
    /// deep subtrees cannot exhaust the call stack here; depth limits
    /// are enforced by the traversal engine.
    pub fn inline_text(&self) -> String {
        let mut buffer = String::new();
        let mut pending: Vec<&DocNode> = vec![self];

        while let Some(node) = pending.pop() {
            if let Some(text) = &node.text {
                buffer.push_str(text);
            }
            // Reverse push keeps document order under pop().
            for child in node.children().iter().rev() {
                pending.push(child);
            }
        }

        buffer.trim().to_string()
    }

    /// Returns whether this node carries no text and no children.
    ///
    /// Used as the default structural-gap predicate: an empty paragraph
    /// between a heading and a task list severs the heading context.
    pub fn is_content_empty(&self) -> bool {
        let blank_text = self
            .text
            .as_deref()
            .map(|text| text.trim().is_empty())
            .unwrap_or(true);
        blank_text && self.children().is_empty()
    }
}
