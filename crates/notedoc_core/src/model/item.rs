//! Extracted content item model.
//!
//! # Responsibility
//! - Define the canonical record produced by document extraction.
//! - Keep one storage shape for todo/note/checklist/heading projections.
//!
//! # Invariants
//! - `id` is unique within one extraction run and never reused.
//! - Items are immutable after extraction except for append-only
//!   metadata enrichment.

use crate::model::node::AttrMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unified category for extracted content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Checklist entry with completion state.
    Todo,
    /// Free-form text note.
    Note,
    /// Whole checklist captured as one item.
    Checklist,
    /// Section heading captured as one item.
    Heading,
}

/// Section-heading context attached to items extracted beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRef {
    /// Identifier minted when the heading was visited.
    pub id: String,
    /// Heading text content.
    pub content: String,
    /// Numeric heading level (`0` when the source carries none).
    pub level: i64,
}

/// Canonical record for content extracted from a document tree.
///
/// Projection-specific fields stay optional so one shape can carry all
/// item kinds without copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Identifier unique within one extraction run.
    pub id: String,
    /// Serialized as `type` to match the external item schema.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Semantic text body, fragments joined and trimmed.
    pub content: String,
    /// Completion flag. Meaningful only when `kind == ItemKind::Todo`.
    pub is_completed: bool,
    /// Source attributes passed through verbatim, minus recognized fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AttrMap>,
    /// Nearest valid section heading at extraction time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<HeadingRef>,
}

impl ContentItem {
    /// Creates an item with a generated identifier.
    pub fn new(kind: ItemKind, content: impl Into<String>) -> Self {
        Self::with_id(generate_item_id(), kind, content)
    }

    /// Creates an item with a caller-provided identifier.
    ///
    /// Used when the source node already carries a stable id.
    pub fn with_id(id: impl Into<String>, kind: ItemKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            is_completed: false,
            metadata: None,
            heading: None,
        }
    }

    /// Creates a todo item with the given completion state.
    pub fn todo(content: impl Into<String>, is_completed: bool) -> Self {
        let mut item = Self::new(ItemKind::Todo, content);
        item.is_completed = is_completed;
        item
    }

    /// Returns one metadata value as a string, when present.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get(key))
            .and_then(Value::as_str)
    }

    /// Sets one metadata entry, creating the map on first use.
    ///
    /// # Contract
    /// - Append-only enrichment path (e.g. source provenance tags);
    ///   existing unrelated entries are preserved.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata
            .get_or_insert_with(AttrMap::new)
            .insert(key.into(), value);
    }
}

/// Generates a collision-resistant item identifier.
///
/// Uniqueness within one extraction run is the only contract; the
/// concrete format is not.
pub fn generate_item_id() -> String {
    Uuid::new_v4().simple().to_string()
}
