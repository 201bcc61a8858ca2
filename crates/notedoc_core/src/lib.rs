//! Core extraction, grouping and synthesis logic for NoteDoc.
//! This crate is the single source of truth for document-tree
//! traversal semantics.

pub mod filter;
pub mod group;
pub mod logging;
pub mod model;
pub mod service;
pub mod synthesize;
pub mod traverse;
pub mod validate;

pub use filter::{ContentFilter, UncompletedTodoFilter};
pub use group::{
    group_items, DateGroupingStrategy, GroupKey, GroupingStrategy, GroupingStrategySet,
    HeadingGroupingStrategy, SortValue, TodoGroup, UNKNOWN_KEY_PART,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{generate_item_id, ContentItem, HeadingRef, ItemKind};
pub use model::node::{AttrMap, DocNode};
pub use service::todo_service::TodoService;
pub use synthesize::{
    DefaultNodeCreationStrategy, NodeCreationStrategy, StrategySet, TodoNodeCreationStrategy,
};
pub use traverse::engine::{
    DocTraverser, NodeRole, RoleMap, TraverseError, TraverseResult, DEFAULT_MAX_DEPTH,
};
pub use traverse::visitor::{NodeVisitor, TodoVisitor};
pub use validate::{DocValidator, ValidationOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
