//! Todo extraction use-case service.
//!
//! # Responsibility
//! - Provide the stable entry points callers use: validate+extract,
//!   batch source processing, grouping and document synthesis.
//! - Keep traversal, strategy and filter wiring behind one facade.
//!
//! # Invariants
//! - Each extraction run uses a fresh accumulator; no state leaks
//!   between documents.
//! - Invalid raw input degrades to zero items; only structural
//!   runaway (depth exhaustion) propagates as an error.
//! - Batch results are deterministic: sources are processed in label
//!   order and per-document item order is preserved.

use crate::filter::ContentFilter;
use crate::group::{group_items, GroupingStrategySet, TodoGroup};
use crate::model::item::ContentItem;
use crate::model::node::DocNode;
use crate::synthesize::StrategySet;
use crate::traverse::engine::{DocTraverser, RoleMap, TraverseResult};
use crate::traverse::visitor::TodoVisitor;
use crate::validate::DocValidator;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

static SOURCE_LABEL_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.json$").expect("valid source label suffix regex"));

/// Facade bundling the extraction pipeline for checklist documents.
pub struct TodoService {
    traverser: DocTraverser,
    validator: DocValidator,
    creation_strategies: StrategySet,
    grouping_strategies: GroupingStrategySet,
    filters: Vec<Box<dyn ContentFilter>>,
}

impl Default for TodoService {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoService {
    /// Creates a service over the editor's task-list vocabulary with
    /// todo synthesis support and no filters.
    pub fn new() -> Self {
        Self {
            traverser: DocTraverser::new(RoleMap::task_vocabulary()),
            validator: DocValidator::new(),
            creation_strategies: StrategySet::with_todo_support(),
            grouping_strategies: GroupingStrategySet::default(),
            filters: Vec::new(),
        }
    }

    /// Replaces the traverser, e.g. for a different tag vocabulary.
    pub fn with_traverser(mut self, traverser: DocTraverser) -> Self {
        self.traverser = traverser;
        self
    }

    /// Appends one post-extraction filter; filters run in order.
    pub fn register_filter(&mut self, filter: Box<dyn ContentFilter>) {
        self.filters.push(filter);
    }

    /// Extracts todo items from a parsed document tree.
    ///
    /// # Errors
    /// - Propagates traversal depth exhaustion; every other
    ///   malformation degrades to fewer (or zero) items.
    pub fn extract(&self, doc: &DocNode) -> TraverseResult<Vec<ContentItem>> {
        let mut visitor = TodoVisitor::new();
        self.traverser.traverse(doc, &mut visitor)?;

        let mut items = visitor.take_items();
        for filter in &self.filters {
            items = filter.filter(items);
        }

        debug!(
            "event=extract module=service status=ok items={}",
            items.len()
        );
        Ok(items)
    }

    /// Validates a raw document string and extracts items from it.
    ///
    /// Invalid input yields an empty list; callers needing to tell
    /// "invalid" from "empty" run the validator separately.
    pub fn validate_and_extract(&self, raw: Option<&str>) -> TraverseResult<Vec<ContentItem>> {
        let outcome = self.validator.validate(raw);
        let Some(doc) = outcome.doc else {
            debug!("event=validate module=service status=rejected");
            return Ok(Vec::new());
        };
        self.extract(&doc)
    }

    /// Extracts items from a batch of labeled raw documents.
    ///
    /// # Contract
    /// - Absent (`None`) sources are skipped entirely.
    /// - Every extracted item is tagged with `metadata.sourceDate`,
    ///   the label with any `.json` suffix stripped.
    /// - Results concatenate in label order.
    pub fn process_sources(
        &self,
        sources: &BTreeMap<String, Option<String>>,
    ) -> TraverseResult<Vec<ContentItem>> {
        let mut all_items = Vec::new();

        for (label, raw) in sources {
            let Some(raw) = raw else {
                continue;
            };

            let mut items = self.validate_and_extract(Some(raw))?;
            let source_date = SOURCE_LABEL_SUFFIX_RE.replace(label, "").to_string();
            for item in &mut items {
                item.set_metadata("sourceDate", Value::String(source_date.clone()));
            }

            info!(
                "event=source_extracted module=service status=ok label={} items={}",
                label,
                items.len()
            );
            all_items.extend(items);
        }

        Ok(all_items)
    }

    /// Groups items by the requested fields.
    pub fn group_by(&self, items: &[ContentItem], fields: &[&str]) -> Vec<TodoGroup> {
        group_items(items, fields, &self.grouping_strategies)
    }

    /// Synthesizes a document tree holding one fragment per item.
    pub fn create_document(&self, items: &[ContentItem]) -> DocNode {
        self.creation_strategies.create_document(items)
    }
}

#[cfg(test)]
mod tests {
    use super::TodoService;
    use crate::filter::UncompletedTodoFilter;
    use crate::model::node::DocNode;
    use serde_json::json;

    fn checklist_raw(task: &str, checked: bool) -> String {
        json!({
            "type": "doc",
            "content": [{
                "type": "taskList",
                "content": [{
                    "type": "taskItem",
                    "attrs": { "checked": checked },
                    "content": [{
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": task }]
                    }]
                }]
            }]
        })
        .to_string()
    }

    #[test]
    fn invalid_raw_input_yields_zero_items() {
        let service = TodoService::new();
        let items = service
            .validate_and_extract(Some("{not json"))
            .expect("invalid input should not be a hard failure");
        assert!(items.is_empty());
    }

    #[test]
    fn extracts_from_valid_raw_document() {
        let service = TodoService::new();
        let items = service
            .validate_and_extract(Some(&checklist_raw("write report", true)))
            .expect("valid document should extract");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "write report");
        assert!(items[0].is_completed);
    }

    #[test]
    fn registered_filters_apply_in_sequence() {
        let mut service = TodoService::new();
        service.register_filter(Box::new(UncompletedTodoFilter));

        let items = service
            .validate_and_extract(Some(&checklist_raw("finished", true)))
            .expect("valid document should extract");
        assert!(items.is_empty());
    }

    #[test]
    fn extract_on_empty_document_is_a_no_op() {
        let service = TodoService::new();
        let items = service
            .extract(&DocNode::new("doc"))
            .expect("empty document should extract");
        assert!(items.is_empty());
    }
}
