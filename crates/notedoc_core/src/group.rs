//! Deterministic item grouping engine.
//!
//! # Responsibility
//! - Partition extracted items by one or more derived keys.
//! - Keep group membership and group order fully deterministic.
//!
//! # Invariants
//! - The union of all groups' members equals the input exactly once
//!   each: no duplication, no loss.
//! - Bucket membership keeps first-encountered order; group order is a
//!   stable sort over the per-field comparators.
//! - Unknown field names degrade to one catch-all bucket, never an
//!   error.

use crate::model::item::{ContentItem, HeadingRef};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Key part a group lacking a real value contributes to bucketing.
pub const UNKNOWN_KEY_PART: &str = "undefined";

const KEY_SEPARATOR: char = '|';

/// Sort payload carried alongside a bucketing value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(i64),
}

/// Composite-key contribution from one field strategy.
///
/// `value` is used for equality/bucketing; `sort_value` may differ
/// (headings bucket on `id-level` but sort on numeric level).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    pub value: String,
    pub sort_value: SortValue,
}

/// One group of items sharing a composite key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoGroup {
    /// Date display key, set by the date strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Heading display key, set by the heading strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<HeadingRef>,
    /// Member items in first-encountered order.
    pub todos: Vec<ContentItem>,
}

impl TodoGroup {
    fn bare(todos: Vec<ContentItem>) -> Self {
        Self {
            date: None,
            heading: None,
            todos,
        }
    }
}

/// Per-field key-extraction, decoration and comparison rule.
pub trait GroupingStrategy {
    /// Returns the item's key contribution, or `None` when the item
    /// lacks this field.
    fn group_key(&self, item: &ContentItem) -> Option<GroupKey>;

    /// Contributes this field's display representation to a group,
    /// derived from the bucket's first member. Must not overwrite
    /// already-set unrelated fields.
    fn decorate_group(&self, group: &mut TodoGroup, exemplar: &ContentItem);

    /// Orders two groups by this field alone. A group lacking the
    /// field's key sorts after one that has it.
    fn compare_groups(&self, a: &TodoGroup, b: &TodoGroup) -> Ordering;
}

/// Groups by `metadata.sourceDate`.
///
/// Comparison is lexical, which is correct for the ISO-like
/// `YYYY-MM-DD` labels produced by batch extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateGroupingStrategy;

impl GroupingStrategy for DateGroupingStrategy {
    fn group_key(&self, item: &ContentItem) -> Option<GroupKey> {
        let source_date = item.metadata_str("sourceDate")?;
        Some(GroupKey {
            value: source_date.to_string(),
            sort_value: SortValue::Text(source_date.to_string()),
        })
    }

    fn decorate_group(&self, group: &mut TodoGroup, exemplar: &ContentItem) {
        group.date = exemplar.metadata_str("sourceDate").map(str::to_string);
    }

    fn compare_groups(&self, a: &TodoGroup, b: &TodoGroup) -> Ordering {
        match (&a.date, &b.date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(right),
        }
    }
}

/// Groups by attached heading context.
///
/// Buckets on `id-level` for uniqueness; sorts on numeric level, then
/// textual content.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingGroupingStrategy;

impl GroupingStrategy for HeadingGroupingStrategy {
    fn group_key(&self, item: &ContentItem) -> Option<GroupKey> {
        let heading = item.heading.as_ref()?;
        Some(GroupKey {
            value: format!("{}-{}", heading.id, heading.level),
            sort_value: SortValue::Number(heading.level),
        })
    }

    fn decorate_group(&self, group: &mut TodoGroup, exemplar: &ContentItem) {
        group.heading = exemplar.heading.clone();
    }

    fn compare_groups(&self, a: &TodoGroup, b: &TodoGroup) -> Ordering {
        match (&a.heading, &b.heading) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left
                .level
                .cmp(&right.level)
                .then_with(|| left.content.cmp(&right.content)),
        }
    }
}

/// Registry resolving field names to grouping strategies.
pub struct GroupingStrategySet {
    strategies: BTreeMap<String, Box<dyn GroupingStrategy>>,
}

impl Default for GroupingStrategySet {
    /// Registers the stock `date` and `heading` strategies.
    fn default() -> Self {
        let mut set = Self::empty();
        set.register("date", Box::new(DateGroupingStrategy));
        set.register("heading", Box::new(HeadingGroupingStrategy));
        set
    }
}

impl GroupingStrategySet {
    /// Creates a registry with no strategies.
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Registers one field strategy, replacing any previous entry.
    pub fn register(&mut self, field: impl Into<String>, strategy: Box<dyn GroupingStrategy>) {
        self.strategies.insert(field.into(), strategy);
    }

    fn get(&self, field: &str) -> Option<&dyn GroupingStrategy> {
        self.strategies.get(field).map(Box::as_ref)
    }
}

/// Partitions items into groups keyed by the composite of per-field
/// keys, returning groups in deterministic sorted order.
///
/// # Contract
/// - Empty `items` returns `[]`; empty `fields` returns one bare group
///   with all items in original order.
/// - Fields without a registered strategy (and items lacking a field's
///   key) contribute the literal `undefined` key part.
pub fn group_items(
    items: &[ContentItem],
    fields: &[&str],
    strategies: &GroupingStrategySet,
) -> Vec<TodoGroup> {
    if items.is_empty() {
        return Vec::new();
    }
    if fields.is_empty() {
        return vec![TodoGroup::bare(items.to_vec())];
    }

    // Buckets keep first-encounter order so the later sort is stable
    // with respect to document order.
    let mut buckets: Vec<Vec<ContentItem>> = Vec::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key_parts: Vec<String> = fields
            .iter()
            .map(|field| {
                strategies
                    .get(field)
                    .and_then(|strategy| strategy.group_key(item))
                    .map(|key| key.value)
                    .unwrap_or_else(|| UNKNOWN_KEY_PART.to_string())
            })
            .collect();
        let mut key = String::new();
        for (position, part) in key_parts.iter().enumerate() {
            if position > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(part);
        }

        match bucket_index.get(&key) {
            Some(&index) => buckets[index].push(item.clone()),
            None => {
                bucket_index.insert(key, buckets.len());
                buckets.push(vec![item.clone()]);
            }
        }
    }

    let mut groups: Vec<TodoGroup> = buckets
        .into_iter()
        .map(|members| {
            let exemplar = members[0].clone();
            let mut group = TodoGroup::bare(members);
            for field in fields {
                let Some(strategy) = strategies.get(field) else {
                    continue;
                };
                if strategy.group_key(&exemplar).is_none() {
                    continue;
                }
                strategy.decorate_group(&mut group, &exemplar);
            }
            group
        })
        .collect();

    groups.sort_by(|a, b| {
        for field in fields {
            let Some(strategy) = strategies.get(field) else {
                continue;
            };
            let ordering = strategy.compare_groups(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    groups
}
