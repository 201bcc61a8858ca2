//! Post-extraction item filters.

use crate::model::item::ContentItem;

/// Filter applied to extracted items, in registration order.
pub trait ContentFilter {
    fn filter(&self, items: Vec<ContentItem>) -> Vec<ContentItem>;
}

/// Keeps only items whose completion flag is unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncompletedTodoFilter;

impl ContentFilter for UncompletedTodoFilter {
    fn filter(&self, mut items: Vec<ContentItem>) -> Vec<ContentItem> {
        items.retain(|item| !item.is_completed);
        items
    }
}
