use notedoc_core::{DocTraverser, RoleMap, TodoService, TodoVisitor, TraverseError};
use serde_json::json;

fn extract(raw: serde_json::Value) -> Vec<notedoc_core::ContentItem> {
    TodoService::new()
        .validate_and_extract(Some(&raw.to_string()))
        .expect("extraction should not hit the depth ceiling")
}

#[test]
fn heading_attaches_to_adjacent_checklist() {
    let items = extract(json!({
        "type": "doc",
        "content": [
            {
                "type": "heading",
                "attrs": { "level": 1 },
                "content": [{ "type": "text", "text": "Main Section" }]
            },
            {
                "type": "taskList",
                "content": [{
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": "Task A" }]
                    }]
                }]
            }
        ]
    }));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "Task A");
    let heading = items[0].heading.as_ref().expect("heading should attach");
    assert_eq!(heading.content, "Main Section");
    assert_eq!(heading.level, 1);
}

#[test]
fn empty_paragraph_gap_severs_heading_association() {
    let items = extract(json!({
        "type": "doc",
        "content": [
            {
                "type": "heading",
                "attrs": { "level": 1 },
                "content": [{ "type": "text", "text": "Main Section" }]
            },
            { "type": "paragraph" },
            {
                "type": "taskList",
                "content": [{
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": "Task A" }]
                    }]
                }]
            }
        ]
    }));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "Task A");
    assert!(items[0].heading.is_none());
}

#[test]
fn scattered_text_fragments_join_with_single_spaces() {
    let items = extract(json!({
        "type": "doc",
        "content": [{
            "type": "taskList",
            "content": [{
                "type": "taskItem",
                "attrs": { "checked": true },
                "content": [
                    {
                        "type": "paragraph",
                        "content": [
                            { "type": "text", "text": "buy" },
                            { "type": "text", "text": "oat" }
                        ]
                    },
                    {
                        "type": "orderedList",
                        "content": [{
                            "type": "listItem",
                            "content": [{ "type": "text", "text": "milk" }]
                        }]
                    }
                ]
            }]
        }]
    }));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "buy oat milk");
    assert!(items[0].is_completed);
}

#[test]
fn content_less_entries_are_never_emitted() {
    let items = extract(json!({
        "type": "doc",
        "content": [{
            "type": "taskList",
            "content": [
                {
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{ "type": "paragraph" }]
                },
                {
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": "   " }]
                    }]
                },
                {
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": "real task" }]
                    }]
                }
            ]
        }]
    }));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "real task");
}

#[test]
fn malformed_entries_degrade_without_aborting_siblings() {
    // The second entry lacks any recognized sub-structure.
    let items = extract(json!({
        "type": "doc",
        "content": [{
            "type": "taskList",
            "content": [
                {
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{ "type": "text", "text": "first" }]
                },
                { "type": "taskItem" },
                {
                    "type": "taskItem",
                    "attrs": { "checked": true },
                    "content": [{ "type": "text", "text": "third" }]
                }
            ]
        }]
    }));

    let contents: Vec<&str> = items.iter().map(|item| item.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "third"]);
}

#[test]
fn checklists_nested_under_wrappers_are_still_found() {
    let items = extract(json!({
        "type": "doc",
        "content": [{
            "type": "blockquote",
            "content": [{
                "type": "bulletList",
                "content": [{
                    "type": "taskList",
                    "content": [{
                        "type": "taskItem",
                        "attrs": { "checked": false },
                        "content": [{ "type": "text", "text": "deeply nested" }]
                    }]
                }]
            }]
        }]
    }));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "deeply nested");
}

#[test]
fn items_keep_document_order_across_containers() {
    let entry = |text: &str| {
        json!({
            "type": "taskItem",
            "attrs": { "checked": false },
            "content": [{ "type": "text", "text": text }]
        })
    };
    let items = extract(json!({
        "type": "doc",
        "content": [
            { "type": "taskList", "content": [entry("one"), entry("two")] },
            { "type": "taskList", "content": [entry("three")] }
        ]
    }));

    let contents: Vec<&str> = items.iter().map(|item| item.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);

    let mut ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3, "ids must be unique within one run");
}

#[test]
fn runaway_nesting_is_the_only_hard_failure() {
    use notedoc_core::DocNode;

    let mut doc = DocNode::text_node("leaf");
    for _ in 0..600 {
        doc = DocNode::new("blockquote").with_children(vec![doc]);
    }

    let err = TodoService::new()
        .extract(&doc)
        .expect_err("unbounded nesting should exhaust the depth budget");
    assert!(matches!(err, TraverseError::DepthExceeded { .. }));
}

#[test]
fn visitor_can_be_reused_across_documents_after_clearing() {
    let traverser = DocTraverser::new(RoleMap::task_vocabulary());
    let doc: notedoc_core::DocNode = serde_json::from_value(json!({
        "type": "doc",
        "content": [
            {
                "type": "heading",
                "attrs": { "level": 1 },
                "content": [{ "type": "text", "text": "Carried" }]
            },
            {
                "type": "taskList",
                "content": [{
                    "type": "taskItem",
                    "attrs": { "checked": false },
                    "content": [{ "type": "text", "text": "task" }]
                }]
            }
        ]
    }))
    .expect("fixture should decode");

    let mut visitor = TodoVisitor::new();
    traverser
        .traverse(&doc, &mut visitor)
        .expect("first run should succeed");
    assert_eq!(visitor.items().len(), 1);

    visitor.clear_items();

    let bare: notedoc_core::DocNode = serde_json::from_value(json!({
        "type": "doc",
        "content": [{
            "type": "taskList",
            "content": [{
                "type": "taskItem",
                "attrs": { "checked": false },
                "content": [{ "type": "text", "text": "fresh" }]
            }]
        }]
    }))
    .expect("fixture should decode");
    traverser
        .traverse(&bare, &mut visitor)
        .expect("second run should succeed");

    assert_eq!(visitor.items().len(), 1);
    assert_eq!(visitor.items()[0].content, "fresh");
    assert!(
        visitor.items()[0].heading.is_none(),
        "heading context must not leak across cleared runs"
    );
}
