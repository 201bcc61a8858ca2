use notedoc_core::TodoService;
use serde_json::json;
use std::collections::BTreeMap;

fn checklist_raw(tasks: &[(&str, bool)]) -> String {
    let entries: Vec<serde_json::Value> = tasks
        .iter()
        .map(|(text, checked)| {
            json!({
                "type": "taskItem",
                "attrs": { "checked": checked },
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": text }]
                }]
            })
        })
        .collect();
    json!({
        "type": "doc",
        "content": [{ "type": "taskList", "content": entries }]
    })
    .to_string()
}

#[test]
fn tags_every_item_with_suffix_stripped_source_date() {
    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    sources.insert(
        "2024-03-19.json".to_string(),
        Some(checklist_raw(&[("early task", false)])),
    );
    sources.insert(
        "2024-03-20.json".to_string(),
        Some(checklist_raw(&[("later task", true)])),
    );

    let items = TodoService::new()
        .process_sources(&sources)
        .expect("batch should extract");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].content, "early task");
    assert_eq!(items[0].metadata_str("sourceDate"), Some("2024-03-19"));
    assert_eq!(items[1].content, "later task");
    assert_eq!(items[1].metadata_str("sourceDate"), Some("2024-03-20"));
}

#[test]
fn absent_sources_are_skipped_entirely() {
    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    sources.insert("2024-03-19.json".to_string(), None);
    sources.insert(
        "2024-03-20.json".to_string(),
        Some(checklist_raw(&[("only task", false)])),
    );

    let items = TodoService::new()
        .process_sources(&sources)
        .expect("batch should extract");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].metadata_str("sourceDate"), Some("2024-03-20"));
}

#[test]
fn invalid_documents_contribute_zero_items() {
    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    sources.insert("2024-03-19.json".to_string(), Some("{broken".to_string()));
    sources.insert(
        "2024-03-20.json".to_string(),
        Some(checklist_raw(&[("survivor", false)])),
    );

    let items = TodoService::new()
        .process_sources(&sources)
        .expect("one bad document must not abort the batch");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "survivor");
}

#[test]
fn labels_without_suffix_are_used_verbatim() {
    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    sources.insert(
        "2024-03-21".to_string(),
        Some(checklist_raw(&[("plain label", false)])),
    );

    let items = TodoService::new()
        .process_sources(&sources)
        .expect("batch should extract");
    assert_eq!(items[0].metadata_str("sourceDate"), Some("2024-03-21"));
}

#[test]
fn batch_output_feeds_directly_into_date_grouping() {
    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    sources.insert(
        "2024-03-19.json".to_string(),
        Some(checklist_raw(&[("a", false), ("b", false)])),
    );
    sources.insert(
        "2024-03-20.json".to_string(),
        Some(checklist_raw(&[("c", false)])),
    );

    let service = TodoService::new();
    let items = service
        .process_sources(&sources)
        .expect("batch should extract");
    let groups = service.group_by(&items, &["date"]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].date.as_deref(), Some("2024-03-19"));
    assert_eq!(groups[0].todos.len(), 2);
    assert_eq!(groups[1].date.as_deref(), Some("2024-03-20"));
    assert_eq!(groups[1].todos.len(), 1);
}
