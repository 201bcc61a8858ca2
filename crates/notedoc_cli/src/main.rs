//! CLI probe for the NoteDoc core crate.
//!
//! # Responsibility
//! - Extract and print todos from one JSON document file, grouped by
//!   source date and heading.
//! - Keep output deterministic for quick local sanity checks.

use notedoc_core::TodoService;
use std::collections::BTreeMap;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        println!("notedoc_core version={}", notedoc_core::core_version());
        println!("usage: notedoc_cli <document.json> [more.json ...]");
        return ExitCode::SUCCESS;
    };

    let mut sources: BTreeMap<String, Option<String>> = BTreeMap::new();
    for file in std::iter::once(path).chain(args) {
        sources.insert(file.clone(), std::fs::read_to_string(&file).ok());
    }

    let service = TodoService::new();
    let items = match service.process_sources(&sources) {
        Ok(items) => items,
        Err(err) => {
            eprintln!("extraction failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    for group in service.group_by(&items, &["date", "heading"]) {
        let date = group.date.as_deref().unwrap_or("-");
        let heading = group
            .heading
            .as_ref()
            .map(|heading| heading.content.as_str())
            .unwrap_or("-");
        println!("[{date}] {heading}");
        for todo in &group.todos {
            let mark = if todo.is_completed { "x" } else { " " };
            println!("  [{mark}] {}", todo.content);
        }
    }

    ExitCode::SUCCESS
}
