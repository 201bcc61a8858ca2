//! Raw document validation gate.
//!
//! # Responsibility
//! - Turn a raw wire string into a parsed document tree, or reject it.
//! - Act as the sole precondition gate in front of extraction.
//!
//! # Invariants
//! - Rejection is total: callers get a boolean plus an optional tree,
//!   never a partial result or an error detail.
//! - Validation is pure and never panics; malformed input is a
//!   permanent condition, not a transient one.

use crate::model::node::DocNode;
use serde_json::Value;

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Whether the raw input passed every validation step.
    pub is_valid: bool,
    /// The parsed document root; `None` whenever `is_valid` is false.
    pub doc: Option<DocNode>,
}

impl ValidationOutcome {
    fn rejected() -> Self {
        Self {
            is_valid: false,
            doc: None,
        }
    }

    fn accepted(doc: DocNode) -> Self {
        Self {
            is_valid: true,
            doc: Some(doc),
        }
    }
}

/// Validator for the JSON-encoded document tree format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocValidator;

impl DocValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates a raw document string.
    ///
    /// Rejects when the input is absent, blank, not parseable JSON, or
    /// when the parsed value is not an object carrying a string `type`.
    /// Any failed step short-circuits to full rejection.
    pub fn validate(&self, raw: Option<&str>) -> ValidationOutcome {
        let Some(raw) = raw else {
            return ValidationOutcome::rejected();
        };
        if raw.trim().is_empty() {
            return ValidationOutcome::rejected();
        }

        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            return ValidationOutcome::rejected();
        };
        if !has_root_shape(&value) {
            return ValidationOutcome::rejected();
        }

        match serde_json::from_value::<DocNode>(value) {
            Ok(doc) => ValidationOutcome::accepted(doc),
            Err(_) => ValidationOutcome::rejected(),
        }
    }
}

/// A root must be a composite value with a string-valued type tag.
fn has_root_shape(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.get("type"))
        .map(Value::is_string)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::DocValidator;

    #[test]
    fn rejects_absent_and_blank_input() {
        let validator = DocValidator::new();
        assert!(!validator.validate(None).is_valid);
        assert!(!validator.validate(Some("")).is_valid);
        assert!(!validator.validate(Some("   ")).is_valid);
    }

    #[test]
    fn rejects_unparseable_json() {
        let outcome = DocValidator::new().validate(Some("{bad json"));
        assert!(!outcome.is_valid);
        assert!(outcome.doc.is_none());
    }

    #[test]
    fn rejects_values_without_string_type_tag() {
        let validator = DocValidator::new();
        assert!(!validator.validate(Some(r#"{"content":[]}"#)).is_valid);
        assert!(!validator.validate(Some(r#"{"type":42}"#)).is_valid);
        assert!(!validator.validate(Some(r#""doc""#)).is_valid);
        assert!(!validator.validate(Some("[]")).is_valid);
    }

    #[test]
    fn accepts_minimal_document_root() {
        let outcome = DocValidator::new().validate(Some(r#"{"type":"doc"}"#));
        assert!(outcome.is_valid);
        let doc = outcome.doc.expect("valid outcome should carry a tree");
        assert_eq!(doc.node_type, "doc");
        assert!(doc.children().is_empty());
    }

    #[test]
    fn accepts_nested_document_content() {
        let raw = r#"{
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "hi"}]}
            ]
        }"#;
        let outcome = DocValidator::new().validate(Some(raw));
        assert!(outcome.is_valid);
        let doc = outcome.doc.expect("valid outcome should carry a tree");
        assert_eq!(doc.children().len(), 1);
        assert_eq!(doc.children()[0].children()[0].text.as_deref(), Some("hi"));
    }
}
