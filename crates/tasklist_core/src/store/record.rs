//! Explicit parse step from untyped JSON records to typed tasks.
//!
//! Missing fields take defaults (`""` for strings, `false` for `done`).
//! Wrong-typed fields are converted: scalars to their string form, and
//! `done` by truthiness (non-zero numbers, non-empty strings/arrays/objects).

use super::{StoreError, StoreResult};
use crate::model::task::Task;
use serde_json::{Map, Value};

/// Parses a whole task document (a JSON array of records).
///
/// # Errors
/// - `InvalidData` when the document is not an array or an entry is not an
///   object.
pub fn tasks_from_document(document: Value) -> StoreResult<Vec<Task>> {
    let Value::Array(entries) = document else {
        return Err(StoreError::InvalidData(format!(
            "expected a JSON array of tasks, found {}",
            kind_name(&document)
        )));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(task_from_fields(&fields)),
            other => Err(StoreError::InvalidData(format!(
                "task entry #{index} must be an object, found {}",
                kind_name(&other)
            ))),
        })
        .collect()
}

/// Coerces one record into a task, substituting defaults per field.
pub fn task_from_fields(fields: &Map<String, Value>) -> Task {
    Task {
        id: string_field(fields, "id"),
        title: string_field(fields, "title"),
        done: fields.get("done").map(truthy).unwrap_or(false),
        created_at: string_field(fields, "created_at"),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::tasks_from_document;
    use crate::store::StoreError;
    use serde_json::json;

    #[test]
    fn sparse_record_gets_defaults() {
        let tasks = tasks_from_document(json!([{}])).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "");
        assert_eq!(tasks[0].title, "");
        assert_eq!(tasks[0].created_at, "");
        assert!(!tasks[0].done);
    }

    #[test]
    fn wrong_types_are_coerced() {
        let tasks = tasks_from_document(json!([
            {"id": 42, "title": true, "done": 1, "created_at": null},
            {"id": "x", "title": "ok", "done": "", "created_at": 1.5},
            {"id": "y", "title": ["a"], "done": [0]},
            {"id": "z", "done": 0.0}
        ]))
        .unwrap();

        assert_eq!(tasks[0].id, "42");
        assert_eq!(tasks[0].title, "true");
        assert!(tasks[0].done);
        assert_eq!(tasks[0].created_at, "");

        assert!(!tasks[1].done);
        assert_eq!(tasks[1].created_at, "1.5");

        assert_eq!(tasks[2].title, r#"["a"]"#);
        assert!(tasks[2].done);

        assert!(!tasks[3].done);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tasks =
            tasks_from_document(json!([{"id": "a", "title": "t", "priority": 3}])).unwrap();
        assert_eq!(tasks[0].id, "a");
    }

    #[test]
    fn non_array_document_is_rejected() {
        let err = tasks_from_document(json!({"tasks": []})).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(message) if message.contains("object")));
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let err = tasks_from_document(json!([{"id": "a"}, "oops"])).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(message) if message.contains("#1")));
    }
}
