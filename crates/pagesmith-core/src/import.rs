//! Re-importing previously exported templates.

use crate::document::ExportDocument;
use crate::item::{FontStyle, FontWeight, Item, TextAlign, TextDecoration};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// Import errors.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Parse(String),
    /// The JSON does not have the shape of an exported template.
    #[error("Invalid template file: invalid format")]
    InvalidFormat,
}

/// Check that `candidate` has the structure of an exported template.
///
/// This is a predicate over shape only: it never fails, it answers `false`.
pub fn validate_imported_data(candidate: &Value) -> bool {
    let Some(root) = candidate.as_object() else {
        return false;
    };
    let Some(items) = root.get("pageItems").and_then(Value::as_array) else {
        return false;
    };
    if !is_string(root.get("exportDate")) || !is_string(root.get("pageSize")) {
        return false;
    }
    items.iter().all(is_valid_item)
}

/// Parse, validate and deserialize an exported template.
///
/// Either every item is returned or an error is; nothing is applied partially.
pub fn import_from_json(text: &str) -> Result<Vec<Item>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        log::warn!("Rejected template import: {}", e);
        ImportError::Parse(e.to_string())
    })?;

    if !validate_imported_data(&value) {
        log::warn!("Rejected template import: structure does not match");
        return Err(ImportError::InvalidFormat);
    }

    let document: ExportDocument = serde_json::from_value(value).map_err(|e| {
        log::warn!("Rejected template import: {}", e);
        ImportError::InvalidFormat
    })?;

    let mut seen = HashSet::new();
    if let Some(item) = document.page_items.iter().find(|item| !seen.insert(item.id.as_str())) {
        log::warn!("Rejected template import: duplicate item id {}", item.id);
        return Err(ImportError::InvalidFormat);
    }

    log::info!(
        "Imported {} items (exported {})",
        document.page_items.len(),
        document.export_date
    );
    Ok(document.page_items)
}

fn is_valid_item(value: &Value) -> bool {
    let Some(item) = value.as_object() else {
        return false;
    };

    let kind_ok = matches!(
        item.get("type").and_then(Value::as_str),
        Some("text" | "image" | "table")
    );

    kind_ok
        && is_string(item.get("id"))
        && is_string(item.get("label"))
        && is_string(item.get("value"))
        && has_numbers(item.get("position"), &["x", "y"])
        && has_numbers(item.get("size"), &["width", "height"])
        && optional(item, "fontFamily", Value::is_string)
        && optional(item, "fontSize", Value::is_number)
        && optional(item, "color", Value::is_string)
        && optional_enum(item, "textAlign", TextAlign::all().iter().map(TextAlign::as_str))
        && optional_enum(item, "fontWeight", FontWeight::all().iter().map(FontWeight::as_str))
        && optional_enum(item, "fontStyle", FontStyle::all().iter().map(FontStyle::as_str))
        && optional_enum(
            item,
            "textDecoration",
            TextDecoration::all().iter().map(TextDecoration::as_str),
        )
        && optional(item, "dataColumns", is_valid_columns)
        && optional(item, "rows", is_valid_rows)
}

fn is_valid_columns(value: &Value) -> bool {
    let Some(columns) = value.as_array() else {
        return false;
    };
    columns.iter().all(|column| {
        let Some(column) = column.as_object() else {
            return false;
        };
        is_string(column.get("value"))
            && is_string(column.get("label"))
            && optional(column, "width", Value::is_number)
            && optional_enum(column, "textAlign", TextAlign::all().iter().map(TextAlign::as_str))
    })
}

fn is_valid_rows(value: &Value) -> bool {
    value.as_array().is_some_and(|rows| {
        rows.iter().all(|row| {
            row.as_array()
                .is_some_and(|cells| cells.iter().all(Value::is_string))
        })
    })
}

fn is_string(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_string)
}

fn has_numbers(value: Option<&Value>, keys: &[&str]) -> bool {
    let Some(object) = value.and_then(Value::as_object) else {
        return false;
    };
    keys.iter()
        .all(|key| object.get(*key).is_some_and(Value::is_number))
}

/// Absent is fine; present must satisfy `check`.
fn optional(object: &Map<String, Value>, key: &str, check: impl Fn(&Value) -> bool) -> bool {
    object.get(key).is_none_or(check)
}

fn optional_enum<'a>(
    object: &Map<String, Value>,
    key: &str,
    mut allowed: impl Iterator<Item = &'a str>,
) -> bool {
    match object.get(key) {
        None => true,
        Some(Value::String(s)) => allowed.any(|candidate| candidate == s),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{TableColumn, TextAlign};
    use kurbo::{Point, Size};
    use serde_json::json;

    fn valid_item() -> Value {
        json!({
            "id": "1",
            "type": "text",
            "label": "Invoice",
            "value": "invoiceName",
            "position": {"x": 10, "y": 10},
            "size": {"width": 200, "height": 32},
            "fontFamily": "Arial",
            "fontSize": 14,
            "textAlign": "left",
            "fontWeight": "normal",
            "fontStyle": "normal",
            "textDecoration": "none"
        })
    }

    fn envelope(items: Vec<Value>) -> Value {
        json!({
            "pageItems": items,
            "exportDate": "2024-05-01T10:00:00.000Z",
            "pageSize": "A4"
        })
    }

    #[test]
    fn test_accepts_valid_document() {
        assert!(validate_imported_data(&envelope(vec![valid_item()])));
        assert!(validate_imported_data(&envelope(vec![])));
    }

    #[test]
    fn test_rejects_missing_page_items() {
        let value = json!({"exportDate": "2024-05-01T10:00:00.000Z", "pageSize": "A4"});
        assert!(!validate_imported_data(&value));
    }

    #[test]
    fn test_rejects_justify_alignment() {
        let mut item = valid_item();
        item["textAlign"] = json!("justify");
        assert!(!validate_imported_data(&envelope(vec![item])));
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(!validate_imported_data(&json!([])));
        assert!(!validate_imported_data(&json!("A4")));

        let mut doc = envelope(vec![]);
        doc["exportDate"] = json!(12);
        assert!(!validate_imported_data(&doc));

        let mut item = valid_item();
        item["position"] = json!({"x": "10", "y": 10});
        assert!(!validate_imported_data(&envelope(vec![item])));

        let mut item = valid_item();
        item["type"] = json!("video");
        assert!(!validate_imported_data(&envelope(vec![item])));

        let mut item = valid_item();
        item["fontWeight"] = json!(700);
        assert!(!validate_imported_data(&envelope(vec![item])));

        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("label");
        assert!(!validate_imported_data(&envelope(vec![item])));
    }

    #[test]
    fn test_rejects_malformed_columns() {
        let mut item = valid_item();
        item["type"] = json!("table");
        item["dataColumns"] = json!([{"value": "qty"}]);
        assert!(!validate_imported_data(&envelope(vec![item.clone()])));

        item["dataColumns"] = json!([{"value": "qty", "label": "Qty", "width": 80}]);
        item["rows"] = json!([["1", 2]]);
        assert!(!validate_imported_data(&envelope(vec![item.clone()])));

        item["rows"] = json!([["1"]]);
        assert!(validate_imported_data(&envelope(vec![item])));
    }

    #[test]
    fn test_exported_payload_validates() {
        let items = vec![
            Item::text("A", "a", Point::new(1.0, 2.0)),
            Item::image("B", "b", Point::new(3.0, 4.0)),
            Item::table("C", "c", Point::new(5.0, 6.0), vec![TableColumn::new("x", "X")]),
        ];
        let json = ExportDocument::new(&items).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(validate_imported_data(&value));
    }

    #[test]
    fn test_text_item_round_trip_scenario() {
        let original = Item::text("Invoice", "invoiceName", Point::new(10.0, 10.0))
            .with_size(Size::new(200.0, 32.0));
        assert_eq!(original.text_align, TextAlign::Left);

        let json = ExportDocument::new(std::slice::from_ref(&original))
            .to_json()
            .unwrap();
        let imported = import_from_json(&json).unwrap();

        assert_eq!(imported, vec![original]);
    }

    #[test]
    fn test_import_errors() {
        assert!(matches!(import_from_json("{oops"), Err(ImportError::Parse(_))));

        let bad = envelope(vec![json!({"id": 1})]).to_string();
        let err = import_from_json(&bad).unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat));
        assert!(err.to_string().contains("invalid format"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut second = valid_item();
        second["label"] = json!("Copy");
        let text = envelope(vec![valid_item(), second]).to_string();
        assert!(matches!(import_from_json(&text), Err(ImportError::InvalidFormat)));

        let mut other = valid_item();
        other["id"] = json!("2");
        let text = envelope(vec![valid_item(), other]).to_string();
        assert_eq!(import_from_json(&text).unwrap().len(), 2);
    }
}
