//! Decoding raw row payloads into records
//!
//! Two payload shapes are accepted for a row:
//!
//! - an envelope `{"type": "Account", "Id": "001...", "fields": {...}}`, whose
//!   identifier is folded into the field map under [`ID_FIELD`]
//! - a flat object, where every key except `type` is a field
//!
//! Field values decode as follows:
//!
//! - an object with a `records` key is a child result group
//! - an array of such objects is a multi-group child value
//! - any other object is a related parent record, flattened into dotted
//!   names (`Account.Name`)
//! - any other array is kept as compact JSON text

use serde_json::{Map, Value};
use thiserror::Error;

use super::record::{Record, RecordSet};
use super::value::FieldValue;

/// Reserved field name for the record identifier
pub const ID_FIELD: &str = "Id";

const TYPE_KEY: &str = "type";
const FIELDS_KEY: &str = "fields";
const RECORDS_KEY: &str = "records";

/// Errors decoding a raw row payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A row payload was not a JSON object
    #[error("row payload must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// Decode a `records` payload into a record sequence.
///
/// A bare object is normalized to a one-element sequence; null decodes to
/// an empty sequence.
pub fn decode_records(raw: &Value) -> Result<Vec<Record>, DecodeError> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(decode_record).collect(),
        single => Ok(vec![decode_record(single)?]),
    }
}

/// Decode one row payload
pub fn decode_record(raw: &Value) -> Result<Record, DecodeError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| DecodeError::NotAnObject(json_kind(raw)))?;

    let mut record = match obj.get(TYPE_KEY).and_then(Value::as_str) {
        Some(object_type) => Record::of_type(object_type),
        None => Record::new(),
    };

    match envelope_fields(obj) {
        Some(fields) => {
            for (name, value) in fields {
                decode_field(&mut record, name, value)?;
            }
            if let Some(id) = obj.get(ID_FIELD).and_then(scalar_id) {
                record.set(ID_FIELD, id);
            }
        }
        None => {
            let fields = obj.iter().filter(|(key, _)| key.as_str() != TYPE_KEY);
            for (name, value) in fields {
                decode_field(&mut record, name, value)?;
            }
        }
    }

    Ok(record)
}

/// The field map of an envelope row, or `None` for a flat row.
///
/// A row is an envelope only when `fields` is a plain object (not a child
/// group) and the row carries nothing besides `type`, `Id` and `fields`.
fn envelope_fields(obj: &Map<String, Value>) -> Option<&Map<String, Value>> {
    let fields = obj.get(FIELDS_KEY)?.as_object()?;
    if fields.contains_key(RECORDS_KEY) {
        return None;
    }
    let only_envelope_keys = obj
        .keys()
        .all(|key| matches!(key.as_str(), TYPE_KEY | ID_FIELD | FIELDS_KEY));
    only_envelope_keys.then_some(fields)
}

fn decode_field(record: &mut Record, name: &str, value: &Value) -> Result<(), DecodeError> {
    let decoded = match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => FieldValue::Number(n.clone()),
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Object(obj) if obj.contains_key(RECORDS_KEY) => {
            FieldValue::children(decode_child_group(obj)?)
        }
        Value::Array(items) if !items.is_empty() && items.iter().all(is_child_group) => {
            let groups = items
                .iter()
                .filter_map(Value::as_object)
                .map(decode_child_group)
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::Children(groups)
        }
        Value::Array(_) => FieldValue::Text(value.to_string()),
        Value::Object(_) => {
            let parent = decode_record(value)?;
            for (child_name, child_value) in parent.fields() {
                record.set(format!("{}.{}", name, child_name), child_value.clone());
            }
            return Ok(());
        }
    };

    record.set(name, decoded);
    Ok(())
}

fn decode_child_group(obj: &Map<String, Value>) -> Result<RecordSet, DecodeError> {
    let records = obj.get(RECORDS_KEY).unwrap_or(&Value::Null);
    Ok(RecordSet::from(decode_records(records)?))
}

fn is_child_group(value: &Value) -> bool {
    value
        .as_object()
        .map(|obj| obj.contains_key(RECORDS_KEY))
        .unwrap_or(false)
}

fn scalar_id(value: &Value) -> Option<FieldValue> {
    match value {
        Value::String(s) if !s.is_empty() => Some(FieldValue::Text(s.clone())),
        Value::Number(n) => Some(FieldValue::Number(n.clone())),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(record: &Record) -> Vec<&str> {
        record.field_names().collect()
    }

    #[test]
    fn test_flat_object() {
        let record = decode_record(&json!({"type": "Account", "Id": "001", "Name": "Acme"})).unwrap();
        assert_eq!(record.object_type(), Some("Account"));
        assert_eq!(names(&record), vec!["Id", "Name"]);
    }

    #[test]
    fn test_envelope_folds_id() {
        let raw = json!({"type": "Account", "Id": "001", "fields": {"Name": "Acme"}});
        let record = decode_record(&raw).unwrap();
        assert_eq!(names(&record), vec!["Name", "Id"]);
        assert_eq!(record.get("Id"), Some(&FieldValue::from("001")));
    }

    #[test]
    fn test_envelope_id_replaces_existing_in_place() {
        let raw = json!({"Id": "001", "fields": {"Id": null, "Name": "Acme"}});
        let record = decode_record(&raw).unwrap();
        assert_eq!(names(&record), vec!["Id", "Name"]);
        assert_eq!(record.get("Id"), Some(&FieldValue::from("001")));
    }

    #[test]
    fn test_flat_row_with_fields_column() {
        let raw = json!({"Id": "a0B1", "Name": "Widget", "fields": {"Color": "red"}});
        let record = decode_record(&raw).unwrap();
        assert_eq!(names(&record), vec!["Id", "Name", "fields.Color"]);
        assert_eq!(record.get("Name"), Some(&FieldValue::from("Widget")));
    }

    #[test]
    fn test_fields_child_group_is_not_envelope() {
        let raw = json!({"type": "Account", "fields": {"records": [{"Name": "A"}]}});
        let record = decode_record(&raw).unwrap();
        assert_eq!(names(&record), vec!["fields"]);
        assert!(record.get("fields").unwrap().as_children().is_some());
    }

    #[test]
    fn test_parent_record_flattened() {
        let raw = json!({
            "Name": "Bob",
            "Account": {"type": "Account", "Name": "Acme", "Owner": {"Email": "o@x.io"}}
        });
        let record = decode_record(&raw).unwrap();
        assert_eq!(names(&record), vec!["Name", "Account.Name", "Account.Owner.Email"]);
    }

    #[test]
    fn test_child_group() {
        let raw = json!({
            "Name": "Acme",
            "Contacts": {"done": true, "size": 2, "records": [{"Name": "A"}, {"Name": "B"}]}
        });
        let record = decode_record(&raw).unwrap();
        let groups = record.get("Contacts").unwrap().as_children().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_child_group_with_bare_record() {
        let raw = json!({"Contacts": {"size": 1, "records": {"Name": "A"}}});
        let record = decode_record(&raw).unwrap();
        let groups = record.get("Contacts").unwrap().as_children().unwrap();
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_multiple_child_groups() {
        let raw = json!({
            "Related": [
                {"records": [{"Name": "A"}]},
                {"records": [{"Name": "B"}, {"Name": "C"}]}
            ]
        });
        let record = decode_record(&raw).unwrap();
        let groups = record.get("Related").unwrap().as_children().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].len(), 2);
    }

    #[test]
    fn test_plain_array_kept_as_text() {
        let record = decode_record(&json!({"Tags": ["a", "b"]})).unwrap();
        assert_eq!(record.get("Tags"), Some(&FieldValue::from(r#"["a","b"]"#)));
    }

    #[test]
    fn test_decode_records_normalizes_bare_object() {
        assert_eq!(decode_records(&json!({"Name": "Doc"})).unwrap().len(), 1);
        assert_eq!(decode_records(&json!([{"a": 1}, {"a": 2}])).unwrap().len(), 2);
        assert!(decode_records(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_row_rejected() {
        let err = decode_records(&json!(["oops"])).unwrap_err();
        assert_eq!(err, DecodeError::NotAnObject("string"));
    }
}
