//! Records and record sets

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::FieldValue;

/// An ordered mapping from field name to value
///
/// Field order is the order fields were first set. Setting an existing field
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    object_type: Option<String>,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record of a named object type
    pub fn of_type(object_type: impl Into<String>) -> Self {
        Self {
            object_type: Some(object_type.into()),
            fields: Vec::new(),
        }
    }

    pub fn object_type(&self) -> Option<&str> {
        self.object_type.as_deref()
    }

    /// Set a field, keeping its original position if it already exists
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a field; `None` means the record has no such field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Fields in order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// An ordered sequence of records
///
/// Used both for the accumulated top-level result and for the value of a
/// child relationship field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut record = Record::new();
        record.set("Name", "Acme");
        record.set("Industry", "Energy");
        record.set("Id", "001");

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["Name", "Industry", "Id"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = Record::new();
        record.set("Id", "001");
        record.set("Name", "Acme");
        record.set("Id", "002");

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["Id", "Name"]);
        assert_eq!(record.get("Id"), Some(&FieldValue::from("002")));
    }

    #[test]
    fn test_missing_field_lookup() {
        let record: Record = [("a", 1i64)].into_iter().collect();
        assert!(record.get("b").is_none());
        assert!(!record.contains("b"));
        assert!(record.contains("a"));
    }

    #[test]
    fn test_serialize_keeps_field_order() {
        let record: Record = [("z", 1i64), ("a", 2i64)].into_iter().collect();
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"z":1,"a":2}"#);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"z": 1, "a": 2}));
    }
}
