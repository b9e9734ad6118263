//! Dynamic JSON record

use gridkit::{CellValue, Column};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Entity;

/// Field holding the record id.
pub const ID_FIELD: &str = "id";

/// A record whose shape is only known at runtime.
///
/// Wraps a JSON object, so any collection can be listed and rendered
/// without a dedicated type.
///
/// # Example
///
/// ```
/// use backoffice_lib::model::Record;
///
/// let record = Record::new().set("id", 7).set("name", "Spring sale");
/// assert_eq!(record.get_str("name"), Some("Spring sale"));
/// assert_eq!(record.id_string(), Some("7".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, builder style.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String value of a field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Field value as a table cell. Missing fields are null.
    pub fn cell(&self, field: &str) -> CellValue {
        self.get(field).map(CellValue::from).unwrap_or_default()
    }

    /// Field names in document order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The `id` field as a string, for numeric and string ids.
    pub fn id_string(&self) -> Option<String> {
        match self.get(ID_FIELD)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Converts an arbitrary JSON value, rejecting non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }
}

impl Entity for Record {
    const LABEL: &'static str = "Record";

    fn id(&self) -> Option<String> {
        self.id_string()
    }
}

/// Header label for a field name: `created_at` becomes `Created at`.
pub fn field_label(field: &str) -> String {
    let spaced = field.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A table column reading one field of a [`Record`].
pub fn record_column(field: &str) -> Column<Record> {
    let key = field.to_string();
    Column::new(field, field_label(field), move |record: &Record| record.cell(&key))
}

/// Columns for the given fields, or for every field of the first record.
pub fn record_columns(records: &[Record], fields: &[String]) -> Vec<Column<Record>> {
    if !fields.is_empty() {
        return fields.iter().map(|f| record_column(f)).collect();
    }
    records
        .first()
        .map(|r| r.field_names().map(record_column).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trips_as_plain_object() {
        let value = json!({"id": "a1", "total": 12.5, "paid": true});
        let record: Record = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
        assert_eq!(record.id(), Some("a1".to_string()));
    }

    #[test]
    fn test_cells() {
        let record = Record::new().set("qty", 3).set("note", Value::Null);
        assert_eq!(record.cell("qty"), CellValue::Int(3));
        assert!(record.cell("note").is_null());
        assert!(record.cell("missing").is_null());
    }

    #[test]
    fn test_ids() {
        assert_eq!(Record::new().set("id", 42).id(), Some("42".to_string()));
        assert_eq!(Record::new().set("id", "").id(), None);
        assert_eq!(Record::new().id(), None);
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("created_at"), "Created at");
        assert_eq!(field_label("sku"), "Sku");
        assert_eq!(field_label(""), "");
    }

    #[test]
    fn test_columns_from_first_record() {
        let records = vec![Record::new().set("id", 1).set("name", "Mug")];
        let columns = record_columns(&records, &[]);
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["id", "name"]);
        assert_eq!(columns[1].render_cell(&records[0]), "Mug");

        let chosen = record_columns(&records, &["name".to_string()]);
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].header, "Name");
    }
}
