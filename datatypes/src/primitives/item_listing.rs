use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The JSON kind of the values in a listing column
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// `None` for JSON `null`, which is compatible with every kind
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Boolean),
            Value::Number(_) => Some(ValueKind::Number),
            Value::String(_) => Some(ValueKind::String),
            Value::Array(_) => Some(ValueKind::Array),
            Value::Object(_) => Some(ValueKind::Object),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// Rows of a service's `layers` or `tables` array, e.g.
/// `{"id": 0, "name": "Counties", "geometryType": "esriGeometryPolygon", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemListing {
    rows: Vec<Map<String, Value>>,
}

impl ItemListing {
    pub fn new(rows: Vec<Map<String, Value>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// Maps every column to the kind of its first non-null value.
    /// Columns that only hold nulls are left out.
    pub fn schema(&self) -> BTreeMap<&str, ValueKind> {
        let mut schema = BTreeMap::new();
        for row in &self.rows {
            for (column, value) in row {
                if let Some(kind) = ValueKind::of(value) {
                    schema.entry(column.as_str()).or_insert(kind);
                }
            }
        }
        schema
    }

    /// Stacks `other` below `self`.
    ///
    /// Columns may be missing on either side, but a column present on both
    /// sides must hold the same kind of values.
    pub fn concat(self, other: ItemListing) -> Result<ItemListing> {
        if self.is_empty() {
            return Ok(other);
        }
        if other.is_empty() {
            return Ok(self);
        }

        {
            let right = other.schema();
            for (column, left_kind) in self.schema() {
                match right.get(column) {
                    Some(&right_kind) if right_kind != left_kind => {
                        return Err(Error::IncompatibleListingColumn {
                            column: column.to_owned(),
                            left: left_kind,
                            right: right_kind,
                        });
                    }
                    _ => {}
                }
            }
        }

        let mut rows = self.rows;
        rows.extend(other.rows);
        Ok(Self { rows })
    }

    pub fn ids(&self) -> impl Iterator<Item = Option<u64>> + '_ {
        self.rows
            .iter()
            .map(|row| row.get("id").and_then(Value::as_u64))
    }

    pub fn names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(|row| row.get("name").and_then(Value::as_str))
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Map<String, Value>> {
        self.rows
            .iter()
            .find(|row| row.get("id").and_then(Value::as_u64) == Some(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Map<String, Value>> {
        self.rows
            .iter()
            .find(|row| row.get("name").and_then(Value::as_str) == Some(name))
    }
}

impl From<Vec<Map<String, Value>>> for ItemListing {
    fn from(rows: Vec<Map<String, Value>>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn listing(value: Value) -> ItemListing {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn concat_stacks_rows() {
        let layers = listing(json!([
            {"id": 0, "name": "Counties", "geometryType": "esriGeometryPolygon"},
            {"id": 1, "name": "Cities", "geometryType": "esriGeometryPoint"}
        ]));
        let tables = listing(json!([
            {"id": 2, "name": "Census"}
        ]));

        let items = layers.concat(tables).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(
            items.names().collect::<Vec<_>>(),
            vec![Some("Counties"), Some("Cities"), Some("Census")]
        );
        assert_eq!(
            items.ids().collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn concat_with_empty_side() {
        let layers = listing(json!([{"id": 0, "name": "Counties"}]));

        assert_eq!(
            layers.clone().concat(ItemListing::default()).unwrap(),
            layers
        );
        assert_eq!(
            ItemListing::default().concat(layers.clone()).unwrap(),
            layers
        );
    }

    #[test]
    fn nulls_do_not_conflict() {
        let layers = listing(json!([{"id": 0, "parentLayerId": null}]));
        let tables = listing(json!([{"id": 1, "parentLayerId": 3}]));

        assert_eq!(layers.concat(tables).unwrap().len(), 2);
    }

    #[test]
    fn incompatible_columns() {
        let layers = listing(json!([{"id": 0, "name": "Counties"}]));
        let tables = listing(json!([{"id": "a", "name": "Census"}]));

        let error = layers.concat(tables).unwrap_err();

        assert!(matches!(
            error,
            Error::IncompatibleListingColumn {
                ref column,
                left: ValueKind::Number,
                right: ValueKind::String,
            } if column == "id"
        ));
    }

    #[test]
    fn lookup() {
        let items = listing(json!([
            {"id": 0, "name": "Counties"},
            {"id": 4, "name": "Rivers"}
        ]));

        assert_eq!(
            items.find_by_id(4).and_then(|row| row.get("name")),
            Some(&json!("Rivers"))
        );
        assert_eq!(
            items.find_by_name("Counties").and_then(|row| row.get("id")),
            Some(&json!(0))
        );
        assert!(items.find_by_id(2).is_none());
    }
}
