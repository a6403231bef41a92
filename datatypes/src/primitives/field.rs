use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// The field types an ArcGIS service reports in its `fields` array
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum FieldType {
    #[serde(rename = "esriFieldTypeSmallInteger")]
    #[strum(serialize = "esriFieldTypeSmallInteger")]
    SmallInteger,
    #[serde(rename = "esriFieldTypeInteger")]
    #[strum(serialize = "esriFieldTypeInteger")]
    Integer,
    #[serde(rename = "esriFieldTypeBigInteger")]
    #[strum(serialize = "esriFieldTypeBigInteger")]
    BigInteger,
    #[serde(rename = "esriFieldTypeSingle")]
    #[strum(serialize = "esriFieldTypeSingle")]
    Single,
    #[serde(rename = "esriFieldTypeDouble")]
    #[strum(serialize = "esriFieldTypeDouble")]
    Double,
    #[serde(rename = "esriFieldTypeString")]
    #[strum(serialize = "esriFieldTypeString")]
    String,
    #[serde(rename = "esriFieldTypeDate")]
    #[strum(serialize = "esriFieldTypeDate")]
    Date,
    #[serde(rename = "esriFieldTypeDateOnly")]
    #[strum(serialize = "esriFieldTypeDateOnly")]
    DateOnly,
    #[serde(rename = "esriFieldTypeTimeOnly")]
    #[strum(serialize = "esriFieldTypeTimeOnly")]
    TimeOnly,
    #[serde(rename = "esriFieldTypeTimestampOffset")]
    #[strum(serialize = "esriFieldTypeTimestampOffset")]
    TimestampOffset,
    #[serde(rename = "esriFieldTypeOID")]
    #[strum(serialize = "esriFieldTypeOID")]
    ObjectId,
    #[serde(rename = "esriFieldTypeGlobalID")]
    #[strum(serialize = "esriFieldTypeGlobalID")]
    GlobalId,
    #[serde(rename = "esriFieldTypeGUID")]
    #[strum(serialize = "esriFieldTypeGUID")]
    Guid,
    #[serde(rename = "esriFieldTypeGeometry")]
    #[strum(serialize = "esriFieldTypeGeometry")]
    Geometry,
    #[serde(rename = "esriFieldTypeBlob")]
    #[strum(serialize = "esriFieldTypeBlob")]
    Blob,
    #[serde(rename = "esriFieldTypeRaster")]
    #[strum(serialize = "esriFieldTypeRaster")]
    Raster,
    #[serde(rename = "esriFieldTypeXML")]
    #[strum(serialize = "esriFieldTypeXML")]
    Xml,
    /// any type this crate does not know about yet
    #[serde(other)]
    #[strum(serialize = "unknown")]
    Unknown,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a layer's `fields` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub sql_type: Option<String>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub domain: Option<serde_json::Value>,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            alias: None,
            sql_type: None,
            nullable: true,
            editable: true,
            length: None,
            domain: None,
            default_value: None,
        }
    }
}

/// The field descriptors of a layer or table.
///
/// A listing always has the same columns, regardless of how many rows it holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldListing {
    fields: Vec<Field>,
}

impl FieldListing {
    pub const COLUMNS: [&'static str; 9] = [
        "name",
        "type",
        "alias",
        "sqlType",
        "nullable",
        "editable",
        "length",
        "domain",
        "defaultValue",
    ];

    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// A listing without rows
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The object id field, if the layer has one
    pub fn object_id_field(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.field_type == FieldType::ObjectId)
    }
}

impl From<Vec<Field>> for FieldListing {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a FieldListing {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
