//! Metadata document types.
//!
//! Every collection defaults to empty and every scalar to its zero value, so
//! sparse documents deserialize without ceremony.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

/// Structure of one database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSchemaMetadata {
    /// Database name.
    pub name: String,
    /// Schemas in declaration order.
    pub schemas: Vec<SchemaMetadata>,
    /// Installed extensions. Not modeled by the state graph.
    pub extensions: Vec<ExtensionMetadata>,
}

impl DatabaseSchemaMetadata {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> StateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> StateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StateResult<Self> {
        let data = fs::read_to_string(path).map_err(StateError::Io)?;
        Self::from_json(&data)
    }

    /// Save the document to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StateResult<()> {
        let data = self.to_json_pretty()?;
        fs::write(path, data).map_err(StateError::Io)
    }
}

/// Structure of one schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMetadata {
    /// Schema name. Empty for engines without schemas (MySQL).
    pub name: String,
    /// Tables in declaration order.
    pub tables: Vec<TableMetadata>,
    pub views: Vec<ViewMetadata>,
    pub functions: Vec<FunctionMetadata>,
    pub streams: Vec<StreamMetadata>,
    pub tasks: Vec<TaskMetadata>,
    pub materialized_views: Vec<MaterializedViewMetadata>,
}

/// Structure of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableMetadata {
    pub name: String,
    pub columns: Vec<ColumnMetadata>,
    pub indexes: Vec<IndexMetadata>,
    pub foreign_keys: Vec<ForeignKeyMetadata>,
    pub comment: String,
    /// Storage engine, e.g. `InnoDB`.
    pub engine: String,
    pub collation: String,
    /// Top-level partitions. Each record repeats the group's type and expression.
    pub partitions: Vec<TablePartitionMetadata>,
}

/// Structure of one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMetadata {
    pub name: String,
    /// Ordinal position (1-based).
    pub position: i32,
    /// `None` means no default was specified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ColumnDefault>,
    pub on_update: String,
    pub nullable: bool,
    /// Declared type, e.g. `varchar(255)`.
    #[serde(rename = "type")]
    pub r#type: String,
    pub comment: String,
}

/// Column default as carried by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDefault {
    /// Explicit `DEFAULT NULL`.
    DefaultNull,
    /// A literal string value.
    Default(String),
    /// A raw SQL expression such as `CURRENT_TIMESTAMP`.
    DefaultExpression(String),
}

/// Structure of one index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexMetadata {
    pub name: String,
    /// Key parts. Parenthesized entries are functional key parts.
    pub expressions: Vec<String>,
    /// Prefix length per key part; 0 or missing means none.
    pub key_length: Vec<i64>,
    /// Index method: `BTREE`, `HASH`, `FULLTEXT`, `SPATIAL`, ...
    #[serde(rename = "type")]
    pub r#type: String,
    pub unique: bool,
    pub primary: bool,
    pub visible: bool,
    pub comment: String,
}

/// Structure of one foreign key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyMetadata {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

/// One partition (or sub-partition) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePartitionMetadata {
    pub name: String,
    /// Partitioning method of the enclosing group.
    #[serde(rename = "type")]
    pub r#type: PartitionType,
    /// Partitioning expression of the enclosing group.
    pub expression: String,
    /// Boundary value, or `MAXVALUE`.
    pub value: String,
    pub subpartitions: Vec<TablePartitionMetadata>,
}

/// Partitioning method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartitionType {
    Range,
    RangeColumns,
    List,
    ListColumns,
    Hash,
    Key,
    LinearHash,
    LinearKey,
    /// Also the value of any method name this crate does not know.
    #[default]
    #[serde(other)]
    TypeUnspecified,
}

impl PartitionType {
    /// Document spelling of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeUnspecified => "TYPE_UNSPECIFIED",
            Self::Range => "RANGE",
            Self::RangeColumns => "RANGE_COLUMNS",
            Self::List => "LIST",
            Self::ListColumns => "LIST_COLUMNS",
            Self::Hash => "HASH",
            Self::Key => "KEY",
            Self::LinearHash => "LINEAR_HASH",
            Self::LinearKey => "LINEAR_KEY",
        }
    }
}

impl fmt::Display for PartitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewMetadata {
    pub name: String,
    pub definition: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionMetadata {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamMetadata {
    pub name: String,
    pub table_name: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMetadata {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializedViewMetadata {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionMetadata {
    pub name: String,
    pub schema: String,
    pub version: String,
}
