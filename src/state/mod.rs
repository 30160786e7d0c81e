//! Schema state: a mutable, name-indexed object graph of one database.
//!
//! Every container is a `HashMap` keyed by the child's name, which gives
//! O(1) lookup for a diff stage but no meaningful iteration order. Each child
//! carries an ordinal id, assigned once in first-seen order; that id is the
//! only sort key used when anything is emitted.
//!
//! ```text
//! DatabaseState
//! └── SchemaState            (by name)
//!     └── TableState         (by name)
//!         ├── ColumnState    (by name)
//!         ├── IndexState     (by name)
//!         ├── ForeignKeyState(by name)
//!         └── PartitionGroup?
//!             └── PartitionState (by name)
//!                 └── PartitionGroup?   (sub-partitions, same shape)
//! ```
//!
//! - `codec` converts between the graph and a [`crate::metadata`] document
//! - [`render`] writes canonical `CREATE TABLE` text
//! - [`partition`] holds the recursive partition model and its renderer

mod codec;
mod default_value;
pub mod partition;
pub mod render;

use std::collections::HashMap;

pub use default_value::DefaultValue;
pub use partition::{PartitionGroup, PartitionState};
pub use render::RenderOptions;

/// An entity with a stable ordinal id.
pub trait Ordinal {
    /// Ordinal id, assigned once at creation.
    fn id(&self) -> usize;
}

/// Collect map values sorted by ordinal id.
pub fn in_id_order<'a, T, I>(values: I) -> Vec<&'a T>
where
    T: Ordinal + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&T> = values.into_iter().collect();
    sorted.sort_by_key(|v| v.id());
    sorted
}

/// Next free ordinal id in a container.
fn next_id<T: Ordinal>(map: &HashMap<String, T>) -> usize {
    map.values().map(Ordinal::id).max().map_or(0, |max| max + 1)
}

macro_rules! impl_ordinal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Ordinal for $ty {
                fn id(&self) -> usize {
                    self.id
                }
            }
        )*
    };
}

impl_ordinal!(
    SchemaState,
    TableState,
    ColumnState,
    IndexState,
    ForeignKeyState,
);

// ============================================================================
// Database / Schema
// ============================================================================

/// Root of the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseState {
    pub name: String,
    pub schemas: HashMap<String, SchemaState>,
}

impl DatabaseState {
    /// Create an empty database state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: HashMap::new(),
        }
    }

    /// Schemas sorted by ordinal id.
    pub fn schemas_in_order(&self) -> Vec<&SchemaState> {
        in_id_order(self.schemas.values())
    }

    /// Look up a schema by name.
    pub fn schema(&self, name: &str) -> Option<&SchemaState> {
        self.schemas.get(name)
    }

    /// Look up a schema by name for mutation.
    pub fn schema_mut(&mut self, name: &str) -> Option<&mut SchemaState> {
        self.schemas.get_mut(name)
    }

    /// Insert a schema, replacing any schema with the same name.
    pub fn insert_schema(&mut self, schema: SchemaState) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Get the named schema, creating it with the next ordinal id if absent.
    pub fn add_schema(&mut self, name: &str) -> &mut SchemaState {
        let id = next_id(&self.schemas);
        self.schemas
            .entry(name.to_string())
            .or_insert_with(|| SchemaState::new(id, name))
    }
}

/// One schema and its tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaState {
    id: usize,
    pub name: String,
    pub tables: HashMap<String, TableState>,
}

impl SchemaState {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    /// Tables sorted by ordinal id.
    pub fn tables_in_order(&self) -> Vec<&TableState> {
        in_id_order(self.tables.values())
    }

    pub fn table(&self, name: &str) -> Option<&TableState> {
        self.tables.get(name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut TableState> {
        self.tables.get_mut(name)
    }

    /// Insert a table, replacing any table with the same name.
    pub fn insert_table(&mut self, table: TableState) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Get the named table, creating it with the next ordinal id if absent.
    pub fn add_table(&mut self, name: &str) -> &mut TableState {
        let id = next_id(&self.tables);
        self.tables
            .entry(name.to_string())
            .or_insert_with(|| TableState::new(id, name))
    }
}

// ============================================================================
// Table
// ============================================================================

/// One table: columns, indexes, foreign keys and optional partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    id: usize,
    pub name: String,
    pub columns: HashMap<String, ColumnState>,
    pub indexes: HashMap<String, IndexState>,
    pub foreign_keys: HashMap<String, ForeignKeyState>,
    pub comment: String,
    /// Storage engine; empty when unknown.
    pub engine: String,
    pub collation: String,
    pub partition: Option<PartitionGroup>,
}

impl TableState {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            columns: HashMap::new(),
            indexes: HashMap::new(),
            foreign_keys: HashMap::new(),
            comment: String::new(),
            engine: String::new(),
            collation: String::new(),
            partition: None,
        }
    }

    pub fn columns_in_order(&self) -> Vec<&ColumnState> {
        in_id_order(self.columns.values())
    }

    pub fn indexes_in_order(&self) -> Vec<&IndexState> {
        in_id_order(self.indexes.values())
    }

    pub fn foreign_keys_in_order(&self) -> Vec<&ForeignKeyState> {
        in_id_order(self.foreign_keys.values())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnState> {
        self.columns.get(name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnState> {
        self.columns.get_mut(name)
    }

    pub fn index(&self, name: &str) -> Option<&IndexState> {
        self.indexes.get(name)
    }

    pub fn index_mut(&mut self, name: &str) -> Option<&mut IndexState> {
        self.indexes.get_mut(name)
    }

    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKeyState> {
        self.foreign_keys.get(name)
    }

    pub fn foreign_key_mut(&mut self, name: &str) -> Option<&mut ForeignKeyState> {
        self.foreign_keys.get_mut(name)
    }

    pub fn insert_column(&mut self, column: ColumnState) {
        self.columns.insert(column.name.clone(), column);
    }

    pub fn insert_index(&mut self, index: IndexState) {
        self.indexes.insert(index.name.clone(), index);
    }

    pub fn insert_foreign_key(&mut self, fk: ForeignKeyState) {
        self.foreign_keys.insert(fk.name.clone(), fk);
    }

    /// Append a column after every existing one.
    pub fn add_column(&mut self, name: &str, tp: &str) -> &mut ColumnState {
        let id = next_id(&self.columns);
        self.columns
            .entry(name.to_string())
            .or_insert_with(|| ColumnState::new(id, name, tp))
    }

    /// Append an index after every existing one.
    pub fn add_index(&mut self, name: &str) -> &mut IndexState {
        let id = next_id(&self.indexes);
        self.indexes
            .entry(name.to_string())
            .or_insert_with(|| IndexState::new(id, name))
    }

    /// Append a foreign key after every existing one.
    pub fn add_foreign_key(&mut self, name: &str) -> &mut ForeignKeyState {
        let id = next_id(&self.foreign_keys);
        self.foreign_keys
            .entry(name.to_string())
            .or_insert_with(|| ForeignKeyState::new(id, name))
    }
}

// ============================================================================
// Column / Index / Foreign key
// ============================================================================

/// One table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    id: usize,
    pub name: String,
    /// Declared type, e.g. `varchar(255)`.
    pub r#type: String,
    pub nullable: bool,
    /// `None` means the source specified no default.
    pub default: Option<DefaultValue>,
    pub on_update: String,
    pub comment: String,
}

impl ColumnState {
    pub fn new(id: usize, name: impl Into<String>, tp: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            r#type: tp.into(),
            nullable: false,
            default: None,
            on_update: String::new(),
            comment: String::new(),
        }
    }

    /// Mark column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_on_update(mut self, expr: impl Into<String>) -> Self {
        self.on_update = expr.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// One index, including the primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexState {
    id: usize,
    pub name: String,
    /// Key parts in order. Parenthesized parts are expressions.
    pub keys: Vec<String>,
    /// Prefix length per key part, positionally; missing or `<= 0` means none.
    pub lengths: Vec<i64>,
    pub primary: bool,
    pub unique: bool,
    /// Index method as reported by the source, e.g. `BTREE`.
    pub method: String,
    pub comment: String,
}

impl IndexState {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            keys: Vec::new(),
            lengths: Vec::new(),
            primary: false,
            unique: false,
            method: String::new(),
            comment: String::new(),
        }
    }

    /// Set key parts.
    pub fn keys(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set prefix lengths.
    pub fn lengths(mut self, lengths: impl IntoIterator<Item = i64>) -> Self {
        self.lengths = lengths.into_iter().collect();
        self
    }

    /// Mark as the primary key (which is also unique).
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self.unique = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Prefix length of the key part at `position`, if any.
    pub fn prefix_length(&self, position: usize) -> Option<i64> {
        self.lengths.get(position).copied().filter(|len| *len > 0)
    }
}

/// One foreign key.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyState {
    id: usize,
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

impl ForeignKeyState {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            columns: Vec::new(),
            referenced_table: String::new(),
            referenced_columns: Vec::new(),
        }
    }

    /// Set the local columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the referenced table and columns.
    pub fn references(
        mut self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.referenced_table = table.into();
        self.referenced_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}
