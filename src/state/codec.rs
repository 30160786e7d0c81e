//! Conversion between metadata documents and the state graph.
//!
//! Ingestion assigns ordinal ids by walking each source list once, in order.
//! Emission sorts every child collection by those ids, so the output never
//! depends on `HashMap` iteration order.

use super::{
    ColumnState, DatabaseState, DefaultValue, ForeignKeyState, IndexState, PartitionGroup,
    SchemaState, TableState,
};
use crate::metadata::{
    ColumnDefault, ColumnMetadata, DatabaseSchemaMetadata, ForeignKeyMetadata, IndexMetadata,
    SchemaMetadata, TableMetadata,
};
use crate::sql::mysql::normalize_on_update;

impl DatabaseState {
    /// Build a graph from a metadata document.
    pub fn from_metadata(database: &DatabaseSchemaMetadata) -> Self {
        let mut state = Self::new(database.name.clone());
        for (id, schema) in database.schemas.iter().enumerate() {
            state
                .schemas
                .insert(schema.name.clone(), SchemaState::from_metadata(id, schema));
        }
        tracing::debug!(
            database = %state.name,
            schemas = state.schemas.len(),
            "ingested database metadata"
        );
        state
    }

    /// Emit the graph as a metadata document.
    ///
    /// Extensions are not modeled and always come out empty.
    pub fn to_metadata(&self) -> DatabaseSchemaMetadata {
        let schemas: Vec<SchemaMetadata> = self
            .schemas_in_order()
            .into_iter()
            .map(SchemaState::to_metadata)
            .collect();
        tracing::debug!(
            database = %self.name,
            schemas = schemas.len(),
            "emitted database metadata"
        );
        DatabaseSchemaMetadata {
            name: self.name.clone(),
            schemas,
            extensions: Vec::new(),
        }
    }
}

impl SchemaState {
    pub(crate) fn from_metadata(id: usize, schema: &SchemaMetadata) -> Self {
        let mut state = Self::new(id, schema.name.clone());
        for (id, table) in schema.tables.iter().enumerate() {
            state
                .tables
                .insert(table.name.clone(), TableState::from_metadata(id, table));
        }
        tracing::debug!(
            schema = %state.name,
            tables = state.tables.len(),
            "ingested schema metadata"
        );
        state
    }

    /// Views, functions, streams, tasks and materialized views are not
    /// modeled and always come out empty.
    pub fn to_metadata(&self) -> SchemaMetadata {
        SchemaMetadata {
            name: self.name.clone(),
            tables: self
                .tables_in_order()
                .into_iter()
                .map(TableState::to_metadata)
                .collect(),
            views: Vec::new(),
            functions: Vec::new(),
            streams: Vec::new(),
            tasks: Vec::new(),
            materialized_views: Vec::new(),
        }
    }
}

impl TableState {
    pub(crate) fn from_metadata(id: usize, table: &TableMetadata) -> Self {
        let mut state = Self::new(id, table.name.clone());
        state.comment = table.comment.clone();
        state.engine = table.engine.clone();
        state.collation = table.collation.clone();
        for (id, column) in table.columns.iter().enumerate() {
            state
                .columns
                .insert(column.name.clone(), ColumnState::from_metadata(id, column));
        }
        for (id, index) in table.indexes.iter().enumerate() {
            state
                .indexes
                .insert(index.name.clone(), IndexState::from_metadata(id, index));
        }
        for (id, fk) in table.foreign_keys.iter().enumerate() {
            state
                .foreign_keys
                .insert(fk.name.clone(), ForeignKeyState::from_metadata(id, fk));
        }
        state.partition = PartitionGroup::from_metadata(&table.partitions);
        state
    }

    pub fn to_metadata(&self) -> TableMetadata {
        let columns = self
            .columns_in_order()
            .into_iter()
            .enumerate()
            .map(|(i, column)| {
                let mut meta = column.to_metadata();
                meta.position = i as i32 + 1;
                meta
            })
            .collect();

        TableMetadata {
            name: self.name.clone(),
            columns,
            indexes: self
                .indexes_in_order()
                .into_iter()
                .map(IndexState::to_metadata)
                .collect(),
            foreign_keys: self
                .foreign_keys_in_order()
                .into_iter()
                .map(ForeignKeyState::to_metadata)
                .collect(),
            comment: self.comment.clone(),
            engine: self.engine.clone(),
            collation: self.collation.clone(),
            partitions: self
                .partition
                .as_ref()
                .map(PartitionGroup::to_metadata)
                .unwrap_or_default(),
        }
    }
}

impl ColumnState {
    /// Absence of a default is preserved here; see [`ColumnState::to_metadata`].
    pub(crate) fn from_metadata(id: usize, column: &ColumnMetadata) -> Self {
        Self {
            id,
            name: column.name.clone(),
            r#type: column.r#type.clone(),
            nullable: column.nullable,
            default: column.default_value.as_ref().map(DefaultValue::from),
            on_update: normalize_on_update(&column.on_update),
            comment: column.comment.clone(),
        }
    }

    /// A nullable column without a default is emitted with an explicit
    /// `DefaultNull`. Position is left at 0 for the table to fill in.
    pub fn to_metadata(&self) -> ColumnMetadata {
        let default_value = match &self.default {
            Some(default) => Some(ColumnDefault::from(default)),
            None if self.nullable => Some(ColumnDefault::DefaultNull),
            None => None,
        };
        ColumnMetadata {
            name: self.name.clone(),
            position: 0,
            default_value,
            on_update: self.on_update.clone(),
            nullable: self.nullable,
            r#type: self.r#type.clone(),
            comment: self.comment.clone(),
        }
    }
}

impl IndexState {
    pub(crate) fn from_metadata(id: usize, index: &IndexMetadata) -> Self {
        Self {
            id,
            name: index.name.clone(),
            keys: index.expressions.clone(),
            lengths: index.key_length.clone(),
            primary: index.primary,
            unique: index.unique,
            method: index.r#type.clone(),
            comment: index.comment.clone(),
        }
    }

    pub fn to_metadata(&self) -> IndexMetadata {
        IndexMetadata {
            name: self.name.clone(),
            expressions: self.keys.clone(),
            key_length: self.lengths.clone(),
            r#type: self.method.clone(),
            unique: self.unique,
            primary: self.primary,
            visible: true,
            comment: self.comment.clone(),
        }
    }
}

impl ForeignKeyState {
    pub(crate) fn from_metadata(id: usize, fk: &ForeignKeyMetadata) -> Self {
        Self {
            id,
            name: fk.name.clone(),
            columns: fk.columns.clone(),
            referenced_table: fk.referenced_table.clone(),
            referenced_columns: fk.referenced_columns.clone(),
        }
    }

    pub fn to_metadata(&self) -> ForeignKeyMetadata {
        ForeignKeyMetadata {
            name: self.name.clone(),
            columns: self.columns.clone(),
            referenced_table: self.referenced_table.clone(),
            referenced_columns: self.referenced_columns.clone(),
        }
    }
}

impl From<&DatabaseSchemaMetadata> for DatabaseState {
    fn from(doc: &DatabaseSchemaMetadata) -> Self {
        Self::from_metadata(doc)
    }
}

impl From<&DatabaseState> for DatabaseSchemaMetadata {
    fn from(state: &DatabaseState) -> Self {
        state.to_metadata()
    }
}

impl From<&TableMetadata> for TableState {
    /// Convert a standalone table; it gets ordinal id 0.
    fn from(table: &TableMetadata) -> Self {
        Self::from_metadata(0, table)
    }
}
