//! # Schemastate
//!
//! Schema-state normalization and canonical DDL synthesis for the MySQL
//! dialect family.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │           Schema Metadata Document (metadata)            │
//! │   (databases, schemas, tables, columns, indexes, ...)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │  ▲
//!            [codec] from  ▼  │ to
//! ┌─────────────────────────────────────────────────────────┐
//! │                 State Graph (state)                      │
//! │   name-indexed maps + ordinal ids for emission order     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Canonical CREATE TABLE text                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Alongside the core, [`advisor`] runs statement review rules over SQL text
//! and [`config`] loads settings from TOML.
//!
//! ## Example
//!
//! ```ignore
//! use schemastate::prelude::*;
//!
//! let doc = DatabaseSchemaMetadata::load_from_file("shop.json")?;
//! let state = DatabaseState::from_metadata(&doc);
//! for schema in state.schemas_in_order() {
//!     schema.write_ddl(&mut std::io::stdout().lock())?;
//! }
//! ```

pub mod advisor;
pub mod config;
pub mod error;
pub mod metadata;
pub mod sql;
pub mod state;

pub use error::{StateError, StateResult};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::error::{StateError, StateResult};
    pub use crate::metadata::{
        ColumnDefault, ColumnMetadata, DatabaseSchemaMetadata, ForeignKeyMetadata, IndexMetadata,
        PartitionType, SchemaMetadata, TableMetadata, TablePartitionMetadata,
    };
    pub use crate::state::{
        ColumnState, DatabaseState, DefaultValue, ForeignKeyState, IndexState, Ordinal,
        PartitionGroup, PartitionState, RenderOptions, SchemaState, TableState,
    };
}

// Also export at crate root for convenience
pub use metadata::DatabaseSchemaMetadata;
pub use state::{DatabaseState, TableState};
