//! Schema metadata documents.
//!
//! This module defines the persisted/wire shape of a database's structure:
//! the document a driver produces after introspecting a live database and
//! the document the codec in [`crate::state`] consumes and re-emits.
//!
//! # Shape
//!
//! ```text
//! DatabaseSchemaMetadata
//! └── SchemaMetadata*          (+ views, functions, streams, tasks, materialized views)
//!     └── TableMetadata*
//!         ├── ColumnMetadata*
//!         ├── IndexMetadata*
//!         ├── ForeignKeyMetadata*
//!         └── TablePartitionMetadata*
//!             └── TablePartitionMetadata*   (sub-partitions)
//! ```
//!
//! Documents are plain serde values; [`DatabaseSchemaMetadata::from_json`] and
//! [`DatabaseSchemaMetadata::load_from_file`] read them from JSON.

mod types;

pub use types::*;
