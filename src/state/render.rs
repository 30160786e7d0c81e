//! Canonical `CREATE TABLE` rendering.
//!
//! Rendering walks the graph depth-first in ordinal id order and writes
//! straight to the caller's sink. A failed write aborts the walk; text that
//! already reached the sink stays there.
//!
//! # Example
//!
//! ```ignore
//! let mut out = std::io::stdout().lock();
//! table.write_ddl(&mut out)?;
//! ```

use std::io::Write;

use super::{ColumnState, DefaultValue, ForeignKeyState, IndexState, SchemaState, TableState};
use crate::error::StateResult;
use crate::sql::helpers::{is_parenthesized_expression, quote_backtick, quote_string_single};
use crate::sql::mysql::{is_expression_default_only_type, AUTO_INCREMENT_SYMBOL, AUTO_RAND_SYMBOL};

/// Separator between members of the table's bracketed definition list.
const MEMBER_SEPARATOR: &str = ",\n  ";

/// Knobs for DDL rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Storage engine annotated on each leaf partition.
    pub partition_engine: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            partition_engine: "InnoDB".to_string(),
        }
    }
}

// ============================================================================
// Schema / Table
// ============================================================================

impl SchemaState {
    /// Write every table in id order, separated by a blank line.
    pub fn write_ddl<W: Write + ?Sized>(&self, w: &mut W) -> StateResult<()> {
        self.write_ddl_with(w, &RenderOptions::default())
    }

    pub fn write_ddl_with<W: Write + ?Sized>(
        &self,
        w: &mut W,
        options: &RenderOptions,
    ) -> StateResult<()> {
        for (i, table) in self.tables_in_order().into_iter().enumerate() {
            if i > 0 {
                w.write_all(b"\n")?;
            }
            table.write_ddl_with(w, options)?;
        }
        Ok(())
    }
}

impl TableState {
    /// Write the table's `CREATE TABLE` statement, terminated by `;\n`.
    pub fn write_ddl<W: Write + ?Sized>(&self, w: &mut W) -> StateResult<()> {
        self.write_ddl_with(w, &RenderOptions::default())
    }

    pub fn write_ddl_with<W: Write + ?Sized>(
        &self,
        w: &mut W,
        options: &RenderOptions,
    ) -> StateResult<()> {
        tracing::trace!(table = %self.name, "rendering table");

        write!(w, "CREATE TABLE {} (\n  ", quote_backtick(&self.name))?;

        // Separators depend on how many members were written, not on the
        // position within each kind.
        let mut emitted = 0usize;
        for column in self.columns_in_order() {
            write_separator(w, emitted)?;
            column.write_ddl(w)?;
            emitted += 1;
        }
        for index in self.indexes_in_order() {
            write_separator(w, emitted)?;
            index.write_ddl(w)?;
            emitted += 1;
        }
        for fk in self.foreign_keys_in_order() {
            write_separator(w, emitted)?;
            fk.write_ddl(w)?;
            emitted += 1;
        }

        w.write_all(b"\n)")?;

        if !self.engine.is_empty() {
            write!(w, " ENGINE={}", self.engine)?;
        }
        if !self.collation.is_empty() {
            write!(w, " COLLATE={}", self.collation)?;
        }
        if !self.comment.is_empty() {
            write!(w, " COMMENT {}", quote_string_single(&self.comment))?;
        }

        if let Some(partition) = &self.partition {
            partition.ensure_supported()?;
            w.write_all(b"\n")?;
            partition.write_ddl(w, &options.partition_engine)?;
        }

        w.write_all(b";\n")?;
        Ok(())
    }

    /// Render into a string.
    pub fn to_ddl(&self) -> StateResult<String> {
        self.to_ddl_with(&RenderOptions::default())
    }

    pub fn to_ddl_with(&self, options: &RenderOptions) -> StateResult<String> {
        let mut buf = Vec::new();
        self.write_ddl_with(&mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn write_separator<W: Write + ?Sized>(w: &mut W, emitted: usize) -> StateResult<()> {
    if emitted > 0 {
        w.write_all(MEMBER_SEPARATOR.as_bytes())?;
    }
    Ok(())
}

// ============================================================================
// Column
// ============================================================================

impl ColumnState {
    /// Write the column definition, without separators.
    pub fn write_ddl<W: Write + ?Sized>(&self, w: &mut W) -> StateResult<()> {
        write!(w, "{} {}", quote_backtick(&self.name), self.r#type)?;
        if !self.nullable {
            w.write_all(b" NOT NULL")?;
        }
        if let Some(default) = &self.default {
            self.write_default(w, default)?;
        }
        if !self.on_update.is_empty() {
            write!(w, " ON UPDATE {}", self.on_update)?;
        }
        if !self.comment.is_empty() {
            write!(w, " COMMENT {}", quote_string_single(&self.comment))?;
        }
        Ok(())
    }

    fn write_default<W: Write + ?Sized>(
        &self,
        w: &mut W,
        default: &DefaultValue,
    ) -> StateResult<()> {
        // BLOB/TEXT/JSON/spatial columns reject a literal DEFAULT NULL.
        if default.is_null() && self.nullable && is_expression_default_only_type(&self.r#type) {
            return Ok(());
        }

        let text = default.to_sql();
        match default {
            DefaultValue::Expression(expr) if expr.eq_ignore_ascii_case(AUTO_INCREMENT_SYMBOL) => {
                write!(w, " {}", text)?;
            }
            DefaultValue::Expression(expr) if expr.to_uppercase().contains(AUTO_RAND_SYMBOL) => {
                write!(w, " /*T![auto_rand] {} */", text)?;
            }
            _ => {
                write!(w, " DEFAULT {}", text)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Index
// ============================================================================

impl IndexState {
    /// Write the index definition, without separators.
    pub fn write_ddl<W: Write + ?Sized>(&self, w: &mut W) -> StateResult<()> {
        if self.primary {
            w.write_all(b"PRIMARY KEY (")?;
            for (j, key) in self.keys.iter().enumerate() {
                if j > 0 {
                    w.write_all(b", ")?;
                }
                w.write_all(quote_backtick(key).as_bytes())?;
                if let Some(len) = self.prefix_length(j) {
                    write!(w, "({})", len)?;
                }
            }
            w.write_all(b")")?;
        } else {
            let method = self.method.to_uppercase();
            let keyword = match method.as_str() {
                "FULLTEXT" => "FULLTEXT KEY",
                "SPATIAL" => "SPATIAL KEY",
                _ if self.unique => "UNIQUE KEY",
                _ => "KEY",
            };
            write!(w, "{} {} (", keyword, quote_backtick(&self.name))?;
            for (j, key) in self.keys.iter().enumerate() {
                if j > 0 {
                    w.write_all(b",")?;
                }
                if is_parenthesized_expression(key) {
                    w.write_all(key.as_bytes())?;
                } else {
                    w.write_all(quote_backtick(key).as_bytes())?;
                    if let Some(len) = self.prefix_length(j) {
                        write!(w, "({})", len)?;
                    }
                }
            }
            w.write_all(b")")?;

            match method.as_str() {
                "BTREE" => w.write_all(b" USING BTREE")?,
                "HASH" => w.write_all(b" USING HASH")?,
                _ => {}
            }
        }

        if !self.comment.is_empty() {
            write!(w, " COMMENT {}", quote_string_single(&self.comment))?;
        }
        Ok(())
    }
}

// ============================================================================
// Foreign key
// ============================================================================

impl ForeignKeyState {
    /// Write the constraint definition, without separators.
    pub fn write_ddl<W: Write + ?Sized>(&self, w: &mut W) -> StateResult<()> {
        write!(
            w,
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quote_backtick(&self.name),
            quote_list(&self.columns),
            quote_backtick(&self.referenced_table),
            quote_list(&self.referenced_columns),
        )?;
        Ok(())
    }
}

fn quote_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_backtick(c))
        .collect::<Vec<_>>()
        .join(", ")
}
