//! Table partitioning.
//!
//! The metadata document repeats a group's method and expression on every
//! sibling partition record. In the graph they are folded into one
//! [`PartitionGroup`] per sibling set, and re-expanded onto every record when
//! the document is emitted again.
//!
//! A partition may own a nested group (sub-partitions) of the same shape.
//! Nothing bounds the depth of that recursion; MySQL itself stops at two.

use std::collections::HashMap;
use std::io::Write;

use super::{in_id_order, Ordinal};
use crate::error::{StateError, StateResult};
use crate::metadata::{PartitionType, TablePartitionMetadata};
use crate::sql::mysql::MAXVALUE;

/// Method, expression and member partitions of one partitioning level.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionGroup {
    pub method: PartitionType,
    pub expression: String,
    pub partitions: HashMap<String, PartitionState>,
}

/// One partition and its optional sub-partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionState {
    id: usize,
    pub name: String,
    /// Boundary text, or `MAXVALUE` (any case).
    pub value: String,
    pub subpartitions: Option<PartitionGroup>,
}

impl Ordinal for PartitionState {
    fn id(&self) -> usize {
        self.id
    }
}

impl PartitionState {
    pub fn new(id: usize, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
            subpartitions: None,
        }
    }

    /// Attach sub-partitions.
    pub fn with_subpartitions(mut self, group: PartitionGroup) -> Self {
        self.subpartitions = Some(group);
        self
    }

    /// Sub-partitions, if this partition has at least one.
    fn children(&self) -> Option<&PartitionGroup> {
        self.subpartitions.as_ref().filter(|g| !g.partitions.is_empty())
    }

    /// Right-hand side of `VALUES LESS THAN`.
    fn bound(&self) -> String {
        if self.value.eq_ignore_ascii_case(MAXVALUE) {
            MAXVALUE.to_string()
        } else {
            format!("({})", self.value)
        }
    }
}

impl PartitionGroup {
    pub fn new(method: PartitionType, expression: impl Into<String>) -> Self {
        Self {
            method,
            expression: expression.into(),
            partitions: HashMap::new(),
        }
    }

    /// Add a partition, keyed by its name.
    pub fn partition(mut self, partition: PartitionState) -> Self {
        self.partitions.insert(partition.name.clone(), partition);
        self
    }

    /// Partitions sorted by ordinal id.
    pub fn partitions_in_order(&self) -> Vec<&PartitionState> {
        in_id_order(self.partitions.values())
    }

    /// Method and expression of the first non-empty nested group, in id order.
    ///
    /// Sibling sub-partition groups are assumed to share method and expression.
    pub fn subpartition_scheme(&self) -> Option<(PartitionType, &str)> {
        self.partitions_in_order()
            .into_iter()
            .find_map(PartitionState::children)
            .map(|g| (g.method, g.expression.as_str()))
    }

    // =========================================================================
    // Document conversion
    // =========================================================================

    /// Fold sibling partition records into a group; `None` for an empty list.
    ///
    /// Method and expression are taken from the first record.
    pub fn from_metadata(partitions: &[TablePartitionMetadata]) -> Option<Self> {
        let first = partitions.first()?;
        let mut group = Self::new(first.r#type, first.expression.clone());
        for (id, p) in partitions.iter().enumerate() {
            let mut state = PartitionState::new(id, p.name.clone(), p.value.clone());
            state.subpartitions = Self::from_metadata(&p.subpartitions);
            group.partitions.insert(p.name.clone(), state);
        }
        Some(group)
    }

    /// Expand the group back into one record per partition, in id order.
    pub fn to_metadata(&self) -> Vec<TablePartitionMetadata> {
        self.partitions_in_order()
            .into_iter()
            .map(|p| TablePartitionMetadata {
                name: p.name.clone(),
                r#type: self.method,
                expression: self.expression.clone(),
                value: p.value.clone(),
                subpartitions: p
                    .subpartitions
                    .as_ref()
                    .map(PartitionGroup::to_metadata)
                    .unwrap_or_default(),
            })
            .collect()
    }

    // =========================================================================
    // DDL
    // =========================================================================

    /// Fail if this group or its sub-partition scheme has no DDL keyword.
    pub fn ensure_supported(&self) -> StateResult<()> {
        partition_type_keyword(self.method)?;
        if let Some((tp, _)) = self.subpartition_scheme() {
            partition_type_keyword(tp)?;
        }
        Ok(())
    }

    /// Write the version-gated `PARTITION BY` clause.
    ///
    /// Partition methods are resolved before anything is written, so an
    /// unsupported method leaves the sink untouched.
    pub fn write_ddl<W: Write + ?Sized>(&self, w: &mut W, engine: &str) -> StateResult<()> {
        let method = partition_type_keyword(self.method)?;
        let sub = match self.subpartition_scheme() {
            Some((tp, expr)) => Some((partition_type_keyword(tp)?, expr)),
            None => None,
        };

        write!(w, "/*!50100 PARTITION BY {} ({})", method, self.expression)?;
        if let Some((sub_method, sub_expr)) = sub {
            write!(w, "\nSUBPARTITION BY {} ({})", sub_method, sub_expr)?;
        }
        self.write_members(w, engine, 0)?;
        w.write_all(b" */")?;
        Ok(())
    }

    /// Write one bracketed member list; `depth` 0 is the partition level.
    fn write_members<W: Write + ?Sized>(
        &self,
        w: &mut W,
        engine: &str,
        depth: usize,
    ) -> StateResult<()> {
        let members = self.partitions_in_order();
        let last = members.len().saturating_sub(1);
        for (idx, member) in members.iter().enumerate() {
            let prefix = if idx == 0 {
                format!("{}(", " ".repeat(depth))
            } else {
                " ".repeat(depth + 1)
            };
            write!(w, "\n{}", prefix)?;

            if depth == 0 {
                write!(
                    w,
                    "PARTITION {} VALUES LESS THAN {}",
                    member.name,
                    member.bound()
                )?;
            } else {
                write!(w, "SUBPARTITION {}", member.name)?;
            }

            match member.children() {
                Some(children) => children.write_members(w, engine, depth + 1)?,
                None => write!(w, " ENGINE = {}", engine)?,
            }

            w.write_all(if idx == last { b")" } else { b"," })?;
        }
        Ok(())
    }
}

/// DDL keyword for a partition method.
pub fn partition_type_keyword(tp: PartitionType) -> StateResult<&'static str> {
    match tp {
        PartitionType::Range => Ok("RANGE"),
        PartitionType::RangeColumns => Ok("RANGE COLUMNS"),
        PartitionType::List => Ok("LIST"),
        PartitionType::ListColumns => Ok("LIST COLUMNS"),
        PartitionType::Hash => Ok("HASH"),
        PartitionType::Key => Ok("KEY"),
        PartitionType::LinearHash => Ok("LINEAR HASH"),
        PartitionType::LinearKey => Ok("LINEAR KEY"),
        PartitionType::TypeUnspecified => {
            Err(StateError::UnsupportedPartitionType(tp.to_string()))
        }
    }
}
