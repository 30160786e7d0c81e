//! Index key number limit.
//!
//! Flags indexes whose key count exceeds a configured maximum, in
//! `CREATE TABLE` constraints, `CREATE INDEX` and `ALTER TABLE ... ADD
//! CONSTRAINT`.

use sqlparser::ast::{
    AlterTableOperation, Ident, ObjectName, Spanned, Statement, TableConstraint,
};

use super::statement::parse_statements;
use super::{Advice, AdviceCode, Status};
use crate::config::AdvisorSettings;

/// Rule title reported on every finding.
const TITLE: &str = "index.key-number-limit";

/// Checks the number of keys per index.
#[derive(Debug, Clone)]
pub struct IndexKeyNumberLimitAdvisor {
    /// Maximum keys per index; 0 disables the rule.
    pub max: usize,
    /// Status assigned to findings.
    pub level: Status,
}

struct IndexData {
    table: String,
    index: String,
    line: usize,
}

impl IndexKeyNumberLimitAdvisor {
    pub fn new(max: usize, level: Status) -> Self {
        Self { max, level }
    }

    pub fn from_settings(settings: &AdvisorSettings) -> Self {
        Self::new(settings.max_index_keys, settings.level)
    }

    /// Check SQL text. Always returns at least one advice.
    pub fn check(&self, sql: &str) -> Vec<Advice> {
        let statements = match parse_statements(sql) {
            Ok(statements) => statements,
            Err(e) => return vec![Advice::syntax_error(e.to_string())],
        };

        let mut advice: Vec<Advice> = statements
            .iter()
            .flat_map(|parsed| self.oversized_indexes(&parsed.statement, parsed.line))
            .map(|index| Advice {
                status: self.level,
                code: AdviceCode::IndexKeyNumberExceedsLimit,
                title: TITLE.to_string(),
                content: format!(
                    "The number of index `{}` in table `{}` should be not greater than {}",
                    index.index, index.table, self.max
                ),
                line: index.line,
            })
            .collect();

        if advice.is_empty() {
            advice.push(Advice::ok());
        }
        advice
    }

    fn oversized_indexes(&self, statement: &Statement, line: usize) -> Vec<IndexData> {
        if self.max == 0 {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut push = |table: &ObjectName, index: String, line: usize| {
            found.push(IndexData {
                table: object_base_name(table),
                index,
                line,
            });
        };

        match statement {
            Statement::CreateTable(create) => {
                for constraint in &create.constraints {
                    if let Some((index, keys)) = constraint_keys(constraint) {
                        if keys > self.max {
                            push(&create.name, index, constraint_line(constraint, line));
                        }
                    }
                }
            }
            Statement::CreateIndex(create) => {
                if create.columns.len() > self.max {
                    let index = create
                        .name
                        .as_ref()
                        .map(object_base_name)
                        .unwrap_or_default();
                    push(&create.table_name, index, line);
                }
            }
            Statement::AlterTable {
                name, operations, ..
            } => {
                for op in operations {
                    if let AlterTableOperation::AddConstraint(constraint) = op {
                        if let Some((index, keys)) = constraint_keys(constraint) {
                            if keys > self.max {
                                push(name, index, line);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        found
    }
}

/// Index name and key count of an index-shaped constraint.
///
/// CHECK, FULLTEXT and SPATIAL constraints are not counted.
fn constraint_keys(constraint: &TableConstraint) -> Option<(String, usize)> {
    match constraint {
        TableConstraint::PrimaryKey {
            name,
            index_name,
            columns,
            ..
        }
        | TableConstraint::Unique {
            name,
            index_name,
            columns,
            ..
        } => Some((ident_name(index_name.as_ref().or(name.as_ref())), columns.len())),
        TableConstraint::Index { name, columns, .. } => {
            Some((ident_name(name.as_ref()), columns.len()))
        }
        TableConstraint::ForeignKey { name, columns, .. } => {
            Some((ident_name(name.as_ref()), columns.len()))
        }
        _ => None,
    }
}

/// Line the constraint starts on, or `fallback` when the parser kept no position.
fn constraint_line(constraint: &TableConstraint, fallback: usize) -> usize {
    match constraint.span().start.line {
        0 => fallback,
        line => line as usize,
    }
}

fn ident_name(ident: Option<&Ident>) -> String {
    ident.map(|i| i.value.clone()).unwrap_or_default()
}

/// Unqualified, unquoted object name.
fn object_base_name(name: &ObjectName) -> String {
    name.0.last().map(|i| i.value.clone()).unwrap_or_default()
}
