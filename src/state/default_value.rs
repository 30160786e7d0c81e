//! Column default values.

use crate::metadata::ColumnDefault;
use crate::sql::helpers::quote_string_single;

/// A column's default: exactly one of three kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// `DEFAULT NULL`.
    Null,
    /// A string literal, quoted on output.
    Literal(String),
    /// A raw SQL expression, emitted verbatim.
    Expression(String),
}

impl DefaultValue {
    /// Create a literal default.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Create an expression default.
    pub fn expression(expr: impl Into<String>) -> Self {
        Self::Expression(expr.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// SQL text of the value, without the `DEFAULT` keyword.
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Literal(value) => quote_string_single(value),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

impl From<&ColumnDefault> for DefaultValue {
    fn from(d: &ColumnDefault) -> Self {
        match d {
            ColumnDefault::DefaultNull => Self::Null,
            ColumnDefault::Default(value) => Self::Literal(value.clone()),
            ColumnDefault::DefaultExpression(expr) => Self::Expression(expr.clone()),
        }
    }
}

impl From<&DefaultValue> for ColumnDefault {
    fn from(d: &DefaultValue) -> Self {
        match d {
            DefaultValue::Null => Self::DefaultNull,
            DefaultValue::Literal(value) => Self::Default(value.clone()),
            DefaultValue::Expression(expr) => Self::DefaultExpression(expr.clone()),
        }
    }
}
