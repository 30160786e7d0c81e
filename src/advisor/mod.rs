//! Statement review rules.
//!
//! Rules inspect SQL text that has been parsed with `sqlparser` and report
//! findings as [`Advice`] values. Parsing is treated as an opaque capability:
//! a statement the parser rejects becomes a syntax-error advice rather than
//! a failure.

mod index_key_number_limit;
mod statement;

pub use index_key_number_limit::IndexKeyNumberLimitAdvisor;
pub use statement::{parse_statements, ParsedStatement};

use serde::{Deserialize, Serialize};

/// Severity of one advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    #[default]
    Warning,
    Error,
}

/// Machine-readable advice code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceCode {
    Ok,
    StatementSyntaxError,
    IndexKeyNumberExceedsLimit,
}

/// One finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub status: Status,
    pub code: AdviceCode,
    pub title: String,
    pub content: String,
    /// 1-based line of the offending constraint or statement; 0 when unknown.
    pub line: usize,
}

impl Advice {
    /// The single advice returned when a rule finds nothing.
    pub fn ok() -> Self {
        Self {
            status: Status::Success,
            code: AdviceCode::Ok,
            title: "OK".to_string(),
            content: String::new(),
            line: 0,
        }
    }

    /// Advice for SQL the parser rejected.
    pub fn syntax_error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            code: AdviceCode::StatementSyntaxError,
            title: "Syntax error".to_string(),
            content: message.into(),
            line: 0,
        }
    }
}
