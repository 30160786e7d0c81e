//! Splitting and parsing review input.

use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::{StateError, StateResult};

/// A parsed statement and the line it starts on.
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    pub statement: Statement,
    /// 1-based.
    pub line: usize,
}

/// Parse MySQL text into statements, each tagged with its starting line.
pub fn parse_statements(sql: &str) -> StateResult<Vec<ParsedStatement>> {
    let dialect = MySqlDialect {};
    let statements =
        Parser::parse_sql(&dialect, sql).map_err(|e| StateError::Parse(e.to_string()))?;
    let lines = statement_start_lines(&dialect, sql)?;

    Ok(statements
        .into_iter()
        .enumerate()
        .map(|(i, statement)| ParsedStatement {
            statement,
            line: lines.get(i).copied().unwrap_or(1),
        })
        .collect())
}

/// Line of the first significant token of every `;`-separated statement.
fn statement_start_lines(dialect: &MySqlDialect, sql: &str) -> StateResult<Vec<usize>> {
    let tokens = Tokenizer::new(dialect, sql)
        .tokenize()
        .map_err(|e| StateError::Parse(e.to_string()))?;

    let mut lines = Vec::new();
    let mut line = 1;
    let mut current: Option<usize> = None;
    for token in &tokens {
        match token {
            Token::SemiColon => {
                if let Some(start) = current.take() {
                    lines.push(start);
                }
            }
            Token::Whitespace(_) | Token::EOF => {}
            _ => {
                if current.is_none() {
                    current = Some(line);
                }
            }
        }
        line += token.to_string().matches('\n').count();
    }
    if let Some(start) = current {
        lines.push(start);
    }
    Ok(lines)
}
