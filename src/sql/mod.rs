//! SQL text helpers for the MySQL dialect family.
//!
//! - [`helpers`] - identifier and string quoting
//! - [`mysql`] - dialect rules for defaults, `ON UPDATE` and partition bounds

pub mod helpers;
pub mod mysql;

pub use helpers::{quote_backtick, quote_string_single};
