//! Quoting helpers shared by the DDL renderer.

/// Quote identifier with backticks.
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote string with single quotes (standard SQL).
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// True when the key part is a functional expression such as `(lower(name))`.
pub fn is_parenthesized_expression(key: &str) -> bool {
    key.len() > 2 && key.starts_with('(') && key.ends_with(')')
}
