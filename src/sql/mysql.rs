//! MySQL dialect-family rules used when rendering column definitions.
//!
//! - BLOB, TEXT, JSON and spatial types only accept expression defaults, so a
//!   literal `DEFAULT NULL` must not be written for them
//! - `AUTO_INCREMENT` is a column attribute, not a default
//! - TiDB's `AUTO_RANDOM` is wrapped in a `/*T![auto_rand] ... */` comment

/// Column attribute rendered bare when stored as a default expression.
pub const AUTO_INCREMENT_SYMBOL: &str = "AUTO_INCREMENT";

/// Marker for TiDB random primary keys.
pub const AUTO_RAND_SYMBOL: &str = "AUTO_RANDOM";

/// Upper bound keyword of the last RANGE partition.
pub const MAXVALUE: &str = "MAXVALUE";

/// Types that cannot carry a literal default.
const EXPRESSION_DEFAULT_ONLY_TYPES: &[&str] = &[
    "BLOB",
    "TINYBLOB",
    "MEDIUMBLOB",
    "LONGBLOB",
    "TEXT",
    "TINYTEXT",
    "MEDIUMTEXT",
    "LONGTEXT",
    "JSON",
    "GEOMETRY",
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

/// Functions accepted in `ON UPDATE`, all synonyms of the current timestamp.
const CURRENT_TIMESTAMP_FUNCTIONS: &[&str] = &[
    "CURRENT_TIMESTAMP",
    "NOW",
    "LOCALTIME",
    "LOCALTIMESTAMP",
];

/// Check whether the declared type only accepts expression defaults.
pub fn is_expression_default_only_type(tp: &str) -> bool {
    let upper = tp.trim().to_uppercase();
    EXPRESSION_DEFAULT_ONLY_TYPES.contains(&upper.as_str())
}

/// Upper-case current-timestamp expressions; leave anything else verbatim.
///
/// `current_timestamp(3)` becomes `CURRENT_TIMESTAMP(3)`, `now()` becomes `NOW()`.
pub fn normalize_on_update(expr: &str) -> String {
    let trimmed = expr.trim();
    let upper = trimmed.to_uppercase();
    let function = upper.split('(').next().unwrap_or_default().trim_end();
    if !CURRENT_TIMESTAMP_FUNCTIONS.contains(&function) {
        return expr.to_string();
    }
    let args = &upper[function.len()..];
    let is_call = args.is_empty()
        || (args.starts_with('(')
            && args.ends_with(')')
            && args[1..args.len() - 1].chars().all(|c| c.is_ascii_digit()));
    if is_call {
        upper
    } else {
        expr.to_string()
    }
}
