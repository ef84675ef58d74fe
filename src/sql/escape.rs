//! SQL escaping helpers

/// Escape SQL LIKE metacharacters (%, _, \) in user input.
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching; rendered LIKE predicates carry
/// `ESCAPE '\'` so the escapes apply on every backend.
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Quote a string as a SQL literal, doubling embedded quotes.
///
/// Only the literal rendering mode uses this; the placeholder mode binds
/// strings as parameters instead.
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
