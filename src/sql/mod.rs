//! SQL rendering layer for multi-database support
//!
//! This module renders query values to SQL text for different database
//! backends. Only placeholder syntax varies between the supported backends,
//! so the dialect is a plain enum rather than a trait.

mod escape;
mod expr;
mod select;

pub use escape::{escape_like_pattern, quote_literal};
pub use expr::{Expr, SqlParams};
pub use select::{OrderDirection, Select};

/// Database backend identifier, selecting placeholder syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
    Duckdb,
}

impl Dialect {
    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite/DuckDB: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Sqlite | Dialect::Duckdb => "?".to_string(),
            Dialect::Postgres => format!("${}", index),
        }
    }

    /// Get the dialect name
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::Duckdb => "duckdb",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
