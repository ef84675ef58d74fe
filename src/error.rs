//! Error types for query composition and filter application
//!
//! Two layers, mirroring where failures originate:
//! - `QueryError` - the query/schema layer (unresolvable columns, underivable
//!   joins). These are configuration mistakes, deterministic and fatal to the
//!   call that hit them.
//! - `FilterError` - the filter layer; wraps `QueryError` and adds value-shape
//!   and registration failures.
//!
//! Nothing in this crate catches or retries; every error propagates to the
//! immediate caller, which owns the translation into user-facing messages.

use thiserror::Error;

/// Errors raised while composing or rendering a query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A field name did not resolve to a declared column.
    #[error("no column {column:?} on table {table:?}")]
    UnknownColumn { table: String, column: String },

    /// No declared foreign key connects the join target to the query.
    #[error("no foreign key path joining {target:?} to [{from}]")]
    NoJoinPath { target: String, from: String },
}

impl QueryError {
    /// Create an unknown-column error with preserved context.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a no-join-path error; `from` lists the tables already in the query.
    pub fn no_join_path(target: impl Into<String>, from: &[&str]) -> Self {
        Self::NoJoinPath {
            target: target.into(),
            from: from.join(", "),
        }
    }
}

/// Errors raised while applying filters to a query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Query-layer failure surfaced through a filter call.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A value of the wrong shape reached predicate construction.
    #[error("filter {filter:?} expected {expected}, got {got}")]
    InvalidValue {
        filter: String,
        expected: &'static str,
        got: &'static str,
    },

    /// An ordering request named a field outside the sortable whitelist.
    #[error("filter {filter:?} cannot order by {field:?}")]
    UnknownOrdering { filter: String, field: String },

    /// Two filters were registered under the same name.
    #[error("duplicate filter name {0:?}")]
    DuplicateFilter(String),
}

impl FilterError {
    /// Create an invalid-value error; `expected` is a readable phrase like
    /// "a list value".
    pub fn invalid_value(
        filter: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Self::InvalidValue {
            filter: filter.into(),
            expected,
            got,
        }
    }

    /// Create an unknown-ordering error.
    pub fn unknown_ordering(filter: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownOrdering {
            filter: filter.into(),
            field: field.into(),
        }
    }

    /// Whether this error came from a caller-supplied value rather than
    /// filter/schema configuration.
    pub fn is_value_error(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }

    /// Whether this error came from filter or schema configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Query(_) | Self::UnknownOrdering { .. } | Self::DuplicateFilter(_)
        )
    }
}
