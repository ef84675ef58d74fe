//! # filterset
//!
//! Declarative filtering on top of composable SQL queries: describe a set of
//! named filters once, then apply whichever subset a caller supplies values
//! for, producing a new query with the matching WHERE and JOIN clauses.
//!
//! - `schema` - declared tables, columns, and foreign keys
//! - `sql` - immutable SELECT values, predicate expressions, and dialects
//! - `filters` - filter variants and their capability contract
//! - `strategies` - join policies, including at-most-once deduplication
//! - `filterset` - the named-filter container and application order
//! - `value` - the untyped parameter value filters consume
//! - `error` - unified error types
//!
//! ## Quick Start
//!
//! ```
//! use filterset::{EqFilter, FilterSetBuilder, InFilter, Params, RelationFilter, Select, Table};
//!
//! let parent = Table::new("parent").with_columns(["id", "name"]);
//! let item = Table::new("item")
//!     .with_columns(["id", "parent_id", "name"])
//!     .with_foreign_key("parent_id", &parent, "id");
//!
//! let filters = FilterSetBuilder::new()
//!     .add("name", EqFilter::new(&item, "name"))
//!     .add("ids", InFilter::new(&item, "id"))
//!     .add("parent_name", RelationFilter::new(&parent, "name"))
//!     .build()
//!     .unwrap();
//!
//! // Straight off the wire: unknown names are ignored, empty values skip.
//! let params: Params =
//!     serde_json::from_str(r#"{"name": "", "ids": [1, 2], "parent_name": "acme"}"#).unwrap();
//!
//! let base = Select::columns([item.column("id").unwrap()]);
//! let query = filters.apply(base, &params).unwrap();
//! assert_eq!(
//!     query.to_sql_literal(),
//!     "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
//!      WHERE item.id IN (1, 2) AND parent.name = 'acme'"
//! );
//! ```

pub mod error;
pub mod filters;
pub mod filterset;
pub mod schema;
pub mod sql;
pub mod strategies;
pub mod value;

// Re-export the container and its building blocks
pub use filterset::{FilterSet, FilterSetBuilder, FilterSetHandle, Params};

// Re-export filter variants and the capability contract
pub use filters::{
    Capabilities, EqFilter, Filter, FilterBinding, InFilter, LimitOffsetFilter, OrderingFilter,
    RangeFilter, RelationFilter, SearchFilter,
};

// Re-export join policies
pub use strategies::{InnerJoinStrategy, JoinStrategy};

// Re-export the query-building surface
pub use schema::{Column, ForeignKey, Table};
pub use sql::{Dialect, Expr, OrderDirection, Select, SqlParams};

// Re-export the parameter value and unified error types
pub use error::{FilterError, QueryError};
pub use value::Value;
