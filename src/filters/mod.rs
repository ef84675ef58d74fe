//! Filter variants
//!
//! Reusable rules that conditionally add one condition (and possibly one
//! join) to a query. All variants share the empty-value skip policy: an
//! absent, empty-string, or empty-list value leaves the query untouched
//! unless the filter was built as nullable.
//!
//! ## Usage
//!
//! ```
//! use filterset::{EqFilter, Filter, Select, Table, Value};
//!
//! let item = Table::new("item").with_columns(["id", "name"]);
//! let by_name = EqFilter::new(&item, "name");
//!
//! let query = Select::columns([item.column("id").unwrap()]);
//! let query = by_name.filter(query, &Value::from("shirt")).unwrap();
//! assert_eq!(
//!     query.to_sql_literal(),
//!     "SELECT item.id FROM item WHERE item.name = 'shirt'"
//! );
//! ```

mod field;
mod ordering;
mod pagination;
mod relation;
mod search;
mod traits;

pub use field::{EqFilter, InFilter, RangeFilter};
pub use ordering::OrderingFilter;
pub use pagination::LimitOffsetFilter;
pub use relation::RelationFilter;
pub use search::SearchFilter;
pub use traits::{Capabilities, Filter, FilterBinding};
