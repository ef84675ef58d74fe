//! Relational schema metadata
//!
//! Tables declare their filterable columns and foreign keys up front, the
//! same way endpoints declare column whitelists: resolving a field name
//! against a `Table` is how a filter finds out, at application time, that it
//! was configured against a column that does not exist.

use crate::error::QueryError;
use crate::sql::Expr;
use crate::value::Value;

/// A declared `column REFERENCES table(column)` relationship.
///
/// Used to derive the natural ON condition when a join target is attached
/// without an explicit onclause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub ref_table: String,
    pub ref_column: String,
}

/// A table descriptor: name, declared columns, declared foreign keys.
///
/// Identity is the table name; two `Table` values with the same name refer to
/// the same underlying table for join-deduplication purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Create a table descriptor with no columns declared yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Declare the resolvable columns. Field names outside this list fail
    /// resolution with [`QueryError::UnknownColumn`].
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Declare `column REFERENCES ref_table(ref_column)`.
    ///
    /// Column names are not checked here; a misdeclared key surfaces as a
    /// [`QueryError::UnknownColumn`] when a join tries to use it.
    pub fn with_foreign_key(
        mut self,
        column: impl Into<String>,
        ref_table: &Table,
        ref_column: impl Into<String>,
    ) -> Self {
        self.foreign_keys.push(ForeignKey {
            column: column.into(),
            ref_table: ref_table.name.clone(),
            ref_column: ref_column.into(),
        });
        self
    }

    /// The table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column names, in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether `name` is a declared column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Resolve a field name to a column reference.
    pub fn column(&self, name: &str) -> Result<Column, QueryError> {
        if !self.has_column(name) {
            return Err(QueryError::unknown_column(&self.name, name));
        }
        Ok(Column {
            table: self.clone(),
            name: name.to_string(),
        })
    }

    /// First declared foreign key referencing `table_name`, if any.
    pub(crate) fn foreign_key_to(&self, table_name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.ref_table == table_name)
    }
}

/// A resolved column reference, qualified by its table.
///
/// Comparison and membership helpers produce [`Expr`] predicates, which is
/// the whole interface filters need from the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    table: Table,
    name: String,
}

impl Column {
    /// The owning table descriptor.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The bare column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The qualified `table.column` form used in rendered SQL.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table.name(), self.name)
    }

    /// `column = value` (or `column IS NULL` for a null value).
    pub fn eq(&self, value: impl Into<Value>) -> Expr {
        Expr::Eq(self.clone(), value.into())
    }

    /// `column = other_column`, for explicit join conditions.
    pub fn eq_column(&self, other: &Column) -> Expr {
        Expr::ColumnEq(self.clone(), other.clone())
    }

    /// `column IN (values...)`.
    pub fn in_list<I, V>(&self, values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::In(self.clone(), values.into_iter().map(Into::into).collect())
    }

    /// `column BETWEEN low AND high`.
    pub fn between(&self, low: impl Into<Value>, high: impl Into<Value>) -> Expr {
        Expr::Between(self.clone(), low.into(), high.into())
    }

    /// `column LIKE pattern ESCAPE '\'`. The pattern is taken as-is; callers
    /// building patterns from user input escape it first.
    pub fn like(&self, pattern: impl Into<String>) -> Expr {
        Expr::Like(self.clone(), pattern.into())
    }
}
