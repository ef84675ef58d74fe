//! Immutable SELECT statements
//!
//! `Select` is a value, not a builder with hidden state: every transformation
//! consumes the statement and returns a new one, so threading a query through
//! a chain of filters can never mutate the caller's original (clone first to
//! keep it). That is also what makes join deduplication possible - a filter
//! can inspect the join graph of the exact statement it received.

use crate::error::QueryError;
use crate::schema::{Column, Table};
use crate::sql::expr::{Expr, SqlParams};
use crate::sql::Dialect;

/// Sort direction for ORDER BY entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Join {
    table: Table,
    on: Expr,
}

/// An immutable SELECT statement value.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    columns: Vec<Column>,
    from: Vec<Table>,
    joins: Vec<Join>,
    wheres: Vec<Expr>,
    order: Vec<(Column, OrderDirection)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Select the given columns; the FROM clause is derived from their
    /// tables, first occurrence first.
    pub fn columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        let columns: Vec<Column> = columns.into_iter().collect();
        let mut from: Vec<Table> = Vec::new();
        for col in &columns {
            if !from.iter().any(|t| t.name() == col.table().name()) {
                from.push(col.table().clone());
            }
        }
        Self {
            columns,
            from,
            joins: Vec::new(),
            wheres: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Select every declared column of `table`.
    pub fn table(table: &Table) -> Self {
        let columns: Vec<Column> = table
            .columns()
            .iter()
            .filter_map(|name| table.column(name).ok())
            .collect();
        Self {
            columns,
            from: vec![table.clone()],
            joins: Vec::new(),
            wheres: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Append a predicate, AND-combined with any existing WHERE terms.
    pub fn and_where(mut self, predicate: Expr) -> Self {
        self.wheres.push(predicate);
        self
    }

    /// Attach `JOIN target` with the ON condition derived from declared
    /// foreign keys, in either direction between `target` and the tables
    /// already in the statement.
    ///
    /// This is mechanical attachment: it does not deduplicate. Callers that
    /// need at-most-once joins check [`Select::is_joined`] first, as the join
    /// strategies do.
    pub fn join(self, target: &Table) -> Result<Self, QueryError> {
        let on = self.natural_onclause(target)?;
        Ok(self.join_on(target, on))
    }

    /// Attach `JOIN target ON <onclause>` with an explicit condition.
    pub fn join_on(mut self, target: &Table, onclause: Expr) -> Self {
        self.joins.push(Join {
            table: target.clone(),
            on: onclause,
        });
        self
    }

    /// Append an ORDER BY entry.
    pub fn order_by(mut self, column: Column, direction: OrderDirection) -> Self {
        self.order.push((column, direction));
        self
    }

    /// Set the LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the OFFSET.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Whether `table` is already part of the statement's join graph, by
    /// underlying table identity (name) - FROM-clause tables count.
    pub fn is_joined(&self, table: &Table) -> bool {
        self.tables().any(|t| t.name() == table.name())
    }

    fn tables(&self) -> impl Iterator<Item = &Table> {
        self.from.iter().chain(self.joins.iter().map(|j| &j.table))
    }

    fn natural_onclause(&self, target: &Table) -> Result<Expr, QueryError> {
        // Renders referenced-column-first either way: parent.id = item.parent_id.
        for t in self.tables() {
            if let Some(fk) = t.foreign_key_to(target.name()) {
                let referenced = target.column(&fk.ref_column)?;
                let referencing = t.column(&fk.column)?;
                return Ok(referenced.eq_column(&referencing));
            }
        }
        for t in self.tables() {
            if let Some(fk) = target.foreign_key_to(t.name()) {
                let referenced = t.column(&fk.ref_column)?;
                let referencing = target.column(&fk.column)?;
                return Ok(referenced.eq_column(&referencing));
            }
        }
        let from: Vec<&str> = self.tables().map(Table::name).collect();
        Err(QueryError::no_join_path(target.name(), &from))
    }

    /// Render with placeholders, appending bind values to `params` in
    /// encounter order (JOIN conditions first, then WHERE terms).
    pub fn to_sql(&self, dialect: Dialect, params: &mut SqlParams) -> String {
        self.render_parts(|e| e.to_sql(dialect, params))
    }

    /// Render with inline literal values.
    pub fn to_sql_literal(&self) -> String {
        self.render_parts(|e| e.to_sql_literal())
    }

    fn render_parts<F>(&self, mut expr_sql: F) -> String
    where
        F: FnMut(&Expr) -> String,
    {
        let projection = if self.columns.is_empty() {
            "*".to_string()
        } else {
            let cols: Vec<String> = self.columns.iter().map(Column::qualified).collect();
            cols.join(", ")
        };
        let from: Vec<&str> = self.from.iter().map(Table::name).collect();
        let mut sql = format!("SELECT {} FROM {}", projection, from.join(", "));

        for join in &self.joins {
            sql.push_str(" JOIN ");
            sql.push_str(join.table.name());
            sql.push_str(" ON ");
            sql.push_str(&expr_sql(&join.on));
        }

        if !self.wheres.is_empty() {
            let terms: Vec<String> = self.wheres.iter().map(&mut expr_sql).collect();
            sql.push_str(" WHERE ");
            sql.push_str(&terms.join(" AND "));
        }

        if !self.order.is_empty() {
            let terms: Vec<String> = self
                .order
                .iter()
                .map(|(col, dir)| format!("{} {}", col.qualified(), dir.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }
}
