//! Join strategies
//!
//! A join strategy attaches the JOIN a relation condition needs before the
//! condition itself is applied. The inner-join variant enforces the
//! at-most-once rule: if the target table already appears in the query's
//! join graph, the JOIN step is skipped entirely and only the condition is
//! added. Two filters over the same relation therefore share one JOIN
//! clause, whichever applied first placed it.

use crate::error::QueryError;
use crate::schema::Column;
use crate::sql::{Expr, Select};

/// Policy for attaching the JOIN required by a condition on a related table.
pub trait JoinStrategy: Send + Sync {
    /// Ensure the strategy's target table is joined, then attach `condition`
    /// as a WHERE term.
    fn filter(&self, query: Select, condition: Expr) -> Result<Select, QueryError>;
}

/// INNER JOIN with deduplication by target-table identity.
pub struct InnerJoinStrategy {
    relationship: Column,
    onclause: Option<Expr>,
}

impl InnerJoinStrategy {
    /// `relationship` names a column on the target table; the table itself
    /// is derived from it. Without an explicit onclause the JOIN condition
    /// comes from declared foreign keys.
    pub fn new(relationship: &Column) -> Self {
        Self {
            relationship: relationship.clone(),
            onclause: None,
        }
    }

    /// Override the derived JOIN condition with an explicit one.
    pub fn with_onclause(mut self, onclause: Expr) -> Self {
        self.onclause = Some(onclause);
        self
    }
}

impl JoinStrategy for InnerJoinStrategy {
    fn filter(&self, query: Select, condition: Expr) -> Result<Select, QueryError> {
        let target = self.relationship.table();
        let query = if query.is_joined(target) {
            tracing::debug!(table = target.name(), "join target already present");
            query
        } else {
            match &self.onclause {
                Some(on) => query.join_on(target, on.clone()),
                None => query.join(target)?,
            }
        };
        Ok(query.and_where(condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Table;

    fn parent() -> Table {
        Table::new("parent").with_columns(["id", "name"])
    }

    fn item() -> Table {
        Table::new("item")
            .with_columns(["id", "parent_id"])
            .with_foreign_key("parent_id", &parent(), "id")
    }

    #[test]
    fn joins_and_filters_related_table() {
        let item = item();
        let parent = parent();
        let strategy = InnerJoinStrategy::new(&parent.column("name").unwrap());

        let query = Select::columns([item.column("id").unwrap()]);
        let query = strategy
            .filter(query, parent.column("name").unwrap().eq("test"))
            .unwrap();

        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
             WHERE parent.name = 'test'"
        );
    }

    #[test]
    fn explicit_onclause_overrides_derived_condition() {
        let item = item();
        let parent = parent();
        let strategy = InnerJoinStrategy::new(&parent.column("name").unwrap()).with_onclause(
            item.column("id")
                .unwrap()
                .eq_column(&parent.column("id").unwrap()),
        );

        let query = Select::columns([item.column("id").unwrap()]);
        let query = strategy
            .filter(query, parent.column("name").unwrap().eq("test"))
            .unwrap();

        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item JOIN parent ON item.id = parent.id \
             WHERE parent.name = 'test'"
        );
    }

    #[test]
    fn already_joined_target_is_not_joined_twice() {
        let item = item();
        let parent = parent();
        let strategy = InnerJoinStrategy::new(&parent.column("name").unwrap());

        let query = Select::columns([item.column("id").unwrap()])
            .join(&parent)
            .unwrap();
        let query = strategy
            .filter(query, parent.column("name").unwrap().eq("test"))
            .unwrap();

        let sql = query.to_sql_literal();
        assert_eq!(
            sql,
            "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
             WHERE parent.name = 'test'"
        );
        assert_eq!(sql.matches("JOIN parent").count(), 1);
    }

    #[test]
    fn second_condition_reuses_the_first_join() {
        let item = item();
        let parent = parent();
        let by_name = InnerJoinStrategy::new(&parent.column("name").unwrap());
        let by_id = InnerJoinStrategy::new(&parent.column("id").unwrap());

        let query = Select::columns([item.column("id").unwrap()]);
        let query = by_name
            .filter(query, parent.column("name").unwrap().eq("test"))
            .unwrap();
        let query = by_id
            .filter(query, parent.column("id").unwrap().eq(1))
            .unwrap();

        let sql = query.to_sql_literal();
        assert_eq!(sql.matches("JOIN parent").count(), 1);
        assert_eq!(
            sql,
            "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
             WHERE parent.name = 'test' AND parent.id = 1"
        );
    }

    #[test]
    fn unreachable_relation_propagates_the_join_error() {
        let item = item();
        let order = Table::new("order").with_columns(["id", "state"]);
        let strategy = InnerJoinStrategy::new(&order.column("state").unwrap());

        let query = Select::columns([item.column("id").unwrap()]);
        let err = strategy
            .filter(query, order.column("state").unwrap().eq("open"))
            .unwrap_err();

        assert_eq!(err, QueryError::no_join_path("order", &["item"]));
    }
}
