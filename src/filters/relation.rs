//! Relation filter
//!
//! Equality over a column of a related table. The required JOIN is attached
//! by a [`JoinStrategy`] before the condition lands in WHERE; the skip rule
//! runs first, so a skipped value adds neither.

use crate::error::FilterError;
use crate::filters::traits::{Filter, FilterBinding};
use crate::schema::Table;
use crate::sql::Select;
use crate::strategies::{InnerJoinStrategy, JoinStrategy};
use crate::value::Value;

/// Filter on `table.field` where `table` is a relation of the query's base
/// table, joined on demand.
pub struct RelationFilter {
    table: Table,
    field: String,
    exclude: bool,
    nullable: bool,
    strategy: Option<Box<dyn JoinStrategy>>,
    binding: FilterBinding,
}

impl RelationFilter {
    /// Joins via [`InnerJoinStrategy`] with the foreign-key-derived
    /// condition unless [`with_strategy`](Self::with_strategy) overrides it.
    pub fn new(table: &Table, field: impl Into<String>) -> Self {
        Self {
            table: table.clone(),
            field: field.into(),
            exclude: false,
            nullable: false,
            strategy: None,
            binding: FilterBinding::default(),
        }
    }

    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Replace the join policy.
    pub fn with_strategy(mut self, strategy: impl JoinStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }
}

impl Filter for RelationFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(self.nullable, value) {
            return Ok(query);
        }
        let column = self.table.column(&self.field)?;
        let mut condition = column.eq(value.clone());
        if self.exclude {
            condition = !condition;
        }
        let query = match &self.strategy {
            Some(strategy) => strategy.filter(query, condition)?,
            None => InnerJoinStrategy::new(&column).filter(query, condition)?,
        };
        Ok(query)
    }

    fn binding(&self) -> &FilterBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut FilterBinding {
        &mut self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    fn parent() -> Table {
        Table::new("parent").with_columns(["id", "name"])
    }

    fn item() -> Table {
        Table::new("item")
            .with_columns(["id", "parent_id"])
            .with_foreign_key("parent_id", &parent(), "id")
    }

    fn base(table: &Table) -> Select {
        Select::columns([table.column("id").unwrap()])
    }

    #[test]
    fn joins_then_filters() {
        let item = item();
        let parent = parent();
        let filter = RelationFilter::new(&parent, "name");
        let query = filter.filter(base(&item), &Value::from("test")).unwrap();

        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
             WHERE parent.name = 'test'"
        );
    }

    #[test]
    fn skipped_value_adds_neither_join_nor_condition() {
        let item = item();
        let parent = parent();
        let filter = RelationFilter::new(&parent, "name");
        let query = filter.filter(base(&item), &Value::Null).unwrap();

        assert_eq!(query.to_sql_literal(), "SELECT item.id FROM item");
    }

    #[test]
    fn exclude_negates_only_the_condition() {
        let item = item();
        let parent = parent();
        let filter = RelationFilter::new(&parent, "name").exclude();
        let query = filter.filter(base(&item), &Value::from("test")).unwrap();

        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
             WHERE parent.name != 'test'"
        );
    }

    #[test]
    fn custom_strategy_controls_the_join() {
        let item = item();
        let parent = parent();
        let strategy = InnerJoinStrategy::new(&parent.column("name").unwrap()).with_onclause(
            item.column("id")
                .unwrap()
                .eq_column(&parent.column("id").unwrap()),
        );
        let filter = RelationFilter::new(&parent, "name").with_strategy(strategy);
        let query = filter.filter(base(&item), &Value::from("test")).unwrap();

        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item JOIN parent ON item.id = parent.id \
             WHERE parent.name = 'test'"
        );
    }

    #[test]
    fn pre_joined_query_keeps_a_single_join() {
        let item = item();
        let parent = parent();
        let filter = RelationFilter::new(&parent, "name");
        let query = base(&item).join(&parent).unwrap();
        let query = filter.filter(query, &Value::from("test")).unwrap();

        assert_eq!(query.to_sql_literal().matches("JOIN parent").count(), 1);
    }

    #[test]
    fn unknown_field_is_a_config_error() {
        let item = item();
        let parent = parent();
        let filter = RelationFilter::new(&parent, "title");
        let err = filter.filter(base(&item), &Value::from("x")).unwrap_err();

        assert_eq!(
            err,
            FilterError::Query(QueryError::unknown_column("parent", "title"))
        );
    }
}
