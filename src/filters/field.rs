//! Field filters
//!
//! Filters whose condition targets one declared column: equality, list
//! membership, and range containment. The field name resolves against the
//! table when `filter` runs, so a misdeclared field surfaces as
//! [`QueryError::UnknownColumn`](crate::error::QueryError) on first use,
//! not at construction.

use crate::error::FilterError;
use crate::filters::traits::{Filter, FilterBinding};
use crate::schema::Table;
use crate::sql::Select;
use crate::value::Value;

/// Equality filter: `column = value`, or its negation.
///
/// The workhorse variant. Empty values skip unless the filter is nullable;
/// a nullable filter receiving null filters for `IS NULL` (and `exclude`
/// flips that to `IS NOT NULL`).
pub struct EqFilter {
    table: Table,
    field: String,
    exclude: bool,
    nullable: bool,
    binding: FilterBinding,
}

impl EqFilter {
    pub fn new(table: &Table, field: impl Into<String>) -> Self {
        Self {
            table: table.clone(),
            field: field.into(),
            exclude: false,
            nullable: false,
            binding: FilterBinding::default(),
        }
    }

    /// Negate the whole condition this filter produces.
    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// Apply empty values as real conditions instead of skipping them.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl Filter for EqFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(self.nullable, value) {
            return Ok(query);
        }
        let mut condition = self.table.column(&self.field)?.eq(value.clone());
        if self.exclude {
            condition = !condition;
        }
        Ok(query.and_where(condition))
    }

    fn binding(&self) -> &FilterBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut FilterBinding {
        &mut self.binding
    }
}

/// Membership filter: `column IN (values...)`, or `NOT IN` with `exclude`.
///
/// Expects a list value; an empty list is an empty value and skips like
/// any other.
pub struct InFilter {
    table: Table,
    field: String,
    exclude: bool,
    nullable: bool,
    binding: FilterBinding,
}

impl InFilter {
    pub fn new(table: &Table, field: impl Into<String>) -> Self {
        Self {
            table: table.clone(),
            field: field.into(),
            exclude: false,
            nullable: false,
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

    fn name(&self) -> &str {
        self.binding.field_name().unwrap_or(&self.field)
    }
}

impl Filter for InFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(self.nullable, value) {
            return Ok(query);
        }
        let values = value
            .as_list()
            .ok_or_else(|| FilterError::invalid_value(self.name(), "a list value", value.kind()))?;
        let mut condition = self
            .table
            .column(&self.field)?
            .in_list(values.iter().cloned());
        if self.exclude {
            condition = !condition;
        }
        Ok(query.and_where(condition))
    }

    fn binding(&self) -> &FilterBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut FilterBinding {
        &mut self.binding
    }
}

/// Range filter: `column BETWEEN low AND high` from a `[low, high]` value.
pub struct RangeFilter {
    table: Table,
    field: String,
    exclude: bool,
    nullable: bool,
    binding: FilterBinding,
}

impl RangeFilter {
    pub fn new(table: &Table, field: impl Into<String>) -> Self {
        Self {
            table: table.clone(),
            field: field.into(),
            exclude: false,
            nullable: false,
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

    fn name(&self) -> &str {
        self.binding.field_name().unwrap_or(&self.field)
    }
}

impl Filter for RangeFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(self.nullable, value) {
            return Ok(query);
        }
        let bounds = match value.as_list() {
            Some([low, high]) => (low.clone(), high.clone()),
            _ => {
                return Err(FilterError::invalid_value(
                    self.name(),
                    "a [low, high] pair",
                    value.kind(),
                ));
            }
        };
        let mut condition = self
            .table
            .column(&self.field)?
            .between(bounds.0, bounds.1);
        if self.exclude {
            condition = !condition;
        }
        Ok(query.and_where(condition))
    }

    fn binding(&self) -> &FilterBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut FilterBinding {
        &mut self.binding
    }
}
