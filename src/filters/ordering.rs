//! Ordering filter
//!
//! Value-driven ORDER BY against a declared whitelist of sortable fields.
//! A leading `-` on a field name requests descending order. Fields outside
//! the whitelist are rejected, never interpolated.

use indexmap::IndexMap;

use crate::error::FilterError;
use crate::filters::traits::{Filter, FilterBinding};
use crate::schema::Column;
use crate::sql::{OrderDirection, Select};
use crate::value::Value;

pub struct OrderingFilter {
    fields: IndexMap<String, Column>,
    binding: FilterBinding,
}

impl OrderingFilter {
    /// `fields` maps caller-facing names to the columns they may sort by.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, col)| (name.into(), col))
                .collect(),
            binding: FilterBinding::default(),
        }
    }

    fn name(&self) -> &str {
        self.binding.field_name().unwrap_or("ordering")
    }

    fn push_entry(&self, query: Select, entry: &str) -> Result<Select, FilterError> {
        let (field, direction) = match entry.strip_prefix('-') {
            Some(rest) => (rest, OrderDirection::Desc),
            None => (entry, OrderDirection::Asc),
        };
        let column = self
            .fields
            .get(field)
            .ok_or_else(|| FilterError::unknown_ordering(self.name(), field))?;
        Ok(query.order_by(column.clone(), direction))
    }
}

impl Filter for OrderingFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(false, value) {
            return Ok(query);
        }
        match value {
            Value::String(entry) => self.push_entry(query, entry),
            Value::List(entries) => {
                let mut query = query;
                for entry in entries {
                    let entry = entry.as_str().ok_or_else(|| {
                        FilterError::invalid_value(self.name(), "ordering field names", entry.kind())
                    })?;
                    query = self.push_entry(query, entry)?;
                }
                Ok(query)
            }
            other => Err(FilterError::invalid_value(
                self.name(),
                "ordering field names",
                other.kind(),
            )),
        }
    }

    fn binding(&self) -> &FilterBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut FilterBinding {
        &mut self.binding
    }
}
