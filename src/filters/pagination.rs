//! Pagination filter
//!
//! Applies LIMIT/OFFSET from a `[limit]` or `[limit, offset]` value. A null
//! entry leaves that clause unset, so `[null, 40]` pages without capping.

use crate::error::FilterError;
use crate::filters::traits::{Filter, FilterBinding};
use crate::sql::Select;
use crate::value::Value;

#[derive(Default)]
pub struct LimitOffsetFilter {
    binding: FilterBinding,
}

impl LimitOffsetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn name(&self) -> &str {
        self.binding.field_name().unwrap_or("pagination")
    }

    fn bound(&self, entry: &Value) -> Result<Option<u64>, FilterError> {
        match entry {
            Value::Null => Ok(None),
            other => {
                let n = other.as_int().filter(|n| *n >= 0).ok_or_else(|| {
                    FilterError::invalid_value(self.name(), "non-negative integers", other.kind())
                })?;
                Ok(Some(n as u64))
            }
        }
    }
}

impl Filter for LimitOffsetFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(false, value) {
            return Ok(query);
        }
        let parts = value.as_list().ok_or_else(|| {
            FilterError::invalid_value(self.name(), "a [limit, offset] list", value.kind())
        })?;
        let (limit, offset) = match parts {
            [limit] => (self.bound(limit)?, None),
            [limit, offset] => (self.bound(limit)?, self.bound(offset)?),
            _ => {
                return Err(FilterError::invalid_value(
                    self.name(),
                    "a [limit, offset] list",
                    value.kind(),
                ));
            }
        };

        let mut query = query;
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        if let Some(offset) = offset {
            query = query.offset(offset);
        }
        Ok(query)
    }

    fn binding(&self) -> &FilterBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut FilterBinding {
        &mut self.binding
    }
}
