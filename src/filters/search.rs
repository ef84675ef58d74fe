//! Search filter
//!
//! Substring containment over one or more text columns, OR-joined. The
//! search term is LIKE-escaped, so user-supplied `%` and `_` match
//! literally.

use crate::error::FilterError;
use crate::filters::traits::{Filter, FilterBinding};
use crate::schema::Table;
use crate::sql::{escape_like_pattern, Expr, Select};
use crate::value::Value;

pub struct SearchFilter {
    table: Table,
    fields: Vec<String>,
    exclude: bool,
    nullable: bool,
    binding: FilterBinding,
}

impl SearchFilter {
    pub fn new<I, S>(table: &Table, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.clone(),
            fields: fields.into_iter().map(Into::into).collect(),
            exclude: false,
            nullable: false,
            binding: FilterBinding::default(),
        }
    }

    /// Negate the whole disjunction: match rows where no field contains
    /// the term.
    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    fn name(&self) -> &str {
        self.binding.field_name().unwrap_or("search")
    }
}

impl Filter for SearchFilter {
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError> {
        if self.binding.should_skip(self.nullable, value) {
            return Ok(query);
        }
        let term = value
            .as_str()
            .ok_or_else(|| FilterError::invalid_value(self.name(), "a string value", value.kind()))?;
        let pattern = format!("%{}%", escape_like_pattern(term));

        let mut terms = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            terms.push(self.table.column(field)?.like(pattern.clone()));
        }
        let mut condition = Expr::Or(terms);
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
