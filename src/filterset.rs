//! Named-filter container
//!
//! A [`FilterSet`] owns a collection of filters keyed by name and applies
//! the subset the caller supplied parameters for, in registration order,
//! threading the query through each. Building the set binds every filter's
//! registration name and a non-owning back-handle to the set itself.

use std::collections::HashSet;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;

use crate::error::FilterError;
use crate::filters::{Capabilities, Filter};
use crate::sql::Select;
use crate::value::Value;

/// Caller-supplied parameters, keyed by registered filter name.
///
/// Typically deserialized straight from a request body or query string.
/// Names with no registered filter are ignored during [`FilterSet::apply`].
pub type Params = IndexMap<String, Value>;

struct Inner {
    filters: IndexMap<String, Box<dyn Filter>>,
}

/// Non-owning handle from a filter back to its owning set.
///
/// Held through [`FilterBinding`](crate::filters::FilterBinding); upgrading
/// fails once the set is dropped, the handle never keeps it alive.
#[derive(Debug, Clone)]
pub struct FilterSetHandle {
    inner: Weak<Inner>,
}

impl FilterSetHandle {
    pub fn upgrade(&self) -> Option<FilterSet> {
        self.inner.upgrade().map(|inner| FilterSet { inner })
    }
}

/// Collects named filters and binds them into a [`FilterSet`].
#[derive(Default)]
pub struct FilterSetBuilder {
    filters: Vec<(String, Box<dyn Filter>)>,
}

impl FilterSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `filter` under `name`, the key callers use in [`Params`].
    pub fn add(mut self, name: impl Into<String>, filter: impl Filter + 'static) -> Self {
        self.filters.push((name.into(), Box::new(filter)));
        self
    }

    /// Bind registration names and parent handles and produce the set.
    ///
    /// Fails if two filters were registered under the same name.
    pub fn build(self) -> Result<FilterSet, FilterError> {
        let mut seen = HashSet::new();
        for (name, _) in &self.filters {
            if !seen.insert(name.as_str()) {
                return Err(FilterError::DuplicateFilter(name.clone()));
            }
        }

        let inner = Arc::new_cyclic(|weak: &Weak<Inner>| {
            let handle = FilterSetHandle {
                inner: weak.clone(),
            };
            let mut filters = IndexMap::with_capacity(self.filters.len());
            for (name, mut filter) in self.filters {
                filter.binding_mut().bind(&name, handle.clone());
                filters.insert(name, filter);
            }
            Inner { filters }
        });
        Ok(FilterSet { inner })
    }
}

/// An immutable, shareable set of named filters.
#[derive(Clone)]
pub struct FilterSet {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterSet")
            .field("filters", &self.inner.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FilterSet {
    /// Apply every filter that has a parameter present, in registration
    /// order. Filters without a parameter are not invoked at all; a present
    /// but empty value still reaches the filter, whose own skip rule
    /// decides.
    pub fn apply(&self, query: Select, params: &Params) -> Result<Select, FilterError> {
        let mut query = query;
        for (name, filter) in &self.inner.filters {
            match params.get(name) {
                Some(value) => {
                    tracing::debug!(filter = name.as_str(), "applying filter");
                    query = filter.filter(query, value)?;
                }
                None => {
                    tracing::debug!(filter = name.as_str(), "no parameter supplied");
                }
            }
        }
        Ok(query)
    }

    /// Look up a registered filter by name.
    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.inner.filters.get(name).map(|filter| filter.as_ref())
    }

    /// What the named filter supports beyond plain filtering.
    pub fn capabilities(&self, name: &str) -> Option<Capabilities> {
        self.get(name).map(|filter| filter.capabilities())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.filters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Filter)> {
        self.inner
            .filters
            .iter()
            .map(|(name, filter)| (name.as_str(), filter.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.inner.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.filters.is_empty()
    }

    /// A non-owning handle to this set.
    pub fn handle(&self) -> FilterSetHandle {
        FilterSetHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{EqFilter, InFilter, RelationFilter};
    use crate::schema::Table;

    fn parent() -> Table {
        Table::new("parent").with_columns(["id", "name"])
    }

    fn item() -> Table {
        Table::new("item")
            .with_columns(["id", "parent_id", "name"])
            .with_foreign_key("parent_id", &parent(), "id")
    }

    fn base(table: &Table) -> Select {
        Select::columns([table.column("id").unwrap()])
    }

    fn item_set(item: &Table) -> FilterSet {
        FilterSetBuilder::new()
            .add("name", EqFilter::new(item, "name"))
            .add("ids", InFilter::new(item, "id"))
            .build()
            .unwrap()
    }

    #[test]
    fn applies_filters_in_registration_order() {
        let item = item();
        let set = item_set(&item);

        // Parameter insertion order is the reverse of registration order.
        let mut params = Params::new();
        params.insert("ids".into(), Value::from(vec![Value::from(1)]));
        params.insert("name".into(), Value::from("test"));

        let query = set.apply(base(&item), &params).unwrap();
        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item WHERE item.name = 'test' AND item.id IN (1)"
        );
    }

    #[test]
    fn absent_parameters_leave_filters_uninvoked() {
        let item = item();
        let set = item_set(&item);

        let mut params = Params::new();
        params.insert("name".into(), Value::from("test"));

        let query = set.apply(base(&item), &params).unwrap();
        assert_eq!(
            query.to_sql_literal(),
            "SELECT item.id FROM item WHERE item.name = 'test'"
        );
    }

    #[test]
    fn present_empty_values_skip_through_the_filter() {
        let item = item();
        let set = item_set(&item);

        let mut params = Params::new();
        params.insert("name".into(), Value::String(String::new()));
        params.insert("ids".into(), Value::List(vec![]));

        let query = set.apply(base(&item), &params).unwrap();
        assert_eq!(query.to_sql_literal(), "SELECT item.id FROM item");
    }

    #[test]
    fn unknown_parameter_names_are_ignored() {
        let item = item();
        let set = item_set(&item);

        let mut params = Params::new();
        params.insert("colour".into(), Value::from("red"));

        let query = set.apply(base(&item), &params).unwrap();
        assert_eq!(query.to_sql_literal(), "SELECT item.id FROM item");
    }

    #[test]
    fn duplicate_names_fail_to_build() {
        let item = item();
        let err = FilterSetBuilder::new()
            .add("name", EqFilter::new(&item, "name"))
            .add("name", EqFilter::new(&item, "name").exclude())
            .build()
            .unwrap_err();

        assert_eq!(err, FilterError::DuplicateFilter("name".into()));
    }

    #[test]
    fn building_binds_names_and_parent_handles() {
        let item = item();
        let set = item_set(&item);

        let filter = set.get("name").unwrap();
        assert_eq!(filter.binding().field_name(), Some("name"));

        let parent = filter.binding().parent().unwrap().upgrade().unwrap();
        let names: Vec<&str> = parent.names().collect();
        assert_eq!(names, ["name", "ids"]);
    }

    #[test]
    fn handles_do_not_keep_the_set_alive() {
        let item = item();
        let set = item_set(&item);
        let handle = set.handle();

        assert!(handle.upgrade().is_some());
        drop(set);
        assert!(handle.upgrade().is_none());
    }

    #[test]
    fn debug_lists_registered_names() {
        let item = item();
        let set = item_set(&item);

        assert_eq!(
            format!("{:?}", set),
            r#"FilterSet { filters: ["name", "ids"] }"#
        );
    }

    #[test]
    fn capabilities_are_readable_per_name() {
        let item = item();
        let set = item_set(&item);

        let caps = set.capabilities("ids").unwrap();
        assert!(!caps.specs && !caps.facets);
        assert!(set.capabilities("missing").is_none());
    }

    #[test]
    fn relation_filters_share_one_join_across_the_set() {
        let item = item();
        let parent = parent();
        let set = FilterSetBuilder::new()
            .add("parent_name", RelationFilter::new(&parent, "name"))
            .add("parent_id", RelationFilter::new(&parent, "id"))
            .build()
            .unwrap();

        let mut params = Params::new();
        params.insert("parent_name".into(), Value::from("test"));
        params.insert("parent_id".into(), Value::from(1));

        let query = set.apply(base(&item), &params).unwrap();
        let sql = query.to_sql_literal();
        assert_eq!(sql.matches("JOIN parent").count(), 1);
        assert_eq!(
            sql,
            "SELECT item.id FROM item JOIN parent ON parent.id = item.parent_id \
             WHERE parent.name = 'test' AND parent.id = 1"
        );
    }

    #[test]
    fn errors_from_filters_propagate() {
        let item = item();
        let set = FilterSetBuilder::new()
            .add("ids", InFilter::new(&item, "id"))
            .build()
            .unwrap();

        let mut params = Params::new();
        params.insert("ids".into(), Value::from("not-a-list"));

        let err = set.apply(base(&item), &params).unwrap_err();
        assert!(err.is_value_error());
    }

    #[test]
    fn params_deserialize_preserving_order() {
        let raw = r#"{"ids": [1, 2], "name": "test", "extra": null}"#;
        let params: Params = serde_json::from_str(raw).unwrap();

        let keys: Vec<&String> = params.keys().collect();
        assert_eq!(keys, ["ids", "name", "extra"]);
        assert_eq!(params["name"], Value::from("test"));
        assert_eq!(params["extra"], Value::Null);
    }

    #[test]
    fn sets_are_shareable_across_threads() {
        let item = item();
        let set = item_set(&item);

        let mut params = Params::new();
        params.insert("name".into(), Value::from("test"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let set = set.clone();
                let item = item.clone();
                let params = params.clone();
                std::thread::spawn(move || {
                    set.apply(base(&item), &params).unwrap().to_sql_literal()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                "SELECT item.id FROM item WHERE item.name = 'test'"
            );
        }
    }
}
