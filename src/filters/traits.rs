//! Filter capability contract
//!
//! Every filter variant implements [`Filter`]: given a query and one
//! caller-supplied value, return the query unchanged (skip) or with exactly
//! one additional condition attached. Variants advertise optional abilities
//! through [`Capabilities`] flags so the owning set can branch without
//! downcasting.

use crate::error::FilterError;
use crate::filterset::FilterSetHandle;
use crate::sql::Select;
use crate::value::Value;

/// What a filter variant supports beyond plain filtering.
///
/// Explicit flags instead of runtime type inspection: the owning set reads
/// these to decide whether a filter participates in spec/facet computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub specs: bool,
    pub facets: bool,
    pub specs_columns: bool,
    pub facets_columns: bool,
}

/// Registration state a filter receives from its owning set.
///
/// Unset on a freshly constructed filter; assigned exactly once while the
/// set is built. The parent handle is non-owning, the set owns the filter.
#[derive(Debug, Default)]
pub struct FilterBinding {
    field_name: Option<String>,
    parent: Option<FilterSetHandle>,
}

impl FilterBinding {
    /// The key this filter is registered under, once bound.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Handle to the owning set, once bound.
    pub fn parent(&self) -> Option<&FilterSetHandle> {
        self.parent.as_ref()
    }

    /// Unconditional assignment; rebinding overwrites.
    pub(crate) fn bind(&mut self, field_name: &str, parent: FilterSetHandle) {
        self.field_name = Some(field_name.to_string());
        self.parent = Some(parent);
    }

    /// The shared skip rule: an empty value means "no filtering requested"
    /// unless the filter is nullable.
    pub(crate) fn should_skip(&self, nullable: bool, value: &Value) -> bool {
        if !nullable && value.is_empty() {
            tracing::debug!(
                filter = self.field_name(),
                "skipping filter, empty value"
            );
            return true;
        }
        false
    }
}

/// A configured, reusable rule that conditionally adds one condition (and
/// possibly one join) to a query.
pub trait Filter: Send + Sync {
    /// Apply this filter to `query` for the supplied value.
    ///
    /// Returns the input query unchanged when the filter elects to skip.
    /// The input is consumed, never mutated in place: callers thread the
    /// returned query into the next filter.
    fn filter(&self, query: Select, value: &Value) -> Result<Select, FilterError>;

    /// Which auxiliary computations this variant supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Registration state assigned by the owning set.
    fn binding(&self) -> &FilterBinding;

    fn binding_mut(&mut self) -> &mut FilterBinding;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PassThrough {
        binding: FilterBinding,
    }

    impl Filter for PassThrough {
        fn filter(&self, query: Select, _value: &Value) -> Result<Select, FilterError> {
            Ok(query)
        }

        fn binding(&self) -> &FilterBinding {
            &self.binding
        }

        fn binding_mut(&mut self) -> &mut FilterBinding {
            &mut self.binding
        }
    }

    #[test]
    fn capabilities_default_to_none() {
        let filter = PassThrough {
            binding: FilterBinding::default(),
        };
        let caps = filter.capabilities();

        assert!(!caps.specs);
        assert!(!caps.facets);
        assert!(!caps.specs_columns);
        assert!(!caps.facets_columns);
    }

    #[test]
    fn binding_starts_unbound() {
        let binding = FilterBinding::default();
        assert_eq!(binding.field_name(), None);
        assert!(binding.parent().is_none());
    }

    #[test]
    fn skip_rule_honors_nullable() {
        let binding = FilterBinding::default();

        assert!(binding.should_skip(false, &Value::Null));
        assert!(binding.should_skip(false, &Value::String(String::new())));
        assert!(binding.should_skip(false, &Value::List(vec![])));

        assert!(!binding.should_skip(true, &Value::Null));
        assert!(!binding.should_skip(false, &Value::Int(0)));
        assert!(!binding.should_skip(false, &Value::String("x".into())));
    }

    #[test]
    fn filters_are_object_safe() {
        let filter: Box<dyn Filter> = Box::new(PassThrough {
            binding: FilterBinding::default(),
        });
        assert_eq!(filter.binding().field_name(), None);
    }
}
