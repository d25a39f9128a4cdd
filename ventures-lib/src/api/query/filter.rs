//! Filter conditions for data API queries.

use crate::model::Record;
use crate::model::Value;

/// A filter condition on a single column.
///
/// Every filter attached to a query must hold (filters are combined with
/// logical AND), which is how the data API treats repeated query parameters.
///
/// # Example
///
/// ```
/// use ventures_lib::api::query::Filter;
///
/// let filter = Filter::eq("status", "new");
/// let upcoming = Filter::gte("starts_at", "2026-01-01T00:00:00Z");
/// let linked = Filter::is_not_null("event_id");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Equality: `field=eq.value`
    Eq(String, Value),
    /// Not equal: `field=neq.value`
    Neq(String, Value),
    /// Greater than: `field=gt.value`
    Gt(String, Value),
    /// Greater than or equal: `field=gte.value`
    Gte(String, Value),
    /// Less than: `field=lt.value`
    Lt(String, Value),
    /// Less than or equal: `field=lte.value`
    Lte(String, Value),
    /// Membership: `field=in.(a,b)`
    In(String, Vec<Value>),
    /// Is null: `field=is.null`
    IsNull(String),
    /// Is not null: `field=not.is.null`
    IsNotNull(String),
}

impl Filter {
    /// Creates an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Creates a not-equal filter.
    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Neq(field.into(), value.into())
    }

    /// Creates a greater-than filter.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gt(field.into(), value.into())
    }

    /// Creates a greater-than-or-equal filter.
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gte(field.into(), value.into())
    }

    /// Creates a less-than filter.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Lt(field.into(), value.into())
    }

    /// Creates a less-than-or-equal filter.
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Lte(field.into(), value.into())
    }

    /// Creates a membership filter.
    pub fn is_in<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    /// Creates an is-null filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Filter::IsNull(field.into())
    }

    /// Creates an is-not-null filter.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Filter::IsNotNull(field.into())
    }

    /// Returns the column this filter applies to.
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq(field, _)
            | Filter::Neq(field, _)
            | Filter::Gt(field, _)
            | Filter::Gte(field, _)
            | Filter::Lt(field, _)
            | Filter::Lte(field, _)
            | Filter::In(field, _)
            | Filter::IsNull(field)
            | Filter::IsNotNull(field) => field,
        }
    }

    /// Evaluates this filter against a record held in memory.
    ///
    /// Comparisons against null never match, as in SQL.
    pub fn matches(&self, record: &Record) -> bool {
        use std::cmp::Ordering;

        let actual = record.get_value(self.field());
        match self {
            Filter::Eq(_, expected) => !actual.is_null() && actual.loosely_eq(expected),
            Filter::Neq(_, expected) => {
                !actual.is_null() && actual.compare(expected).is_some_and(|o| o != Ordering::Equal)
            }
            Filter::Gt(_, expected) => actual.compare(expected) == Some(Ordering::Greater),
            Filter::Gte(_, expected) => matches!(
                actual.compare(expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Filter::Lt(_, expected) => actual.compare(expected) == Some(Ordering::Less),
            Filter::Lte(_, expected) => matches!(
                actual.compare(expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Filter::In(_, values) => {
                !actual.is_null() && values.iter().any(|v| actual.loosely_eq(v))
            }
            Filter::IsNull(_) => actual.is_null(),
            Filter::IsNotNull(_) => !actual.is_null(),
        }
    }
}
