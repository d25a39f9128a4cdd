//! Query description for the data API.
//!
//! A [`Query`] names a collection, a column projection, equality and range
//! filters, an ordering and an optional limit. Data sources execute queries;
//! the HTTP client turns them into query strings (see [`url`]) and the
//! in-memory source evaluates them directly.

mod filter;
mod order;
pub mod url;

pub use filter::Filter;
pub use order::Direction;
pub use order::OrderBy;

/// A read against one collection.
///
/// # Example
///
/// ```
/// use ventures_lib::api::query::{Filter, OrderBy, Query};
///
/// let query = Query::from("events")
///     .select("id,name,starts_at")
///     .filter(Filter::is_not_null("starts_at"))
///     .order_by(OrderBy::asc("starts_at"));
///
/// assert_eq!(query.collection(), "events");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    projection: String,
    filters: Vec<Filter>,
    order: Option<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    /// Starts a query against a collection, selecting every column.
    pub fn from(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            projection: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Sets the column projection string (e.g. `"id,name"`).
    pub fn select(mut self, projection: impl Into<String>) -> Self {
        self.projection = projection.into();
        self
    }

    /// Adds a filter condition. All filters must hold.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the ordering of results.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Limits the number of rows returned.
    pub fn top(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the projection string.
    pub fn projection(&self) -> &str {
        &self.projection
    }

    /// Returns the plain column names of the projection.
    ///
    /// Returns `None` for `*` and for projections that embed related
    /// collections or rename columns, which only the server can resolve.
    pub fn projected_columns(&self) -> Option<Vec<&str>> {
        if self.projection.trim() == "*" || self.projection.contains(['(', ':']) {
            return None;
        }
        Some(
            self.projection
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }

    /// Returns the filters.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the ordering, if any.
    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    /// Returns the limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
