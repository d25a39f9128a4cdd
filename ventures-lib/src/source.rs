//! The data source seam.
//!
//! Pages talk to a [`DataSource`], never to HTTP directly. The
//! [`BackendClient`](crate::BackendClient) implements it against the remote
//! data API and [`MemorySource`](crate::memory::MemorySource) implements it in
//! memory for tests and offline demos.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::query::Filter;
use crate::api::query::Query;
use crate::error::Error;
use crate::model::Record;

/// An opaque CRUD source/sink.
///
/// No transactional guarantees are assumed: each call stands alone.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Reads the rows matching a query.
    async fn fetch(&self, query: &Query) -> Result<Vec<Record>, Error>;

    /// Inserts a row and returns it as stored.
    async fn insert(&self, collection: &str, record: Record) -> Result<Record, Error>;

    /// Applies `changes` to every row matching `filters` and returns the
    /// updated rows.
    async fn update(
        &self,
        collection: &str,
        filters: &[Filter],
        changes: Record,
    ) -> Result<Vec<Record>, Error>;

    /// Deletes every row matching `filters` and returns how many were removed.
    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<usize, Error>;
}

/// Fetches rows and decodes each one into `T`.
///
/// This is the fetch boundary: a row that does not match `T` fails the whole
/// fetch instead of reaching the view with a partial shape.
pub async fn fetch_as<T, S>(source: &S, query: &Query) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    S: DataSource + ?Sized,
{
    let records = source.fetch(query).await?;
    log::debug!(
        "Fetched {} row(s) from {}",
        records.len(),
        query.collection()
    );
    records
        .iter()
        .map(|record| record.decode(query.collection()).map_err(Error::from))
        .collect()
}
