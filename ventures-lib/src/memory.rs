//! In-memory data source and object store.
//!
//! Evaluates queries the way the remote API does (filters, ordering, limits,
//! plain column projections) so pages can run offline and in tests.

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::api::ObjectStore;
use crate::api::query::Filter;
use crate::api::query::Query;
use crate::api::validate_object_path;
use crate::error::Error;
use crate::error::StorageError;
use crate::model::Record;
use crate::model::Value;
use crate::source::DataSource;

/// A [`DataSource`] backed by in-process collections.
///
/// Inserted rows without an `id` receive the next integer id, like a
/// `bigserial` primary key.
#[derive(Debug)]
pub struct MemorySource {
    collections: DashMap<String, Vec<Record>>,
    failures: DashMap<String, String>,
    next_id: AtomicI64,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
            failures: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Replaces a collection's rows (builder pattern).
    pub fn with_rows(self, collection: impl Into<String>, rows: Vec<Record>) -> Self {
        self.seed(collection, rows);
        self
    }

    /// Replaces a collection's rows.
    pub fn seed(&self, collection: impl Into<String>, rows: Vec<Record>) {
        for row in &rows {
            if let Value::Int(id) = row.get_value("id") {
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
            }
        }
        self.collections.insert(collection.into(), rows);
    }

    /// Makes every operation on a collection fail with `message`.
    pub fn fail(&self, collection: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(collection.into(), message.into());
    }

    /// Clears an injected failure.
    pub fn recover(&self, collection: &str) {
        self.failures.remove(collection);
    }

    /// Returns a copy of a collection's rows, in storage order.
    pub fn rows(&self, collection: &str) -> Vec<Record> {
        self.collections
            .get(collection)
            .map(|rows| rows.value().clone())
            .unwrap_or_default()
    }

    fn check(&self, collection: &str) -> Result<(), Error> {
        match self.failures.get(collection) {
            Some(message) => Err(Error::Unavailable {
                collection: collection.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_all(record: &Record, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.matches(record))
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, query: &Query) -> Result<Vec<Record>, Error> {
        self.check(query.collection())?;

        let mut rows: Vec<Record> = self
            .collections
            .get(query.collection())
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, query.filters()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = query.order() {
            rows.sort_by(|a, b| order.compare(a, b));
        }

        if let Some(limit) = query.limit() {
            rows.truncate(limit);
        }

        if let Some(columns) = query.projected_columns() {
            for row in &mut rows {
                row.retain_fields(&columns);
            }
        }

        Ok(rows)
    }

    async fn insert(&self, collection: &str, mut record: Record) -> Result<Record, Error> {
        self.check(collection)?;

        match record.get_value("id") {
            Value::Null => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                record.insert("id", id);
            }
            Value::Int(id) => {
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
            }
            _ => {}
        }

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        collection: &str,
        filters: &[Filter],
        changes: Record,
    ) -> Result<Vec<Record>, Error> {
        self.check(collection)?;
        if filters.is_empty() {
            return Err(Error::not_found(collection, "an empty filter"));
        }

        let mut updated = Vec::new();
        if let Some(mut rows) = self.collections.get_mut(collection) {
            for row in rows.iter_mut().filter(|row| matches_all(row, filters)) {
                row.merge(&changes);
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<usize, Error> {
        self.check(collection)?;
        if filters.is_empty() {
            return Err(Error::not_found(collection, "an empty filter"));
        }

        let Some(mut rows) = self.collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !matches_all(row, filters));
        Ok(before - rows.len())
    }
}

/// An [`ObjectStore`] that keeps uploads in memory.
#[derive(Debug)]
pub struct MemoryStore {
    public_base: String,
    objects: DashMap<String, (String, Vec<u8>)>,
    rejection: std::sync::Mutex<Option<StorageError>>,
}

impl MemoryStore {
    /// Creates a store whose public URLs start with `public_base`.
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into().trim_end_matches('/').to_string(),
            objects: DashMap::new(),
            rejection: std::sync::Mutex::new(None),
        }
    }

    /// Makes the next upload fail with `error`.
    pub fn reject_next(&self, error: StorageError) {
        if let Ok(mut guard) = self.rejection.lock() {
            *guard = Some(error);
        }
    }

    /// Returns the stored content type and bytes of an object.
    pub fn object(&self, path: &str) -> Option<(String, Vec<u8>)> {
        self.objects.get(path).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_object_path(path)?;
        if let Some(error) = self.rejection.lock().ok().and_then(|mut guard| guard.take()) {
            return Err(error);
        }
        self.objects
            .insert(path.to_string(), (content_type.to_string(), bytes));
        Ok(format!("{}/{}", self.public_base, path))
    }
}
