//! Mutations as explicit commands.
//!
//! A command is executed and awaited, then the affected view is reloaded.
//! There is no optimistic update: a failed command changes nothing locally,
//! raises an error notification and skips the reload.

use std::future::Future;

use async_trait::async_trait;

use crate::api::query::Filter;
use crate::error::Error;
use crate::model::Record;
use crate::notify::Notification;
use crate::notify::Notifier;
use crate::source::DataSource;

/// A mutation against a data source.
#[async_trait]
pub trait Command: Send + Sync {
    /// Short human-readable description, e.g. `Mark inquiry 4 as accepted`.
    fn label(&self) -> String;

    /// Performs the mutation.
    async fn execute(&self, source: &dyn DataSource) -> Result<(), Error>;
}

/// Executes `command`, then runs `reload` on success.
///
/// On failure the error is logged, an error notification is queued and
/// `reload` is not called.
pub async fn dispatch<C, R, Fut>(
    command: &C,
    source: &dyn DataSource,
    notifier: &Notifier,
    reload: R,
) -> Result<(), Error>
where
    C: Command + ?Sized,
    R: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let label = command.label();
    log::info!("Executing: {}", label);

    if let Err(e) = command.execute(source).await {
        log::error!("{} failed: {}", label, e);
        notifier.push(Notification::error(format!("{} failed: {}", label, e)));
        return Err(e);
    }

    reload().await;
    notifier.push(Notification::success(label));
    Ok(())
}

/// Applies `changes` to the rows of `collection` matching `filters`.
///
/// Matching no row is a failure.
#[derive(Debug, Clone)]
pub struct UpdateRecord {
    label: String,
    collection: String,
    filters: Vec<Filter>,
    changes: Record,
}

impl UpdateRecord {
    pub fn new(
        label: impl Into<String>,
        collection: impl Into<String>,
        filters: Vec<Filter>,
        changes: Record,
    ) -> Self {
        Self {
            label: label.into(),
            collection: collection.into(),
            filters,
            changes,
        }
    }
}

#[async_trait]
impl Command for UpdateRecord {
    fn label(&self) -> String {
        self.label.clone()
    }

    async fn execute(&self, source: &dyn DataSource) -> Result<(), Error> {
        let updated = source
            .update(&self.collection, &self.filters, self.changes.clone())
            .await?;
        if updated.is_empty() {
            let key = self
                .filters
                .iter()
                .map(|f| f.field().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::not_found(&self.collection, key));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::memory::MemorySource;
    use crate::model::Value;
    use crate::notify::Level;

    fn source() -> MemorySource {
        MemorySource::new().with_rows(
            "vendor_inquiries",
            vec![Record::new().set("id", 4i64).set("status", "new")],
        )
    }

    fn accept(id: i64) -> UpdateRecord {
        UpdateRecord::new(
            format!("Mark inquiry {} as accepted", id),
            "vendor_inquiries",
            vec![Filter::eq("id", id)],
            Record::new().set("status", "accepted"),
        )
    }

    #[tokio::test]
    async fn test_success_reloads() {
        let source = source();
        let notifier = Notifier::new();
        let reloads = AtomicUsize::new(0);
        let counter = &reloads;

        dispatch(&accept(4), &source, &notifier, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

        assert_eq!(reloads.load(Ordering::SeqCst), 1);
        assert_eq!(
            source.rows("vendor_inquiries")[0].get_value("status"),
            Value::Text("accepted".into())
        );
        assert_eq!(notifier.drain()[0].level, Level::Success);
    }

    #[tokio::test]
    async fn test_failure_notifies_without_reload() {
        let source = source();
        source.fail("vendor_inquiries", "permission denied");
        let notifier = Notifier::new();
        let reloads = AtomicUsize::new(0);
        let counter = &reloads;

        let result = dispatch(&accept(4), &source, &notifier, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert!(result.is_err());
        assert_eq!(reloads.load(Ordering::SeqCst), 0);
        let shown = notifier.drain();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, Level::Error);
        assert!(shown[0].message.contains("permission denied"));
    }

    #[tokio::test]
    async fn test_missing_row_is_an_error() {
        let source = source();
        let err = accept(99).execute(&source).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
