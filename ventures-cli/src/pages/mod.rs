//! List pages.
//!
//! Each page owns a [`ViewModel`] for its rows and a statically defined
//! [`Table`]. Loading a page issues its fetches jointly; rendering shows
//! whatever the view model holds, with a loading or empty placeholder.

use std::sync::Arc;

use async_trait::async_trait;
use ventures_lib::{DataSource, Error};
use ventures_lib::api::ObjectStore;
use ventures_lib::notify::Notifier;
use ventures_lib::resource::ViewModel;
use ventures_table::{GridRow, Table, TableRow, TextGrid, render_text};

pub mod applications;
pub mod engagements;
pub mod events;
pub mod inquiries;

pub use applications::ApplicationsPage;
pub use engagements::EngagementsPage;
pub use events::EventsPage;
pub use inquiries::InquiriesPage;

/// Placeholder shown while a page is loading.
pub const LOADING: &str = "Loading…";

/// Collaborators shared by every page.
#[derive(Clone)]
pub struct Services {
    pub source: Arc<dyn DataSource>,
    pub store: Arc<dyn ObjectStore>,
    pub notifier: Notifier,
}

/// A page that lists rows in a table.
#[async_trait]
pub trait Page: Send + Sync {
    fn title(&self) -> &'static str;

    /// Fetches the page's rows. Failures are logged and leave the page
    /// empty.
    async fn load(&self, source: &dyn DataSource) -> Result<(), Error>;

    fn render(&self) -> TextGrid;
}

/// Renders the rows a view model holds, swapping the empty placeholder for
/// [`LOADING`] while a load is in flight.
pub(crate) fn render_view<T>(table: &Table<T>, view: &ViewModel<Vec<T>>) -> TextGrid
where
    T: TableRow + Clone + Send + Sync + 'static,
{
    let rows = view.ready_or_default();
    let mut grid = table.render(&rows);
    if view.is_loading()
        && let [GridRow::Placeholder { text, .. }] = grid.rows.as_mut_slice()
    {
        *text = LOADING.to_string();
    }
    render_text(&grid)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;
    use ventures_lib::memory::MemorySource;
    use ventures_lib::memory::MemoryStore;
    use ventures_lib::notify::Notifier;

    use super::Services;
    use crate::demo;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    pub fn demo_source() -> Arc<MemorySource> {
        Arc::new(demo::source(now()).unwrap())
    }

    pub fn services(source: Arc<MemorySource>, store: Arc<MemoryStore>) -> Services {
        Services {
            source,
            store,
            notifier: Notifier::new(),
        }
    }
}
