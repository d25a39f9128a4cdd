use async_trait::async_trait;
use ventures_lib::{DataSource, Error};
use ventures_lib::aggregate::attach_counts;
use ventures_lib::api::query::{OrderBy, Query};
use ventures_lib::format::format_date;
use ventures_lib::model::Value;
use ventures_lib::resource::ViewModel;
use ventures_lib::source::fetch_as;
use ventures_table::{Alignment, Cell, Column, Table, TableError, TableRow, TextGrid};

use super::{Page, render_view};
use crate::model::{EVENTS, Event, REGISTRATIONS, Registration};

/// An event with the number of registrations pointing at it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub event: Event,
    pub registrations: usize,
}

impl TableRow for EventRow {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "starts_at",
        "location",
        "capacity",
        "registrations",
    ];

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.event.id.into(),
            "title" => self.event.title.as_str().into(),
            "starts_at" => self.event.starts_at.into(),
            "location" => self.event.location.as_deref().into(),
            "capacity" => self.event.capacity.into(),
            "registrations" => self.registrations.into(),
            _ => Value::Null,
        }
    }
}

/// Loads events and their registrations and joins them client-side.
pub async fn fetch_event_rows(source: &dyn DataSource) -> Result<Vec<EventRow>, Error> {
    let events = Query::from(EVENTS).order_by(OrderBy::asc("starts_at"));
    let registrations = Query::from(REGISTRATIONS).select("id,event_id,attendee_name,email");

    let (events, registrations) = futures::try_join!(
        fetch_as::<Event, _>(source, &events),
        fetch_as::<Registration, _>(source, &registrations),
    )?;

    Ok(
        attach_counts(&events, &registrations, |e| e.id, |r| r.event_id)
            .into_iter()
            .map(|counted| EventRow {
                event: counted.row,
                registrations: counted.count,
            })
            .collect(),
    )
}

pub struct EventsPage {
    view: ViewModel<Vec<EventRow>>,
    table: Table<EventRow>,
}

impl EventsPage {
    pub fn new() -> Result<Self, TableError> {
        Ok(Self {
            view: ViewModel::new(EVENTS),
            table: Table::new(Self::columns())?.placeholder("No events scheduled"),
        })
    }

    fn columns() -> Vec<Column<EventRow>> {
        vec![
            Column::new("Event", "title").width(28),
            Column::new("Date", "starts_at")
                .render(|row: &EventRow| Cell::text(format_date(row.event.starts_at))),
            Column::new("Location", "location").width(20),
            Column::new("Registrations", "registrations").align(Alignment::Right),
            Column::new("Capacity", "capacity").align(Alignment::Right),
        ]
    }

    pub fn rows(&self) -> Vec<EventRow> {
        self.view.ready_or_default()
    }
}

#[async_trait]
impl Page for EventsPage {
    fn title(&self) -> &'static str {
        "Events"
    }

    async fn load(&self, source: &dyn DataSource) -> Result<(), Error> {
        self.view.load(fetch_event_rows(source)).await
    }

    fn render(&self) -> TextGrid {
        render_view(&self.table, &self.view)
    }
}
