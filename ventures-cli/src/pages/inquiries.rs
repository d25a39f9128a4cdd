use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ventures_lib::{DataSource, Error};
use ventures_lib::api::query::{Filter, OrderBy, Query};
use ventures_lib::command::{Command, UpdateRecord, dispatch};
use ventures_lib::format::format_date;
use ventures_lib::model::{Record, Value};
use ventures_lib::notify::Notifier;
use ventures_lib::resource::ViewModel;
use ventures_lib::source::fetch_as;
use ventures_table::{
    Action, Cell, Click, Column, EventResult, Table, TableError, TableRow, TextGrid,
};

use super::{Page, render_view};
use crate::model::{INQUIRIES, InquiryStatus, VendorInquiry};

#[derive(Debug, Clone, PartialEq)]
pub struct InquiryRow(pub VendorInquiry);

impl TableRow for InquiryRow {
    const FIELDS: &'static [&'static str] =
        &["id", "company", "contact_email", "status", "created_at"];

    fn field(&self, key: &str) -> Value {
        let inquiry = &self.0;
        match key {
            "id" => inquiry.id.into(),
            "company" => inquiry.company.as_str().into(),
            "contact_email" => inquiry.contact_email.as_deref().into(),
            "status" => inquiry.status.into(),
            "created_at" => inquiry.created_at.into(),
            _ => Value::Null,
        }
    }
}

/// Moves an inquiry to a new review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetInquiryStatus {
    pub id: i64,
    pub status: InquiryStatus,
}

impl SetInquiryStatus {
    fn update(&self) -> UpdateRecord {
        UpdateRecord::new(
            self.label(),
            INQUIRIES,
            vec![Filter::eq("id", self.id)],
            Record::new().set("status", self.status),
        )
    }
}

#[async_trait]
impl Command for SetInquiryStatus {
    fn label(&self) -> String {
        format!("Mark inquiry {} as {}", self.id, self.status)
    }

    async fn execute(&self, source: &dyn DataSource) -> Result<(), Error> {
        self.update().execute(source).await
    }
}

/// Status transitions offered for an inquiry, as `(action id, label)`.
fn actions_for(status: InquiryStatus) -> Vec<Action> {
    let mut actions = Vec::new();
    if status == InquiryStatus::New {
        actions.push(Action::new(InquiryStatus::Reviewing.as_str(), "Review"));
    }
    if status.is_open() {
        actions.push(Action::new(InquiryStatus::Accepted.as_str(), "Accept"));
        actions.push(Action::new(InquiryStatus::Rejected.as_str(), "Reject"));
    }
    actions
}

pub struct InquiriesPage {
    view: ViewModel<Vec<InquiryRow>>,
    table: Table<InquiryRow>,
    selected: Arc<Mutex<Option<i64>>>,
    pending: Arc<Mutex<Option<SetInquiryStatus>>>,
}

impl InquiriesPage {
    pub fn new() -> Result<Self, TableError> {
        let selected = Arc::new(Mutex::new(None));
        let pending = Arc::new(Mutex::new(None));

        let on_row = Arc::clone(&selected);
        let on_action = Arc::clone(&pending);
        let table = Table::new(Self::columns())?
            .placeholder("No vendor inquiries")
            .on_row_click(move |row: &InquiryRow| {
                if let Ok(mut selected) = on_row.lock() {
                    *selected = Some(row.0.id);
                }
            })
            .on_action(move |row: &InquiryRow, id: &str| match id.parse::<InquiryStatus>() {
                Ok(status) => {
                    if let Ok(mut pending) = on_action.lock() {
                        *pending = Some(SetInquiryStatus {
                            id: row.0.id,
                            status,
                        });
                    }
                }
                Err(e) => log::warn!("Ignoring inquiry action: {}", e),
            });

        Ok(Self {
            view: ViewModel::new(INQUIRIES),
            table,
            selected,
            pending,
        })
    }

    fn columns() -> Vec<Column<InquiryRow>> {
        vec![
            Column::new("Company", "company").width(24),
            Column::new("Contact", "contact_email").width(28),
            Column::new("Status", "status")
                .render(|row: &InquiryRow| Cell::badge(row.0.status.as_str(), row.0.status.tone())),
            Column::new("Received", "created_at")
                .render(|row: &InquiryRow| Cell::text(format_date(row.0.created_at))),
            Column::new("", "actions").render(|row: &InquiryRow| Cell::actions(actions_for(row.0.status))),
        ]
    }

    pub fn rows(&self) -> Vec<InquiryRow> {
        self.view.ready_or_default()
    }

    /// Id of the inquiry whose row was clicked last.
    pub fn selected(&self) -> Option<i64> {
        self.selected.lock().ok().and_then(|selected| *selected)
    }

    /// Handles a click on the table. Returns the status change requested by
    /// an action button, if the click hit one.
    pub fn click(&self, click: &Click) -> Option<SetInquiryStatus> {
        let rows = self.rows();
        if self.table.handle_click(&rows, click) == EventResult::Ignored {
            return None;
        }
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }

    /// Executes a status change and reloads the page on success.
    pub async fn set_status(
        &self,
        source: &dyn DataSource,
        notifier: &Notifier,
        change: SetInquiryStatus,
    ) -> Result<(), Error> {
        dispatch(&change, source, notifier, move || async move {
            // Load failures are logged by the view model.
            let _ = self.load(source).await;
        })
        .await
    }
}

#[async_trait]
impl Page for InquiriesPage {
    fn title(&self) -> &'static str {
        "Vendor inquiries"
    }

    async fn load(&self, source: &dyn DataSource) -> Result<(), Error> {
        let query = Query::from(INQUIRIES).order_by(OrderBy::desc("created_at"));
        self.view
            .load(async move {
                let inquiries = fetch_as::<VendorInquiry, _>(source, &query).await?;
                Ok(inquiries.into_iter().map(InquiryRow).collect())
            })
            .await
    }

    fn render(&self) -> TextGrid {
        render_view(&self.table, &self.view)
    }
}

#[cfg(test)]
mod tests {
    use ventures_lib::notify::Level;

    use super::*;
    use crate::pages::testing;

    fn status_of(page: &InquiriesPage, id: i64) -> Option<InquiryStatus> {
        page.rows().iter().find(|r| r.0.id == id).map(|r| r.0.status)
    }

    #[test]
    fn test_actions_follow_status() {
        let ids = |status| {
            actions_for(status)
                .into_iter()
                .map(|a| a.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(InquiryStatus::New), ["reviewing", "accepted", "rejected"]);
        assert_eq!(ids(InquiryStatus::Reviewing), ["accepted", "rejected"]);
        assert!(ids(InquiryStatus::Accepted).is_empty());
    }

    #[tokio::test]
    async fn test_action_click_queues_status_change_without_selecting() {
        let source = testing::demo_source();
        let page = InquiriesPage::new().unwrap();
        page.load(source.as_ref()).await.unwrap();
        let first = page.rows()[0].0.id;

        let change = page.click(&Click::action(0, "accepted"));

        assert_eq!(
            change,
            Some(SetInquiryStatus {
                id: first,
                status: InquiryStatus::Accepted,
            })
        );
        assert_eq!(page.selected(), None);

        assert_eq!(page.click(&Click::row(0)), None);
        assert_eq!(page.selected(), Some(first));
    }

    #[tokio::test]
    async fn test_closed_inquiry_offers_no_status_change() {
        let source = testing::demo_source();
        let page = InquiriesPage::new().unwrap();
        page.load(source.as_ref()).await.unwrap();
        let closed = page
            .rows()
            .iter()
            .position(|r| r.0.status == InquiryStatus::Accepted)
            .unwrap();

        assert_eq!(page.click(&Click::action(closed, "rejected")), None);
        assert_eq!(page.click(&Click::action(closed, "accepted")), None);
    }

    #[tokio::test]
    async fn test_set_status_reloads() {
        let source = testing::demo_source();
        let notifier = Notifier::new();
        let page = InquiriesPage::new().unwrap();
        page.load(source.as_ref()).await.unwrap();
        let row = page.rows().into_iter().find(|r| r.0.status.is_open()).unwrap();

        page.set_status(
            source.as_ref(),
            &notifier,
            SetInquiryStatus {
                id: row.0.id,
                status: InquiryStatus::Rejected,
            },
        )
        .await
        .unwrap();

        assert_eq!(status_of(&page, row.0.id), Some(InquiryStatus::Rejected));
        assert_eq!(notifier.drain()[0].message, format!("Mark inquiry {} as rejected", row.0.id));
    }

    #[tokio::test]
    async fn test_failed_status_change_keeps_rows_and_notifies() {
        let source = testing::demo_source();
        let notifier = Notifier::new();
        let page = InquiriesPage::new().unwrap();
        page.load(source.as_ref()).await.unwrap();
        let before = page.rows();

        let result = page
            .set_status(
                source.as_ref(),
                &notifier,
                SetInquiryStatus {
                    id: 999,
                    status: InquiryStatus::Accepted,
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(page.rows(), before);
        let shown = notifier.drain();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, Level::Error);
    }
}
