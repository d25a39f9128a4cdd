use async_trait::async_trait;
use serde::Deserialize;
use ventures_lib::{DataSource, Error};
use ventures_lib::aggregate::left_join;
use ventures_lib::api::{ObjectStore, content_type_for};
use ventures_lib::api::query::{Filter, OrderBy, Query};
use ventures_lib::command::{UpdateRecord, dispatch};
use ventures_lib::format::format_date;
use ventures_lib::model::{Record, Value};
use ventures_lib::notify::{Notification, Notifier};
use ventures_lib::resource::ViewModel;
use ventures_lib::source::fetch_as;
use ventures_table::{Action, Cell, Column, Table, TableError, TableRow, TextGrid, Tone};

use super::{Page, render_view};
use crate::model::{APPLICATIONS, INQUIRIES, VendorApplication};

/// The slice of an inquiry the applications list needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct InquiryCompany {
    id: i64,
    company: String,
}

/// An application with the company name of its inquiry, when it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRow {
    pub application: VendorApplication,
    pub company: Option<String>,
}

impl TableRow for ApplicationRow {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "inquiry_id",
        "company",
        "product",
        "pitch_deck_url",
        "submitted_at",
    ];

    fn field(&self, key: &str) -> Value {
        let application = &self.application;
        match key {
            "id" => application.id.into(),
            "inquiry_id" => application.inquiry_id.into(),
            "company" => self.company.as_deref().into(),
            "product" => application.product.as_str().into(),
            "pitch_deck_url" => application.pitch_deck_url.as_deref().into(),
            "submitted_at" => application.submitted_at.into(),
            _ => Value::Null,
        }
    }
}

pub async fn fetch_application_rows(source: &dyn DataSource) -> Result<Vec<ApplicationRow>, Error> {
    let applications = Query::from(APPLICATIONS).order_by(OrderBy::desc("submitted_at"));
    let companies = Query::from(INQUIRIES).select("id,company");

    let (applications, companies) = futures::try_join!(
        fetch_as::<VendorApplication, _>(source, &applications),
        fetch_as::<InquiryCompany, _>(source, &companies),
    )?;

    Ok(
        left_join(&applications, &companies, |a| a.inquiry_id, |c| c.id)
            .into_iter()
            .map(|joined| ApplicationRow {
                application: joined.left,
                company: joined.right.map(|c| c.company),
            })
            .collect(),
    )
}

/// Object path of an application's pitch deck.
pub fn pitch_deck_path(application_id: i64, file_name: &str) -> String {
    format!("pitch-decks/{}/{}", application_id, file_name)
}

pub struct ApplicationsPage {
    view: ViewModel<Vec<ApplicationRow>>,
    table: Table<ApplicationRow>,
}

impl ApplicationsPage {
    pub fn new() -> Result<Self, TableError> {
        Ok(Self {
            view: ViewModel::new(APPLICATIONS),
            table: Table::new(Self::columns())?.placeholder("No applications yet"),
        })
    }

    fn columns() -> Vec<Column<ApplicationRow>> {
        vec![
            Column::new("Product", "product").width(24),
            Column::new("Company", "company").render(|row: &ApplicationRow| {
                Cell::text(row.company.as_deref().unwrap_or("-"))
            }),
            Column::new("Submitted", "submitted_at")
                .render(|row: &ApplicationRow| Cell::text(format_date(row.application.submitted_at))),
            Column::new("Pitch deck", "pitch_deck_url").render(|row: &ApplicationRow| {
                match &row.application.pitch_deck_url {
                    Some(_) => Cell::badge("uploaded", Tone::Success),
                    None => Cell::badge("missing", Tone::Warning),
                }
            }),
            Column::new("", "actions").render(|_: &ApplicationRow| {
                Cell::actions([Action::new("upload", "Upload deck")])
            }),
        ]
    }

    pub fn rows(&self) -> Vec<ApplicationRow> {
        self.view.ready_or_default()
    }

    /// Uploads a pitch deck and records its URL on the application.
    ///
    /// A failed upload raises a notification carrying the storage message
    /// when there is one. The page reloads only after the URL is saved.
    pub async fn upload_pitch_deck(
        &self,
        source: &dyn DataSource,
        store: &dyn ObjectStore,
        notifier: &Notifier,
        application_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Error> {
        let path = pitch_deck_path(application_id, file_name);
        let url = match store.upload(&path, bytes, content_type_for(file_name)).await {
            Ok(url) => url,
            Err(e) => {
                log::error!("Pitch deck upload for application {} failed: {}", application_id, e);
                notifier.push(Notification::upload_failed(&e));
                return Err(e.into());
            }
        };

        let attach = UpdateRecord::new(
            format!("Attach pitch deck to application {}", application_id),
            APPLICATIONS,
            vec![Filter::eq("id", application_id)],
            Record::new().set("pitch_deck_url", url.as_str()),
        );
        dispatch(&attach, source, notifier, move || async move {
            let _ = self.load(source).await;
        })
        .await?;

        Ok(url)
    }
}

#[async_trait]
impl Page for ApplicationsPage {
    fn title(&self) -> &'static str {
        "Vendor applications"
    }

    async fn load(&self, source: &dyn DataSource) -> Result<(), Error> {
        self.view.load(fetch_application_rows(source)).await
    }

    fn render(&self) -> TextGrid {
        render_view(&self.table, &self.view)
    }
}

#[cfg(test)]
mod tests {
    use ventures_lib::error::StorageError;
    use ventures_lib::memory::MemoryStore;
    use ventures_lib::notify::Level;

    use super::*;
    use crate::pages::testing;

    #[tokio::test]
    async fn test_applications_join_company_names() {
        let source = testing::demo_source();
        let page = ApplicationsPage::new().unwrap();
        page.load(source.as_ref()).await.unwrap();

        let rows = page.rows();
        assert!(!rows.is_empty());
        for row in &rows {
            assert_eq!(row.company.is_some(), row.application.inquiry_id.is_some());
        }
        assert!(rows.iter().any(|r| r.company.is_none()));
    }

    #[tokio::test]
    async fn test_upload_attaches_url_and_reloads() {
        let source = testing::demo_source();
        let store = MemoryStore::new("https://files.example.co/public/uploads");
        let notifier = Notifier::new();
        let page = ApplicationsPage::new().unwrap();
        page.load(source.as_ref()).await.unwrap();
        let target = page
            .rows()
            .into_iter()
            .find(|r| r.application.pitch_deck_url.is_none())
            .unwrap();
        let id = target.application.id;

        let url = page
            .upload_pitch_deck(source.as_ref(), &store, &notifier, id, "deck.pdf", vec![1, 2])
            .await
            .unwrap();

        assert_eq!(url, format!("https://files.example.co/public/uploads/pitch-decks/{}/deck.pdf", id));
        let (content_type, _) = store.object(&pitch_deck_path(id, "deck.pdf")).unwrap();
        assert_eq!(content_type, "application/pdf");
        let reloaded = page.rows().into_iter().find(|r| r.application.id == id).unwrap();
        assert_eq!(reloaded.application.pitch_deck_url, Some(url));
    }

    #[tokio::test]
    async fn test_rejected_upload_notifies_with_storage_message() {
        let source = testing::demo_source();
        let store = MemoryStore::new("https://files.example.co");
        store.reject_next(StorageError::Rejected {
            status: 413,
            message: Some("The object exceeded the maximum allowed size".into()),
        });
        let notifier = Notifier::new();
        let page = ApplicationsPage::new().unwrap();

        let err = page
            .upload_pitch_deck(source.as_ref(), &store, &notifier, 1, "deck.pdf", vec![0])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Storage(_)));
        let shown = notifier.drain();
        assert_eq!(shown[0].level, Level::Error);
        assert_eq!(shown[0].message, "The object exceeded the maximum allowed size");
        assert!(page.view.state().is_idle());
    }

    #[tokio::test]
    async fn test_upload_without_message_uses_generic_text() {
        let source = testing::demo_source();
        let store = MemoryStore::new("https://files.example.co");
        store.reject_next(StorageError::Rejected {
            status: 500,
            message: None,
        });
        let notifier = Notifier::new();
        let page = ApplicationsPage::new().unwrap();

        let _ = page
            .upload_pitch_deck(source.as_ref(), &store, &notifier, 1, "deck.pdf", vec![0])
            .await;

        assert_eq!(notifier.drain()[0].message, "Upload failed. Please try again.");
    }
}
