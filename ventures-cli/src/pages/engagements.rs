use async_trait::async_trait;
use ventures_lib::{DataSource, Error};
use ventures_lib::api::query::{OrderBy, Query};
use ventures_lib::format::format_date;
use ventures_lib::model::Value;
use ventures_lib::resource::ViewModel;
use ventures_lib::source::fetch_as;
use ventures_table::{Cell, Column, Table, TableError, TableRow, TextGrid};

use super::{Page, render_view};
use crate::model::{ENGAGEMENTS, Engagement};

#[derive(Debug, Clone, PartialEq)]
pub struct EngagementRow(pub Engagement);

impl TableRow for EngagementRow {
    const FIELDS: &'static [&'static str] = &["id", "company", "stage", "owner", "updated_at"];

    fn field(&self, key: &str) -> Value {
        let engagement = &self.0;
        match key {
            "id" => engagement.id.into(),
            "company" => engagement.company.as_str().into(),
            "stage" => engagement.stage.as_str().into(),
            "owner" => engagement.owner.as_deref().into(),
            "updated_at" => engagement.updated_at.into(),
            _ => Value::Null,
        }
    }
}

pub struct EngagementsPage {
    view: ViewModel<Vec<EngagementRow>>,
    table: Table<EngagementRow>,
}

impl EngagementsPage {
    pub fn new() -> Result<Self, TableError> {
        Ok(Self {
            view: ViewModel::new(ENGAGEMENTS),
            table: Table::new(Self::columns())?.placeholder("No engagements in the pipeline"),
        })
    }

    fn columns() -> Vec<Column<EngagementRow>> {
        vec![
            Column::new("Company", "company").width(24),
            Column::new("Stage", "stage")
                .render(|row: &EngagementRow| Cell::badge(row.0.stage.as_str(), row.0.stage.tone())),
            Column::new("Owner", "owner"),
            Column::new("Updated", "updated_at")
                .render(|row: &EngagementRow| Cell::text(format_date(Some(row.0.updated_at)))),
        ]
    }

    pub fn rows(&self) -> Vec<EngagementRow> {
        self.view.ready_or_default()
    }
}

#[async_trait]
impl Page for EngagementsPage {
    fn title(&self) -> &'static str {
        "Engagements"
    }

    async fn load(&self, source: &dyn DataSource) -> Result<(), Error> {
        let query = Query::from(ENGAGEMENTS).order_by(OrderBy::desc("updated_at"));
        self.view
            .load(async move {
                let engagements = fetch_as::<Engagement, _>(source, &query).await?;
                Ok(engagements.into_iter().map(EngagementRow).collect())
            })
            .await
    }

    fn render(&self) -> TextGrid {
        render_view(&self.table, &self.view)
    }
}
