use std::collections::BTreeSet;

use ventures_lib::aggregate::pivot_count;
use ventures_lib::format::format_month;
use ventures_lib::model::Value;
use ventures_table::{Alignment, Cell, Column, Table, TableError, TableRow};

use crate::model::{Engagement, EngagementStage};

/// Engagement counts by stage (rows) and month of last update (columns).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeatMap {
    /// Months in ascending order, as `YYYY-MM`.
    pub months: Vec<String>,
    pub rows: Vec<HeatRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatRow {
    pub stage: EngagementStage,
    /// One count per month, aligned with [`HeatMap::months`].
    pub counts: Vec<usize>,
}

impl HeatRow {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl TableRow for HeatRow {
    const FIELDS: &'static [&'static str] = &["stage", "total"];

    fn field(&self, key: &str) -> Value {
        match key {
            "stage" => self.stage.as_str().into(),
            "total" => self.total().into(),
            _ => Value::Null,
        }
    }
}

/// Shade for a count relative to the busiest cell.
fn shade(count: usize, max: usize) -> &'static str {
    const SHADES: [&str; 4] = ["░", "▒", "▓", "█"];
    if count == 0 || max == 0 {
        return "·";
    }
    SHADES[((count * SHADES.len()).div_ceil(max) - 1).min(SHADES.len() - 1)]
}

impl HeatMap {
    /// Builds the map. Every stage gets a row, in pipeline order, even when
    /// it has no engagements.
    pub fn build(engagements: &[Engagement]) -> Self {
        let pivot = pivot_count(engagements, |e| e.stage, |e| format_month(e.updated_at));
        let months: Vec<String> = pivot
            .keys()
            .map(|(_, month)| month.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = EngagementStage::ALL
            .into_iter()
            .map(|stage| HeatRow {
                stage,
                counts: months
                    .iter()
                    .map(|month| pivot.get(&(stage, month.clone())).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self { months, rows }
    }

    pub fn max(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// A table with a stage column, one shaded column per month and a total.
    pub fn table(&self) -> Result<Table<HeatRow>, TableError> {
        let max = self.max();
        let mut columns = vec![Column::new("Stage", "stage")];
        for (i, month) in self.months.iter().enumerate() {
            columns.push(
                Column::new(month.as_str(), month.as_str())
                    .align(Alignment::Center)
                    .render(move |row: &HeatRow| {
                        let count = row.counts.get(i).copied().unwrap_or(0);
                        Cell::text(format!("{} {}", shade(count, max), count))
                    }),
            );
        }
        columns.push(Column::new("Total", "total").align(Alignment::Right));

        Ok(Table::new(columns)?.placeholder("No engagements"))
    }
}
