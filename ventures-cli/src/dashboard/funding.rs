use rust_decimal::Decimal;
use ventures_lib::aggregate::{group_by, total};
use ventures_lib::format::{format_currency, format_percent};
use ventures_lib::model::Value;
use ventures_table::{Alignment, Cell, Column, Table, TableError, TableRow};

use crate::model::FundingRecord;

/// Committed and disbursed totals for one program.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingRow {
    pub program: String,
    pub committed: Decimal,
    pub disbursed: Decimal,
}

impl FundingRow {
    pub fn percent_disbursed(&self) -> String {
        format_percent(Some(self.disbursed), Some(self.committed))
    }
}

impl TableRow for FundingRow {
    const FIELDS: &'static [&'static str] = &["program", "committed", "disbursed"];

    fn field(&self, key: &str) -> Value {
        match key {
            "program" => self.program.as_str().into(),
            "committed" => self.committed.into(),
            "disbursed" => self.disbursed.into(),
            _ => Value::Null,
        }
    }
}

/// Sums funding per program, programs in first-seen order.
pub fn summarize(records: &[FundingRecord]) -> Vec<FundingRow> {
    group_by(records, |r| r.program.clone())
        .into_iter()
        .map(|(program, group)| FundingRow {
            program,
            committed: total(&group, |r| r.committed),
            disbursed: total(&group, |r| r.disbursed),
        })
        .collect()
}

pub fn table() -> Result<Table<FundingRow>, TableError> {
    let columns = vec![
        Column::new("Program", "program"),
        Column::new("Committed", "committed")
            .align(Alignment::Right)
            .render(|row: &FundingRow| Cell::text(format_currency(Some(row.committed)))),
        Column::new("Disbursed", "disbursed")
            .align(Alignment::Right)
            .render(|row: &FundingRow| Cell::text(format_currency(Some(row.disbursed)))),
        Column::new("Disbursed %", "percent")
            .align(Alignment::Right)
            .render(|row: &FundingRow| Cell::text(row.percent_disbursed())),
    ];
    Ok(Table::new(columns)?.placeholder("No funding recorded"))
}
