use std::sync::Arc;
use std::sync::Mutex;

use ventures_lib::model::Value;
use ventures_table::{
    Action, Cell, Click, Column, EventResult, GridRow, Table, TableError, TableRow, Tone,
};

#[derive(Debug, Clone, PartialEq)]
struct Inquiry {
    id: i64,
    company: String,
    status: &'static str,
    budget: Option<i64>,
}

impl TableRow for Inquiry {
    const FIELDS: &'static [&'static str] = &["id", "company", "status", "budget"];

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "company" => self.company.as_str().into(),
            "status" => self.status.into(),
            "budget" => self.budget.into(),
            _ => Value::Null,
        }
    }
}

fn inquiry(id: i64, company: &str) -> Inquiry {
    Inquiry {
        id,
        company: company.to_string(),
        status: "new",
        budget: None,
    }
}

fn columns() -> Vec<Column<Inquiry>> {
    vec![
        Column::new("Company", "company"),
        Column::new("Status", "status").render(|row: &Inquiry| Cell::badge(row.status, Tone::Info)),
        Column::new("Budget", "budget"),
        Column::new("", "actions").render(|_: &Inquiry| {
            Cell::actions([Action::new("accept", "Accept"), Action::new("reject", "Reject")])
        }),
    ]
}

#[test]
fn test_one_row_per_input_in_order() {
    let table = Table::new(columns()).unwrap();
    for n in 0..5 {
        let rows: Vec<_> = (0..n).map(|i| inquiry(i, &format!("Co {}", i))).collect();
        let grid = table.render(&rows);

        if n == 0 {
            assert!(grid.is_placeholder());
            continue;
        }
        assert_eq!(grid.rows.len(), rows.len());
        for (position, row) in grid.rows.iter().enumerate() {
            match row {
                GridRow::Data { index, cells } => {
                    assert_eq!(*index, position);
                    assert_eq!(cells.len(), 4);
                    assert_eq!(cells[0], Cell::text(format!("Co {}", position)));
                }
                GridRow::Placeholder { .. } => panic!("unexpected placeholder"),
            }
        }
    }
}

#[test]
fn test_empty_rows_render_single_spanning_placeholder() {
    let table = Table::new(columns()).unwrap();
    let grid = table.render(&[]);

    assert_eq!(grid.headers.len(), 4);
    assert_eq!(
        grid.rows,
        vec![GridRow::Placeholder {
            span: 4,
            text: "No results".to_string(),
        }]
    );

    let grid = Table::new(columns())
        .unwrap()
        .placeholder("No inquiries yet")
        .render(&[]);
    assert!(matches!(&grid.rows[0], GridRow::Placeholder { text, .. } if text == "No inquiries yet"));
}

#[test]
fn test_custom_render_and_raw_values() {
    let table = Table::new(columns()).unwrap();
    let mut row = inquiry(1, "Acme");
    row.budget = Some(5000);

    let grid = table.render(&[row, inquiry(2, "Globex")]);
    let first = grid.cells(0).unwrap();
    assert_eq!(first[1], Cell::badge("new", Tone::Info));
    assert_eq!(first[2], Cell::text("5000"));

    // Null renders as empty text.
    assert_eq!(grid.cells(1).unwrap()[2], Cell::text(""));
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = Table::<Inquiry>::new(vec![Column::new("Name", "name")]).unwrap_err();
    assert_eq!(
        err,
        TableError::UnknownField {
            column: "Name".to_string(),
            key: "name".to_string(),
            known: "id, company, status, budget".to_string(),
        }
    );

    // A render function lifts the requirement.
    assert!(Table::<Inquiry>::new(vec![Column::new("Name", "name").render(|r: &Inquiry| Cell::text(&r.company))]).is_ok());
}

fn recording_table() -> (Table<Inquiry>, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let rows_log = Arc::clone(&log);
    let actions_log = Arc::clone(&log);
    let table = Table::new(columns())
        .unwrap()
        .on_row_click(move |row| rows_log.lock().unwrap().push(format!("row {}", row.id)))
        .on_action(move |row, id| actions_log.lock().unwrap().push(format!("{} {}", id, row.id)));
    (table, log)
}

#[test]
fn test_row_click_fires_once_with_full_row() {
    let (table, log) = recording_table();
    let rows = vec![inquiry(7, "Acme"), inquiry(8, "Globex")];

    assert_eq!(table.handle_click(&rows, &Click::row(1)), EventResult::Consumed);
    assert_eq!(*log.lock().unwrap(), vec!["row 8"]);
}

#[test]
fn test_action_click_does_not_reach_row_handler() {
    let (table, log) = recording_table();
    let rows = vec![inquiry(7, "Acme")];

    let result = table.handle_click(&rows, &Click::action(0, "accept"));

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(*log.lock().unwrap(), vec!["accept 7"]);
}

#[test]
fn test_clicks_without_handlers() {
    let table = Table::new(columns()).unwrap();
    let rows = vec![inquiry(1, "Acme")];

    assert_eq!(table.handle_click(&rows, &Click::row(0)), EventResult::Ignored);
    // Still consumed: the control swallows the click even with no handler.
    assert_eq!(
        table.handle_click(&rows, &Click::action(0, "reject")),
        EventResult::Consumed
    );
    assert_eq!(table.handle_click(&rows, &Click::row(3)), EventResult::Ignored);
}

#[test]
fn test_click_on_action_the_row_does_not_render() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let actions_log = Arc::clone(&log);
    let columns = vec![
        Column::new("Company", "company"),
        Column::new("", "actions").render(|row: &Inquiry| {
            if row.status == "new" {
                Cell::actions([Action::new("accept", "Accept")])
            } else {
                Cell::actions([])
            }
        }),
    ];
    let table = Table::new(columns)
        .unwrap()
        .on_action(move |row, id| actions_log.lock().unwrap().push(format!("{} {}", id, row.id)));
    let mut closed = inquiry(1, "Acme");
    closed.status = "accepted";
    let rows = vec![closed, inquiry(2, "Globex")];

    assert_eq!(table.handle_click(&rows, &Click::action(0, "accept")), EventResult::Ignored);
    assert_eq!(table.handle_click(&rows, &Click::action(1, "delete")), EventResult::Ignored);
    assert!(log.lock().unwrap().is_empty());

    assert_eq!(table.handle_click(&rows, &Click::action(1, "accept")), EventResult::Consumed);
    assert_eq!(*log.lock().unwrap(), vec!["accept 2"]);
}
