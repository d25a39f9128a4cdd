use ventures_lib::model::Value;
use ventures_table::{Action, Alignment, Cell, Click, Column, Table, TableRow, render_text};

#[derive(Clone)]
struct Event {
    title: String,
    seats: i64,
}

impl TableRow for Event {
    const FIELDS: &'static [&'static str] = &["title", "seats"];

    fn field(&self, key: &str) -> Value {
        match key {
            "title" => self.title.as_str().into(),
            "seats" => self.seats.into(),
            _ => Value::Null,
        }
    }
}

fn event(title: &str, seats: i64) -> Event {
    Event {
        title: title.to_string(),
        seats,
    }
}

fn table() -> Table<Event> {
    Table::new(vec![
        Column::new("Title", "title").width(8),
        Column::new("Seats", "seats").align(Alignment::Right),
        Column::new("", "actions")
            .render(|_: &Event| Cell::actions([Action::new("open", "Open")])),
    ])
    .unwrap()
}

#[test]
fn test_layout() {
    let text = render_text(&table().render(&[event("Demo Day", 40), event("Founder Breakfast", 8)]));

    assert_eq!(
        text.lines(),
        [
            "Title     Seats",
            "────────  ─────  ──────",
            "Demo Day     40  [Open]",
            "Founder…      8  [Open]",
        ]
    );
}

#[test]
fn test_wide_glyphs_are_measured_by_display_width() {
    let text = render_text(&table().render(&[event("東京ピッチ", 3)]));
    assert_eq!(text.lines()[2], "東京ピ…       3  [Open]");
}

#[test]
fn test_placeholder_line() {
    let text = render_text(&table().render(&[]));
    assert_eq!(text.lines().len(), 3);
    assert!(text.lines()[2].trim() == "No results");
    assert_eq!(text.hit_test(2, 4), None);
}

#[test]
fn test_hit_test_maps_positions_to_clicks() {
    let text = render_text(&table().render(&[event("Demo Day", 40), event("Pitch", 12)]));

    assert_eq!(text.hit_test(0, 0), None);
    assert_eq!(text.hit_test(1, 0), None);
    assert_eq!(text.hit_test(2, 0), Some(Click::row(0)));
    assert_eq!(text.hit_test(3, 17), Some(Click::action(1, "open")));
    assert_eq!(text.hit_test(3, 16), Some(Click::row(1)));
    assert_eq!(text.hit_test(9, 0), None);
}
