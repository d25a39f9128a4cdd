//! Generic table renderer.
//!
//! A [`Table`] maps an ordered list of [`Column`]s over rows of any
//! [`TableRow`] type and produces a [`Grid`] of [`Cell`]s. Row clicks and
//! action-button clicks are dispatched through [`Table::handle_click`]; a
//! click on an action never reaches the row handler.
//!
//! This is a pure presentation component: no sorting, filtering or
//! pagination. [`render_text`] lays a grid out for a terminal.
//!
//! # Example
//!
//! ```
//! use ventures_lib::model::Value;
//! use ventures_table::{Column, Table, TableRow};
//!
//! #[derive(Clone)]
//! struct Company { name: String, seats: i64 }
//!
//! impl TableRow for Company {
//!     const FIELDS: &'static [&'static str] = &["name", "seats"];
//!
//!     fn field(&self, key: &str) -> Value {
//!         match key {
//!             "name" => self.name.as_str().into(),
//!             "seats" => self.seats.into(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let table = Table::new(vec![Column::new("Name", "name"), Column::new("Seats", "seats")])?;
//! let grid = table.render(&[Company { name: "Acme".into(), seats: 12 }]);
//! assert_eq!(grid.data_row_count(), 1);
//! # Ok::<(), ventures_table::TableError>(())
//! ```

mod cell;
mod column;
mod error;
mod events;
mod grid;
mod row;
mod table;
pub mod text;

pub use cell::{Action, Cell, Tone};
pub use column::{Alignment, Column};
pub use error::TableError;
pub use events::{Click, ClickTarget, EventResult};
pub use grid::{Grid, GridRow, Header};
pub use row::TableRow;
pub use table::{DEFAULT_PLACEHOLDER, Table};
pub use text::{TextGrid, render_text};
