use std::fmt;
use std::sync::Arc;

use crate::cell::Cell;
use crate::column::Column;
use crate::error::TableError;
use crate::grid::{Grid, GridRow, Header};
use crate::row::TableRow;

/// Placeholder shown when there are no rows.
pub const DEFAULT_PLACEHOLDER: &str = "No results";

pub(crate) type RowHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub(crate) type ActionHandler<T> = Arc<dyn Fn(&T, &str) + Send + Sync>;

/// A table over rows of type `T`.
pub struct Table<T> {
    pub(crate) columns: Vec<Column<T>>,
    placeholder: String,
    pub(crate) on_row_click: Option<RowHandler<T>>,
    pub(crate) on_action: Option<ActionHandler<T>>,
}

impl<T: TableRow> Table<T> {
    /// Create a table, checking every plain column's key against
    /// [`TableRow::FIELDS`].
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, TableError> {
        if let Some(column) = columns
            .iter()
            .find(|c| !c.is_custom() && !T::has_field(&c.key))
        {
            return Err(TableError::UnknownField {
                column: column.label.clone(),
                key: column.key.clone(),
                known: T::FIELDS.join(", "),
            });
        }

        Ok(Self {
            columns,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            on_row_click: None,
            on_action: None,
        })
    }

    /// Set the text shown when there are no rows.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the handler invoked with the full row when a row is clicked.
    pub fn on_row_click(mut self, handler: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(handler));
        self
    }

    /// Set the handler invoked with the row and action id when an action
    /// control is clicked.
    pub fn on_action(mut self, handler: impl Fn(&T, &str) + Send + Sync + 'static) -> Self {
        self.on_action = Some(Arc::new(handler));
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Render `rows` into a grid.
    ///
    /// One data row per input row in input order, or a single placeholder
    /// spanning every column when `rows` is empty.
    pub fn render(&self, rows: &[T]) -> Grid {
        let headers = self
            .columns
            .iter()
            .map(|c| Header {
                label: c.label.clone(),
                width: c.width,
                align: c.align,
            })
            .collect();

        let rows = if rows.is_empty() {
            vec![GridRow::Placeholder {
                span: self.columns.len(),
                text: self.placeholder.clone(),
            }]
        } else {
            rows.iter()
                .enumerate()
                .map(|(index, row)| GridRow::Data {
                    index,
                    cells: self.columns.iter().map(|c| Self::cell(c, row)).collect(),
                })
                .collect()
        };

        Grid { headers, rows }
    }

    pub(crate) fn cell(column: &Column<T>, row: &T) -> Cell {
        match column.renderer() {
            Some(render) => render(row),
            None => Cell::from(row.field(&column.key)),
        }
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("placeholder", &self.placeholder)
            .field("on_row_click", &self.on_row_click.is_some())
            .field("on_action", &self.on_action.is_some())
            .finish()
    }
}
