use crate::cell::Cell;
use crate::column::Alignment;

/// A rendered column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub label: String,
    pub width: Option<usize>,
    pub align: Alignment,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRow {
    /// Cells of the row at `index` in the input, one per column.
    Data { index: usize, cells: Vec<Cell> },
    /// Full-width message shown instead of data rows.
    Placeholder { span: usize, text: String },
}

/// The output of [`Table::render`](crate::Table::render).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<Header>,
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows backed by data.
    pub fn data_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, GridRow::Data { .. }))
            .count()
    }

    /// Whether the grid shows its placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [GridRow::Placeholder { .. }])
    }

    /// The cells of the `index`th input row.
    pub fn cells(&self, index: usize) -> Option<&[Cell]> {
        self.rows.iter().find_map(|row| match row {
            GridRow::Data { index: i, cells } if *i == index => Some(cells.as_slice()),
            _ => None,
        })
    }
}
