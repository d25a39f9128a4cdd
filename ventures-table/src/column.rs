use std::fmt;
use std::sync::Arc;

use crate::cell::Cell;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

type RenderFn<T> = Arc<dyn Fn(&T) -> Cell + Send + Sync>;

/// Column configuration.
///
/// Column order is rendering order. A column shows the row's `key` field
/// unless a render function is set, in which case the function's cell is
/// shown and the key only identifies the column.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::new("Company", "company").width(24),
///     Column::new("Status", "status").render(|row: &Inquiry| status_badge(row.status)),
///     Column::new("Budget", "budget").align(Alignment::Right),
/// ];
/// ```
pub struct Column<T> {
    /// Column header text
    pub label: String,
    /// Field key read from the row
    pub key: String,
    /// Fixed width in terminal columns; `None` fits the content
    pub width: Option<usize>,
    /// Horizontal alignment
    pub align: Alignment,
    render: Option<RenderFn<T>>,
}

impl<T> Column<T> {
    /// Create a column showing the row's `key` field.
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            width: None,
            align: Alignment::Left,
            render: None,
        }
    }

    /// Replace the raw field value with a custom cell.
    pub fn render(mut self, render: impl Fn(&T) -> Cell + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Whether this column has a custom render function.
    pub fn is_custom(&self) -> bool {
        self.render.is_some()
    }

    pub(crate) fn renderer(&self) -> Option<&RenderFn<T>> {
        self.render.as_ref()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            key: self.key.clone(),
            width: self.width,
            align: self.align,
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("custom", &self.is_custom())
            .finish()
    }
}
