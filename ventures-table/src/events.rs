//! Click dispatch for tables.

use crate::row::TableRow;
use crate::table::Table;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// What inside a row was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// The row itself.
    Row,
    /// The action control with this id.
    Action(String),
}

/// A click on the `row`th data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub row: usize,
    pub target: ClickTarget,
}

impl Click {
    pub fn row(row: usize) -> Self {
        Self {
            row,
            target: ClickTarget::Row,
        }
    }

    pub fn action(row: usize, id: impl Into<String>) -> Self {
        Self {
            row,
            target: ClickTarget::Action(id.into()),
        }
    }
}

impl<T: TableRow> Table<T> {
    /// Dispatch a click against the rows last rendered.
    ///
    /// An action click goes to the action handler only and is consumed
    /// there, so the row handler never sees it. Clicks on an action id the
    /// row does not render are ignored. A row click fires the row handler
    /// once, if one is set.
    pub fn handle_click(&self, rows: &[T], click: &Click) -> EventResult {
        let Some(row) = rows.get(click.row) else {
            return EventResult::Ignored;
        };

        match &click.target {
            ClickTarget::Action(id) => {
                if !self.renders_action(row, id) {
                    log::debug!("Row {} has no action {}", click.row, id);
                    return EventResult::Ignored;
                }
                log::debug!("Action {} clicked on row {}", id, click.row);
                if let Some(handler) = &self.on_action {
                    handler(row, id);
                }
                EventResult::Consumed
            }
            ClickTarget::Row => match &self.on_row_click {
                Some(handler) => {
                    handler(row);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
        }
    }

    fn renders_action(&self, row: &T, id: &str) -> bool {
        self.columns
            .iter()
            .any(|column| Self::cell(column, row).action_list().iter().any(|a| a.id == id))
    }
}
