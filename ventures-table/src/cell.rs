use ventures_lib::model::Value;

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

/// An interactive control inside a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Identifier passed to the action handler.
    pub id: String,
    /// Button text.
    pub label: String,
}

impl Action {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The display content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// A status pill.
    Badge {
        /// Badge text.
        label: String,
        /// Badge colour.
        tone: Tone,
    },
    /// A row of buttons. Clicking one does not count as a row click.
    Actions(Vec<Action>),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Self::Badge {
            label: label.into(),
            tone,
        }
    }

    pub fn actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self::Actions(actions.into_iter().collect())
    }

    /// The cell as plain text. Actions render as `[Label]` buttons separated
    /// by a space.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Badge { label, .. } => label.clone(),
            Self::Actions(actions) => actions
                .iter()
                .map(|a| format!("[{}]", a.label))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// The actions in this cell, if any.
    pub fn action_list(&self) -> &[Action] {
        match self {
            Self::Actions(actions) => actions,
            _ => &[],
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
