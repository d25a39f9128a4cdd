use ventures_lib::model::Value;

/// A row type a [`Table`](crate::Table) can display.
///
/// `FIELDS` lists every key [`field`](TableRow::field) answers for. Columns
/// without a custom render function are checked against it when the table is
/// built, so a typo fails at construction instead of rendering blanks.
pub trait TableRow {
    /// The field keys this row exposes.
    const FIELDS: &'static [&'static str];

    /// Reads a field. Unknown keys yield [`Value::Null`].
    fn field(&self, key: &str) -> Value;

    /// Whether `key` is one of [`FIELDS`](TableRow::FIELDS).
    fn has_field(key: &str) -> bool {
        Self::FIELDS.contains(&key)
    }
}
