//! Reading keys, values and contents of a table.

use crate::{Key, Table, Value};

/// All keys of `table` as an array, in iteration order.
pub fn keys(table: &Table) -> Table {
    table.with_entries(|entries| Table::array(entries.keys().cloned().map(Value::from)))
}

/// All values of `table` as an array, in the same order as [`keys`].
///
/// For any `i`, `keys(t)[i]` and `values(t)[i]` are a key and its value.
pub fn values(table: &Table) -> Table {
    Table::array(table.value_list())
}

/// Whether `key` is present in `table`.
pub fn has_key(table: &Table, key: impl Into<Key>) -> bool {
    table.contains_key(key)
}

/// Whether any value in `table` equals `value`.
///
/// Equality is structural: a nested table matches any table with the same
/// contents. Integers and floats match when numerically equal.
pub fn has_value(table: &Table, value: impl Into<Value>) -> bool {
    let value = value.into();
    table.with_entries(|entries| entries.values().any(|v| *v == value))
}

/// Render one level of `table` as `{ [key]: value, ... }`.
///
/// Strings are quoted, nested tables render as `{...}` and the empty table
/// as `{}`. Entries appear in iteration order, so the output is stable.
pub fn to_string(table: &Table) -> String {
    let parts: Vec<String> = table.with_entries(|entries| {
        entries
            .iter()
            .map(|(key, value)| format!("[{}]: {}", key, render(value)))
            .collect()
    });

    if parts.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", parts.join(", "))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("{:?}", s),
        Value::Table(_) => "{...}".to_string(),
        other => other.to_string(),
    }
}
