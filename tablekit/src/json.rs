//! Conversion between tables and JSON.
//!
//! JSON arrays become array-shaped tables keyed `1..=n` and objects become
//! tables keyed by string. `null` becomes [`Value::Nil`]; because tables never
//! hold nil, null array elements and null object members are dropped.
//!
//! Going the other way, array-shaped tables become JSON arrays (so the empty
//! table becomes `[]`) and every other table becomes an object whose keys are
//! the [`Key`](crate::Key) display strings. Tables iterate in key order, so the
//! output is deterministic. Two keys with the same display string, such as
//! `5` and `"5"`, cannot both become object members and fail the export.

use crate::{error::Result, is_array, Error, Limits, Table, TableId, Value};
use serde_json::{Map, Number, Value as Json};
use std::collections::HashSet;

/// Convert a JSON value into a [`Value`].
pub fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Nil,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::Str(s),
        Json::Array(items) => Value::Table(Table::array(items.into_iter().map(from_json))),
        Json::Object(members) => Value::Table(
            members
                .into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect(),
        ),
    }
}

/// Convert a [`Value`] into JSON with default [`Limits`].
///
/// # Errors
///
/// - [`Error::CyclicStructure`] if a table contains itself
/// - [`Error::Unrepresentable`] for NaN or infinite floats, or for two keys of
///   one table that render to the same member name
/// - [`Error::DepthLimitExceeded`] if tables nest deeper than the limit
pub fn to_json(value: &Value) -> Result<Json> {
    to_json_with(value, &Limits::default())
}

/// Convert a [`Value`] into JSON with explicit limits.
pub fn to_json_with(value: &Value, limits: &Limits) -> Result<Json> {
    let mut exporter = Exporter {
        limits,
        path: HashSet::new(),
        tables: 0,
    };
    let json = exporter.value(value, 0)?;
    tracing::trace!(tables = exporter.tables, "exported value to json");
    Ok(json)
}

/// Serialize a table to a JSON string.
pub fn to_json_string(table: &Table) -> Result<String> {
    let json = to_json(&Value::Table(table.clone()))?;
    serde_json::to_string(&json).map_err(|e| Error::Unrepresentable(e.to_string()))
}

/// Parse a JSON string into a value.
pub fn from_json_str(s: &str) -> Result<Value> {
    let json: Json =
        serde_json::from_str(s).map_err(|e| Error::Unrepresentable(e.to_string()))?;
    tracing::trace!(bytes = s.len(), "parsed json document");
    Ok(from_json(json))
}

struct Exporter<'a> {
    limits: &'a Limits,
    /// Tables on the current path from the root. Revisiting one means a cycle;
    /// shared sub-tables off the path are fine and are written out twice.
    path: HashSet<TableId>,
    tables: usize,
}

impl Exporter<'_> {
    fn value(&mut self, value: &Value, depth: usize) -> Result<Json> {
        match value {
            Value::Nil => Ok(Json::Null),
            Value::Bool(b) => Ok(Json::Bool(*b)),
            Value::Int(i) => Ok(Json::Number((*i).into())),
            Value::Float(x) => Number::from_f64(*x)
                .map(Json::Number)
                .ok_or_else(|| Error::Unrepresentable(format!("non-finite number {}", x))),
            Value::Str(s) => Ok(Json::String(s.clone())),
            Value::Table(t) => self.table(t, depth),
        }
    }

    fn table(&mut self, table: &Table, depth: usize) -> Result<Json> {
        self.limits.check_depth(depth)?;
        if !self.path.insert(table.id()) {
            return Err(Error::CyclicStructure);
        }
        self.tables += 1;

        let entries = table.entries();
        let json = if is_array(table) {
            let mut items = Vec::with_capacity(entries.len());
            for (_, value) in &entries {
                items.push(self.value(value, depth + 1)?);
            }
            Json::Array(items)
        } else {
            let mut members = Map::new();
            for (key, value) in &entries {
                let member = self.value(value, depth + 1)?;
                if members.insert(key.to_string(), member).is_some() {
                    return Err(Error::Unrepresentable(format!("duplicate key {}", key)));
                }
            }
            Json::Object(members)
        };

        self.path.remove(&table.id());
        Ok(json)
    }
}
