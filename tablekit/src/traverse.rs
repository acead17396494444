//! Higher-order traversal.
//!
//! Predicates take one element and return `bool`. The `try_` variants accept
//! predicates returning `Result<bool, E>`; the first `Err` stops the walk and
//! is handed back to the caller exactly as the predicate produced it.
//!
//! Elements are snapshotted before the first predicate call, so a predicate
//! may freely read or modify the table being walked. Modifications are not
//! seen by the walk in progress.

use crate::{error::Result, is_array, Error, Shape, Table, Value};

/// Decompose a value into an array.
///
/// Strings yield one single-character string per `char`. Tables yield their
/// values in iteration order.
///
/// # Errors
///
/// [`Error::UnsupportedType`] for nil, booleans and numbers.
pub fn from(value: impl Into<Value>) -> Result<Table> {
    match value.into() {
        Value::Str(s) => Ok(Table::array(s.chars())),
        Value::Table(t) => Ok(Table::array(t.value_list())),
        other => Err(Error::UnsupportedType {
            operation: "from",
            type_name: other.type_name(),
        }),
    }
}

/// A new array holding, in order, the elements of `array` accepted by
/// `predicate`.
///
/// # Errors
///
/// [`Error::InvalidShape`] if `array` is dictionary-shaped.
pub fn filter<F>(array: &Table, mut predicate: F) -> Result<Table>
where
    F: FnMut(&Value) -> bool,
{
    try_filter(array, |value| Ok::<_, Error>(predicate(value)))
}

/// Fallible [`filter`].
pub fn try_filter<F, E>(array: &Table, mut predicate: F) -> std::result::Result<Table, E>
where
    F: FnMut(&Value) -> std::result::Result<bool, E>,
    E: From<Error>,
{
    if !is_array(array) {
        return Err(Error::InvalidShape {
            operation: "filter",
            expected: Shape::Array,
        }
        .into());
    }

    let mut kept = Vec::new();
    for value in array.value_list() {
        if predicate(&value)? {
            kept.push(value);
        }
    }
    Ok(Table::array(kept))
}

/// Whether `predicate` accepts at least one value of `table`.
///
/// Stops at the first accepted value. False for the empty table.
pub fn some<F>(table: &Table, predicate: F) -> bool
where
    F: FnMut(&Value) -> bool,
{
    table.value_list().iter().any(predicate)
}

/// Fallible [`some`].
pub fn try_some<F, E>(table: &Table, mut predicate: F) -> std::result::Result<bool, E>
where
    F: FnMut(&Value) -> std::result::Result<bool, E>,
{
    for value in table.value_list() {
        if predicate(&value)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether `predicate` accepts every value of `table`.
///
/// Stops at the first rejected value. True for the empty table.
pub fn every<F>(table: &Table, predicate: F) -> bool
where
    F: FnMut(&Value) -> bool,
{
    table.value_list().iter().all(predicate)
}

/// Fallible [`every`].
pub fn try_every<F, E>(table: &Table, mut predicate: F) -> std::result::Result<bool, E>
where
    F: FnMut(&Value) -> std::result::Result<bool, E>,
{
    for value in table.value_list() {
        if !predicate(&value)? {
            return Ok(false);
        }
    }
    Ok(true)
}
