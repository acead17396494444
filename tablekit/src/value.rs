//! Values stored in tables, and structural equality.

use crate::{Key, Table, TableId};
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// A value stored in a [`Table`].
///
/// Scalars are held by value. `Table` holds a handle, so nested tables are
/// shared until [`deep_copy`](crate::deep_copy) separates them.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value. Never stored in a table.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Table(Table),
}

impl Value {
    /// Name of this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_eq_float(*a, *b)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => deep_equal(a, b),
            _ => false,
        }
    }
}

/// Exact comparison of an integer with a float. Widening the integer would
/// round above 2^53 and equate neighbouring integers with one float.
fn int_eq_float(i: i64, x: f64) -> bool {
    // i64::MIN is exactly representable; i64::MAX + 1 is the first float above range.
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (LOWER..UPPER).contains(&x) && x as i64 == i
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Table(t) => write!(f, "{}", t),
        }
    }
}

/// Structural equality of two tables.
///
/// Both graphs are walked in lockstep with an explicit queue. A pair of tables
/// already under comparison is assumed equal, so cyclic graphs with the same
/// shape compare equal and the walk always terminates.
pub fn deep_equal(a: &Table, b: &Table) -> bool {
    let mut assumed: HashSet<(TableId, TableId)> = HashSet::new();
    let mut queue = VecDeque::from([(a.clone(), b.clone())]);

    while let Some((left, right)) = queue.pop_front() {
        if left.ptr_eq(&right) || !assumed.insert((left.id(), right.id())) {
            continue;
        }

        let same = left.with_entries(|l| {
            right.with_entries(|r| {
                if l.len() != r.len() {
                    return false;
                }
                for ((lk, lv), (rk, rv)) in l.iter().zip(r.iter()) {
                    if lk != rk {
                        return false;
                    }
                    match (lv, rv) {
                        (Value::Table(lt), Value::Table(rt)) => {
                            queue.push_back((lt.clone(), rt.clone()))
                        }
                        _ if lv != rv => return false,
                        _ => {}
                    }
                }
                true
            })
        });

        if !same {
            return false;
        }
    }

    true
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
