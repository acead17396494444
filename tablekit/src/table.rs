//! The shared table handle.
//!
//! A [`Table`] is a reference-counted, interiorly mutable map from [`Key`] to
//! [`Value`]. Cloning a `Table` clones the handle, not the contents: both
//! handles observe the same entries, which is what lets a table contain
//! itself. Use [`deep_copy`](crate::deep_copy) for an independent copy.
//!
//! Tables never store [`Value::Nil`]; inserting nil removes the key.
//!
//! Tables that form cycles keep each other alive. Call [`Table::clear`] on a
//! member of the cycle to release it.

use crate::{Key, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub(crate) type Entries = BTreeMap<Key, Value>;

/// Identity of a table allocation. Two handles share an id iff they alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(usize);

/// A heterogeneous key/value container.
#[derive(Clone, Default)]
pub struct Table(Rc<RefCell<Entries>>);

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array-shaped table from a sequence, keyed `1..=n`.
    ///
    /// Nil items are skipped, so the result stays contiguous.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut entries = Entries::new();
        let values = items
            .into_iter()
            .map(Into::<Value>::into)
            .filter(|v| !v.is_nil());
        for (index, value) in (1i64..).zip(values) {
            entries.insert(Key::Int(index), value);
        }
        Self(Rc::new(RefCell::new(entries)))
    }

    /// Identity of the underlying allocation.
    pub fn id(&self) -> TableId {
        TableId(Rc::as_ptr(&self.0) as usize)
    }

    /// Whether both handles point at the same table.
    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.0.borrow().get(&key.into()).cloned()
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.0.borrow().contains_key(&key.into())
    }

    /// Store `value` under `key`, returning the previous value.
    ///
    /// Storing [`Value::Nil`] removes the key.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        match value.into() {
            Value::Nil => self.0.borrow_mut().remove(&key),
            value => self.0.borrow_mut().insert(key, value),
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&self, key: impl Into<Key>) -> Option<Value> {
        self.0.borrow_mut().remove(&key.into())
    }

    /// Append `value` after the contiguous run of integer keys starting at 1.
    ///
    /// On an array-shaped table this is position `len + 1`. On a table with a
    /// gap, such as `{1: a, 3: c}`, the value fills the first missing index
    /// (here 2) and never replaces an existing entry.
    pub fn push(&self, value: impl Into<Value>) {
        let next = self.with_entries(|entries| {
            let mut next = 1i64;
            for key in entries.range(Key::Int(1)..).map(|(key, _)| key) {
                if *key != Key::Int(next) {
                    break;
                }
                next += 1;
            }
            next
        });
        self.insert(next, value);
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Snapshot of all entries in iteration order.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Snapshot of all values in iteration order.
    pub(crate) fn value_list(&self) -> Vec<Value> {
        self.0.borrow().values().cloned().collect()
    }

    /// Borrow the entries for a read-only pass.
    ///
    /// The closure must not call back into user code that could mutate this
    /// table; take a snapshot with [`Table::entries`] for that.
    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(&Entries) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        crate::deep_equal(self, other)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

// Only one level is rendered so cyclic tables print safely.
impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {}", crate::to_string(self))
    }
}

impl<K, V> FromIterator<(K, V)> for Table
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let table = Table::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
