//! Structural classification.
//!
//! Tables carry no type tag. Whether a table is an array or a dictionary is
//! derived from its current key set on every call and never cached, since
//! tables are mutable.
//!
//! A table is array-shaped iff its keys are exactly the integers `1..=n` where
//! `n` is its length. The empty table is array-shaped. Every other table is
//! dictionary-shaped, so [`is_array`] and [`is_dictionary`] are exact
//! complements.

use crate::{Key, Table, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural shape of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Array,
    Dictionary,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Array => write!(f, "array-shaped"),
            Shape::Dictionary => write!(f, "dictionary-shaped"),
        }
    }
}

/// Classify a table.
pub fn shape(table: &Table) -> Shape {
    if is_array(table) {
        Shape::Array
    } else {
        Shape::Dictionary
    }
}

/// Whether the keys of `table` are exactly `1..=len`.
pub fn is_array(table: &Table) -> bool {
    // Keys iterate in order and integers sort ascending, so an array's keys
    // appear as 1, 2, 3, ... with nothing before or after.
    table.with_entries(|entries| {
        entries
            .keys()
            .zip(1i64..)
            .all(|(key, expected)| *key == Key::Int(expected))
    })
}

/// Whether `table` is not array-shaped. The empty table is not a dictionary.
pub fn is_dictionary(table: &Table) -> bool {
    !is_array(table)
}

/// Whether `table` has no entries, regardless of shape.
pub fn is_empty(table: &Table) -> bool {
    table.is_empty()
}

/// Whether no value of `table` is itself a table. Only one level is checked.
pub fn is_flat(table: &Table) -> bool {
    table.with_entries(|entries| !entries.values().any(Value::is_table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays() {
        assert!(is_array(&Table::array(["A", "B", "C", "D"])));
        assert!(!is_dictionary(&Table::array(["A", "B", "C", "D"])));
        assert_eq!(shape(&Table::array([1])), Shape::Array);
    }

    #[test]
    fn dictionaries() {
        let dict: Table = [("NotAnArray", true)].into_iter().collect();
        assert!(!is_array(&dict));
        assert!(is_dictionary(&dict));
        assert_eq!(shape(&dict), Shape::Dictionary);
    }

    #[test]
    fn empty_table_is_array_only() {
        let empty = Table::new();
        assert!(is_array(&empty));
        assert!(!is_dictionary(&empty));
        assert!(is_empty(&empty));
    }

    #[test]
    fn gaps_and_bad_indices_are_dictionaries() {
        let gap: Table = [(1, "a"), (3, "c")].into_iter().collect();
        assert!(is_dictionary(&gap));

        let zero_based: Table = [(0, "a"), (1, "b")].into_iter().collect();
        assert!(is_dictionary(&zero_based));

        let negative: Table = [(-1, "a")].into_iter().collect();
        assert!(is_dictionary(&negative));

        let offset: Table = [(2, "a"), (3, "b")].into_iter().collect();
        assert!(is_dictionary(&offset));
    }

    #[test]
    fn mixed_keys_are_dictionaries() {
        let mixed = Table::array(["a", "b"]);
        mixed.insert("extra", 1);
        assert!(is_dictionary(&mixed));

        let with_bool = Table::array(["a"]);
        with_bool.insert(true, 1);
        assert!(is_dictionary(&with_bool));
    }

    #[test]
    fn classification_follows_mutation() {
        let t = Table::array(["a", "b", "c"]);
        assert!(is_array(&t));

        t.remove(2);
        assert!(is_dictionary(&t));

        t.insert(2, "b");
        assert!(is_array(&t));
    }

    #[test]
    fn emptiness() {
        assert!(is_empty(&Table::new()));
        assert!(!is_empty(&Table::array(["x"])));
        let dict: Table = [("k", 1)].into_iter().collect();
        assert!(!is_empty(&dict));
    }

    #[test]
    fn flatness_is_one_level() {
        assert!(is_flat(&Table::array(["a", "b"])));
        assert!(is_flat(&Table::new()));

        let deep = Table::array([Value::from("a"), Value::from(Table::array(["b"]))]);
        assert!(!is_flat(&deep));

        // A nested table counts even when it is itself flat.
        let leaf = Table::array(["b"]);
        let outer: Table = [("x", Value::from(1)), ("y", Value::from(leaf.clone()))]
            .into_iter()
            .collect();
        assert!(is_flat(&leaf));
        assert!(!is_flat(&outer));
    }

    #[test]
    fn shape_display() {
        assert_eq!(Shape::Array.to_string(), "array-shaped");
        assert_eq!(Shape::Dictionary.to_string(), "dictionary-shaped");
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::collection::btree_set;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        fn arb_key() -> impl Strategy<Value = Key> {
            prop_oneof![
                4 => (-2i64..10).prop_map(Key::Int),
                1 => any::<bool>().prop_map(Key::Bool),
                1 => "[a-c0-9]{1,2}".prop_map(Key::Str),
            ]
        }

        /// Key sets that are often, but not always, exactly `1..=n`.
        fn arb_key_set() -> impl Strategy<Value = BTreeSet<Key>> {
            (0i64..8, btree_set(arb_key(), 0..4)).prop_map(|(n, extra)| {
                let mut keys: BTreeSet<Key> = (1..=n).map(Key::Int).collect();
                keys.extend(extra);
                keys
            })
        }

        proptest! {
            #[test]
            fn prop_array_and_dictionary_are_complements(keys in arb_key_set()) {
                let table: Table = keys.into_iter().map(|k| (k, 1)).collect();
                prop_assert_ne!(is_array(&table), is_dictionary(&table));
            }

            #[test]
            fn prop_array_iff_keys_are_one_to_len(keys in arb_key_set()) {
                let expected: Vec<Key> = (1..=keys.len() as i64).map(Key::Int).collect();
                let contiguous = keys.iter().cloned().collect::<Vec<_>>() == expected;

                let table: Table = keys.into_iter().map(|k| (k, true)).collect();
                prop_assert_eq!(is_array(&table), contiguous);
                prop_assert_eq!(shape(&table) == Shape::Array, contiguous);
            }
        }
    }
}
