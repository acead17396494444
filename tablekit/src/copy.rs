//! Copying and merging tables.
//!
//! # Deep copy algorithm
//!
//! 1. Create an empty clone for the root and remember `source id -> clone`
//! 2. Queue `(source, clone, depth)` pairs, breadth first
//! 3. For each queued pair, copy every entry; a nested table is replaced by
//!    its remembered clone, or gets a fresh clone that is queued in turn
//! 4. Stop when the queue is empty
//!
//! Because every source table maps to exactly one clone, cycles and shared
//! sub-tables are reproduced in the copy instead of being walked forever.

use crate::{error::Result, is_array, Error, Limits, Shape, Table, TableId, Value};
use std::collections::{HashMap, VecDeque};

/// Copies table graphs, one clone per source table.
pub(crate) struct Cloner<'a> {
    limits: &'a Limits,
    clones: HashMap<TableId, Table>,
    pending: VecDeque<(Table, Table, usize)>,
}

impl<'a> Cloner<'a> {
    pub(crate) fn new(limits: &'a Limits) -> Self {
        Self {
            limits,
            clones: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// The clone of `source`, which sits at `depth`. Contents are filled in by
    /// [`Cloner::drain`].
    pub(crate) fn table(&mut self, source: &Table, depth: usize) -> Result<Table> {
        if let Some(existing) = self.clones.get(&source.id()) {
            return Ok(existing.clone());
        }

        self.limits.check_depth(depth)?;

        let copy = Table::new();
        self.clones.insert(source.id(), copy.clone());
        self.pending.push_back((source.clone(), copy.clone(), depth));
        Ok(copy)
    }

    /// Copy a value. Scalars are cloned, tables are mapped to their clone.
    pub(crate) fn value(&mut self, value: &Value, depth: usize) -> Result<Value> {
        match value {
            Value::Table(source) => Ok(Value::Table(self.table(source, depth)?)),
            scalar => Ok(scalar.clone()),
        }
    }

    /// Fill every clone handed out so far.
    pub(crate) fn drain(&mut self) -> Result<()> {
        while let Some((source, copy, depth)) = self.pending.pop_front() {
            for (key, value) in source.entries() {
                let value = self.value(&value, depth + 1)?;
                copy.insert(key, value);
            }
        }
        Ok(())
    }

    /// Number of tables cloned.
    pub(crate) fn cloned(&self) -> usize {
        self.clones.len()
    }
}

/// Deep copy a table with default [`Limits`].
///
/// The copy is structurally equal to `table` but shares no table with it.
/// Cycles and shared sub-tables keep their topology in the copy.
///
/// # Errors
///
/// [`Error::DepthLimitExceeded`] if the graph nests deeper than the default
/// limit.
pub fn deep_copy(table: &Table) -> Result<Table> {
    deep_copy_with(table, &Limits::default())
}

/// Deep copy a table with explicit limits.
pub fn deep_copy_with(table: &Table, limits: &Limits) -> Result<Table> {
    let mut cloner = Cloner::new(limits);
    let copy = cloner.table(table, 0)?;
    cloner.drain()?;

    tracing::trace!(tables = cloner.cloned(), "deep copy complete");
    Ok(copy)
}

/// Merge two dictionaries into a new table. On duplicate keys, `second` wins.
///
/// Shallow: nested tables are shared with the inputs. Neither input is
/// modified.
pub fn merge_dictionary(first: &Table, second: &Table) -> Table {
    first.entries().into_iter().chain(second.entries()).collect()
}

/// Concatenate two arrays into a new array keyed `1..=n`.
///
/// Elements of `first` keep their positions; elements of `second` follow
/// them. Neither input is modified.
///
/// # Errors
///
/// [`Error::InvalidShape`] if either input is dictionary-shaped.
pub fn merge_array(first: &Table, second: &Table) -> Result<Table> {
    if !is_array(first) || !is_array(second) {
        return Err(Error::InvalidShape {
            operation: "merge_array",
            expected: Shape::Array,
        });
    }

    Ok(Table::array(
        first.value_list().into_iter().chain(second.value_list()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deep_equal, Key};

    fn nested() -> Table {
        let inner: Table = [("A", 1), ("B", 2)].into_iter().collect();
        [("SomethingInside", inner)].into_iter().collect()
    }

    #[test]
    fn deep_copy_equal_but_independent() {
        let source = nested();
        let copy = deep_copy(&source).unwrap();

        assert!(deep_equal(&source, &copy));
        assert!(!source.ptr_eq(&copy));

        let source_inner = source.get("SomethingInside").unwrap();
        let copy_inner = copy.get("SomethingInside").unwrap();
        assert!(!source_inner
            .as_table()
            .unwrap()
            .ptr_eq(copy_inner.as_table().unwrap()));

        // Mutating the copy leaves the source alone.
        copy_inner.as_table().unwrap().insert("A", 100);
        assert_eq!(
            source_inner.as_table().unwrap().get("A"),
            Some(Value::Int(1))
        );
    }

    #[test]
    fn deep_copy_empty() {
        let copy = deep_copy(&Table::new()).unwrap();
        assert!(copy.is_empty());
    }

    #[test]
    fn deep_copy_self_cycle() {
        let source = Table::new();
        source.insert("name", "root");
        source.insert("me", source.clone());

        let copy = deep_copy(&source).unwrap();
        let me = copy.get("me").unwrap();
        let me = me.as_table().unwrap();

        assert!(me.ptr_eq(&copy));
        assert!(!me.ptr_eq(&source));
        assert_eq!(copy.get("name"), Some(Value::from("root")));
    }

    #[test]
    fn deep_copy_mutual_cycle() {
        let a = Table::new();
        let b = Table::new();
        a.insert("peer", b.clone());
        b.insert("peer", a.clone());

        let copy_a = deep_copy(&a).unwrap();
        let copy_b = copy_a.get("peer").unwrap().as_table().unwrap().clone();
        let back = copy_b.get("peer").unwrap().as_table().unwrap().clone();

        assert!(back.ptr_eq(&copy_a));
        assert!(!copy_b.ptr_eq(&b));
        assert!(deep_equal(&a, &copy_a));
    }

    #[test]
    fn deep_copy_preserves_sharing() {
        let shared = Table::array([1, 2, 3]);
        let source: Table = [("left", shared.clone()), ("right", shared)]
            .into_iter()
            .collect();

        let copy = deep_copy(&source).unwrap();
        let left = copy.get("left").unwrap();
        let right = copy.get("right").unwrap();

        assert!(left.as_table().unwrap().ptr_eq(right.as_table().unwrap()));
    }

    #[test]
    fn deep_copy_depth_limit() {
        let root = Table::new();
        let mut cursor = root.clone();
        for _ in 0..5 {
            let next = Table::new();
            cursor.insert("child", next.clone());
            cursor = next;
        }

        let limits = Limits::new().with_max_depth(3);
        assert_eq!(
            deep_copy_with(&root, &limits),
            Err(Error::DepthLimitExceeded { limit: 3 })
        );
        assert!(deep_copy_with(&root, &Limits::new().with_max_depth(5)).is_ok());
    }

    #[test]
    fn deep_copy_very_deep_chain() {
        let root = Table::new();
        let mut cursor = root.clone();
        for i in 0..10_000 {
            let next = Table::new();
            cursor.insert("depth", i);
            cursor.insert("child", next.clone());
            cursor = next;
        }

        let copy = deep_copy_with(&root, &Limits::unbounded()).unwrap();
        assert_eq!(copy.get("depth"), Some(Value::Int(0)));

        // Break the chain iteratively so dropping does not recurse deeply.
        for table in [root, copy] {
            let mut cursor = Some(table);
            while let Some(current) = cursor.take() {
                cursor = current.remove("child").and_then(|v| v.as_table().cloned());
            }
        }
    }

    #[test]
    fn merge_dictionary_second_wins() {
        let first: Table = [("A", 1), ("B", 2)].into_iter().collect();
        let second: Table = [("B", 9), ("C", 3)].into_iter().collect();

        let merged = merge_dictionary(&first, &second);
        let expected: Table = [("A", 1), ("B", 9), ("C", 3)].into_iter().collect();
        assert_eq!(merged, expected);

        // Inputs untouched.
        assert_eq!(first.get("B"), Some(Value::Int(2)));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn merge_dictionary_is_shallow() {
        let inner = Table::new();
        let first: Table = [("inner", inner.clone())].into_iter().collect();

        let merged = merge_dictionary(&first, &Table::new());
        let merged_inner = merged.get("inner").unwrap();
        assert!(merged_inner.as_table().unwrap().ptr_eq(&inner));
    }

    #[test]
    fn merge_array_reindexes() {
        let merged = merge_array(&Table::array(["A", "B"]), &Table::array(["C", "D"])).unwrap();

        assert_eq!(
            merged.entries(),
            vec![
                (Key::Int(1), Value::from("A")),
                (Key::Int(2), Value::from("B")),
                (Key::Int(3), Value::from("C")),
                (Key::Int(4), Value::from("D")),
            ]
        );
    }

    #[test]
    fn merge_array_with_empty() {
        let a = Table::array(["x"]);
        assert_eq!(merge_array(&a, &Table::new()).unwrap(), a);
        assert_eq!(merge_array(&Table::new(), &a).unwrap(), a);
        assert!(merge_array(&Table::new(), &Table::new()).unwrap().is_empty());
    }

    #[test]
    fn merge_array_rejects_dictionaries() {
        let dict: Table = [("A", 1)].into_iter().collect();
        let expected = Err(Error::InvalidShape {
            operation: "merge_array",
            expected: Shape::Array,
        });

        assert_eq!(merge_array(&dict, &Table::array([1])), expected);
        assert_eq!(merge_array(&Table::array([1]), &dict), expected);
    }

    #[test]
    fn merge_array_same_input_twice() {
        let a = Table::array([1, 2]);
        let merged = merge_array(&a, &a).unwrap();
        assert_eq!(merged, Table::array([1, 2, 1, 2]));
        assert_eq!(a.len(), 2);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use crate::json::arbitrary::arb_json;
        use crate::{from_json, is_dictionary};
        use proptest::prelude::*;
        use std::collections::HashSet;

        /// Ids of every table reachable from `root`, root included.
        fn reachable(root: &Table) -> HashSet<TableId> {
            let mut seen = HashSet::from([root.id()]);
            let mut stack = vec![root.clone()];
            while let Some(table) = stack.pop() {
                for value in table.value_list() {
                    if let Value::Table(nested) = value {
                        if seen.insert(nested.id()) {
                            stack.push(nested);
                        }
                    }
                }
            }
            seen
        }

        proptest! {
            #[test]
            fn prop_deep_copy_equal(json in arb_json()) {
                if let Value::Table(source) = from_json(json) {
                    let copy = deep_copy(&source).unwrap();
                    prop_assert!(deep_equal(&source, &copy));
                    prop_assert!(!copy.ptr_eq(&source));
                }
            }

            #[test]
            fn prop_deep_copy_shares_nothing(json in arb_json()) {
                if let Value::Table(source) = from_json(json) {
                    let copy = deep_copy(&source).unwrap();
                    let original_tables = reachable(&source);
                    let copied_tables = reachable(&copy);

                    prop_assert_eq!(original_tables.len(), copied_tables.len());
                    prop_assert!(original_tables.is_disjoint(&copied_tables));
                }
            }

            #[test]
            fn prop_merge_array_length(
                a in proptest::collection::vec(any::<i64>(), 0..16),
                b in proptest::collection::vec(any::<i64>(), 0..16),
            ) {
                let merged = merge_array(&Table::array(a.clone()), &Table::array(b.clone())).unwrap();
                prop_assert_eq!(merged.len(), a.len() + b.len());
                prop_assert!(is_array(&merged));
                prop_assert!(!is_dictionary(&merged));

                let expected: Vec<Value> = a.into_iter().chain(b).map(Value::from).collect();
                prop_assert_eq!(merged.value_list(), expected);
            }
        }
    }
}
