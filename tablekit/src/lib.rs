//! # TableKit
//!
//! Structural utilities for heterogeneous key/value tables.
//!
//! A [`Table`] maps [`Key`]s (booleans, integers, strings) to [`Value`]s,
//! which may themselves be tables. A table whose keys are exactly `1..=n`
//! behaves as an array; any other table is a dictionary. There is no type tag:
//! the shape is inferred from the keys every time it is asked for.
//!
//! ## Design Principles
//!
//! - **No IO**: every operation is a pure computation over its arguments
//! - **Stateless**: free functions, no instances, no caches
//! - **Explicit mutation**: only [`reconcile`] modifies its input; everything
//!   else returns a new table or a plain answer
//! - **Cycle safe**: deep operations track table identity and walk an explicit
//!   queue, so self-referential tables terminate and never overflow the stack
//!
//! ## Operations
//!
//! ### Classification
//!
//! [`is_array`], [`is_dictionary`], [`is_empty`], [`is_flat`], [`shape`].
//! The empty table is array-shaped, and `is_dictionary` is always the
//! negation of `is_array`.
//!
//! ### Copy, merge and reconcile
//!
//! - [`deep_copy`] - structural clone that preserves cycles and sharing
//! - [`merge_dictionary`] - shallow merge, second argument wins
//! - [`merge_array`] - concatenation, reindexed from 1
//! - [`reconcile`] - fill missing keys from a template, in place
//!
//! ### Introspection
//!
//! [`keys`], [`values`], [`has_key`], [`has_value`], [`to_string`].
//!
//! ### Traversal
//!
//! [`from`], [`filter`], [`some`], [`every`] and the fallible
//! [`try_filter`], [`try_some`], [`try_every`].
//!
//! ## Quick Start
//!
//! ```rust
//! use tablekit::{deep_copy, filter, is_array, merge_array, reconcile, Table, Value};
//!
//! // Arrays are tables keyed 1..=n
//! let numbers = Table::array([1, 2, 3, 4, 5]);
//! assert!(is_array(&numbers));
//!
//! let evens = filter(&numbers, |v| v.as_int().is_some_and(|i| i % 2 == 0)).unwrap();
//! assert_eq!(evens, Table::array([2, 4]));
//!
//! let letters = merge_array(&Table::array(["A", "B"]), &Table::array(["C", "D"])).unwrap();
//! assert_eq!(letters.get(4), Some(Value::from("D")));
//!
//! // Fill missing settings from defaults
//! let defaults: Table = [("volume", 10), ("brightness", 50)].into_iter().collect();
//! let settings: Table = [("volume", 3)].into_iter().collect();
//! reconcile(&settings, &defaults).unwrap();
//! assert_eq!(settings.get("volume"), Some(Value::Int(3)));
//! assert_eq!(settings.get("brightness"), Some(Value::Int(50)));
//!
//! // Deep copies survive cycles
//! let node = Table::new();
//! node.insert("next", node.clone());
//! let copy = deep_copy(&node).unwrap();
//! assert!(!copy.ptr_eq(&node));
//! node.clear();
//! ```
//!
//! ## JSON
//!
//! The [`json`] module converts between tables and `serde_json` values.
//!
//! ## Logging
//!
//! Deep operations emit `tracing` events at trace and debug level. The crate
//! never installs a subscriber.

pub mod classify;
pub mod config;
pub mod copy;
pub mod error;
pub mod introspect;
pub mod json;
pub mod key;
pub mod reconcile;
pub mod table;
pub mod traverse;
pub mod value;

// Re-export main types and operations at crate root
pub use classify::{is_array, is_dictionary, is_empty, is_flat, shape, Shape};
pub use config::{Limits, DEFAULT_MAX_DEPTH};
pub use copy::{deep_copy, deep_copy_with, merge_array, merge_dictionary};
pub use error::Error;
pub use introspect::{has_key, has_value, keys, to_string, values};
pub use json::{from_json, from_json_str, to_json, to_json_string, to_json_with};
pub use key::Key;
pub use reconcile::{reconcile, reconcile_with};
pub use table::{Table, TableId};
pub use traverse::{every, filter, from, some, try_every, try_filter, try_some};
pub use value::{deep_equal, Value};
