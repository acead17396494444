//! Reconciling a table against a template.
//!
//! Reconciliation fills the gaps of an existing table from a template without
//! overwriting anything the table already has.
//!
//! # Algorithm
//!
//! 1. Queue the `(original, template)` pair
//! 2. For each queued pair, walk the template's entries:
//!    - key missing from the original: insert a deep copy of the template value
//!    - both sides hold a table: queue that pair one level deeper
//!    - otherwise: keep the original value
//! 3. Skip pairs that were already reconciled, so cyclic templates terminate
//!
//! Template tables are always deep-copied on insertion. The original never
//! ends up sharing a table with the template.

use crate::{copy::Cloner, error::Result, Limits, Table, TableId, Value};
use std::collections::{HashSet, VecDeque};

/// Reconcile `original` against `template` with default [`Limits`].
///
/// `original` is modified in place and returned.
///
/// # Errors
///
/// [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded) if either
/// graph nests deeper than the default limit. Entries filled before the limit
/// was hit stay in place.
pub fn reconcile(original: &Table, template: &Table) -> Result<Table> {
    reconcile_with(original, template, &Limits::default())
}

/// Reconcile `original` against `template` with explicit limits.
pub fn reconcile_with(original: &Table, template: &Table, limits: &Limits) -> Result<Table> {
    let mut cloner = Cloner::new(limits);
    let mut reconciled: HashSet<(TableId, TableId)> = HashSet::new();
    let mut pending = VecDeque::from([(original.clone(), template.clone(), 0usize)]);
    let mut inserted = 0usize;

    while let Some((target, source, depth)) = pending.pop_front() {
        if !reconciled.insert((target.id(), source.id())) {
            continue;
        }

        for (key, template_value) in source.entries() {
            match (target.get(&key), template_value) {
                (None, template_value) => {
                    let value = cloner.value(&template_value, depth + 1)?;
                    target.insert(key, value);
                    inserted += 1;
                }
                (Some(Value::Table(existing)), Value::Table(nested)) => {
                    limits.check_depth(depth + 1)?;
                    pending.push_back((existing, nested, depth + 1));
                }
                _ => {}
            }
        }

        // Fill inserted copies now; a later pair may descend into them.
        cloner.drain()?;
    }

    tracing::trace!(
        inserted,
        pairs = reconciled.len(),
        copied = cloner.cloned(),
        "reconcile complete"
    );
    Ok(original.clone())
}
