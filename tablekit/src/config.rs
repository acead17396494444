//! Traversal limits.
//!
//! Deep operations walk tables with an explicit queue, so they never grow the
//! call stack. [`Limits`] additionally caps how deeply nested a graph may be
//! before the walk gives up with [`Error::DepthLimitExceeded`](crate::Error).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied by deep traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    /// Deepest nesting level a traversal will enter. The root table is at
    /// depth 0, its direct children at depth 1.
    pub max_depth: usize,
}

impl Limits {
    /// Limits with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// No depth limit.
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that `depth` is within the limit.
    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            tracing::debug!(depth, limit = self.max_depth, "nesting limit exceeded");
            return Err(crate::Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
