//! Handle correlation between two snapshots.

use crate::model::{TaskHandle, TaskRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How `before` records are looked up in `after`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrategy {
    /// Scan `after` for every `before` record, O(n·m)
    Linear,
    /// Index `after` by handle first
    Indexed,
    /// `Indexed` once `n * m` exceeds the threshold, `Linear` below it
    Auto { index_threshold: usize },
}

impl Default for CorrelationStrategy {
    fn default() -> Self {
        CorrelationStrategy::Auto {
            index_threshold: 4096,
        }
    }
}

impl CorrelationStrategy {
    fn use_index(&self, before_len: usize, after_len: usize) -> bool {
        match *self {
            CorrelationStrategy::Linear => false,
            CorrelationStrategy::Indexed => true,
            CorrelationStrategy::Auto { index_threshold } => {
                before_len.saturating_mul(after_len) > index_threshold
            }
        }
    }
}

/// Index pairs produced by correlation
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Pairing {
    /// `(before_idx, after_idx)` in `before` order
    pub matched: Vec<(usize, usize)>,
    /// `before` indices in `before` order
    pub deleted: Vec<usize>,
    /// `after` indices in `after` order
    pub created: Vec<usize>,
    pub reused: Vec<TaskHandle>,
}

/// Pair records by handle
///
/// A handle match whose runtime went backwards is a recycled handle, not a
/// continuation: the `before` record is deleted and the `after` record is
/// left for the created pass.
pub(crate) fn correlate(
    before: &[TaskRecord],
    after: &[TaskRecord],
    strategy: CorrelationStrategy,
) -> Pairing {
    let index: Option<HashMap<TaskHandle, usize>> = strategy
        .use_index(before.len(), after.len())
        .then(|| {
            after
                .iter()
                .enumerate()
                .map(|(i, r)| (r.handle, i))
                .collect()
        });

    let mut consumed = vec![false; after.len()];
    let mut pairing = Pairing::default();

    for (bi, b) in before.iter().enumerate() {
        let found = match &index {
            Some(map) => map.get(&b.handle).copied().filter(|&ai| !consumed[ai]),
            None => after
                .iter()
                .enumerate()
                .position(|(ai, a)| !consumed[ai] && a.handle == b.handle),
        };

        match found {
            Some(ai) if after[ai].cumulative_runtime >= b.cumulative_runtime => {
                consumed[ai] = true;
                pairing.matched.push((bi, ai));
            }
            Some(_) => {
                pairing.reused.push(b.handle);
                pairing.deleted.push(bi);
            }
            None => pairing.deleted.push(bi),
        }
    }

    pairing.created = consumed
        .iter()
        .enumerate()
        .filter_map(|(ai, &used)| (!used).then_some(ai))
        .collect();

    pairing
}
