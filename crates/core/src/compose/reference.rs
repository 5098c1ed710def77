//! Mask/anchor selection within a cluster.

use std::fmt::Debug;
use std::hash::Hash;

use crate::params::ReferencePolicy;

use super::snapshot::ZOrderSnapshot;

/// Stacking direction: a lower index is closer to the viewer.
pub const FRONT_IS_LOWER_INDEX: bool = true;

/// Whether stacking index `a` is strictly in front of `b`.
#[inline]
pub fn is_in_front(a: usize, b: usize) -> bool {
    if FRONT_IS_LOWER_INDEX { a < b } else { a > b }
}

/// Picks the frontmost or backmost member of the snapshot.
///
/// Ties keep the first member in cluster order. Returns `None` for an empty
/// snapshot.
pub fn select_reference<N>(snapshot: &ZOrderSnapshot<N>, policy: ReferencePolicy) -> Option<N>
where
    N: Copy + Eq + Hash + Debug,
{
    let mut best: Option<(N, usize)> = None;
    for &(node, index) in snapshot.entries() {
        let better = match best {
            None => true,
            Some((_, best_index)) => match policy {
                ReferencePolicy::Frontmost => is_in_front(index, best_index),
                ReferencePolicy::Backmost => is_in_front(best_index, index),
            },
        };
        if better {
            best = Some((node, index));
        }
    }
    best.map(|(node, _)| node)
}
