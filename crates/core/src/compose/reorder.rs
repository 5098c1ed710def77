//! Restoring a target order with only a send-to-back primitive.
//!
//! The container's live member list is the only state. Members that appear in
//! the target are *ranked*; the engine looks at ranked members in their live
//! order and treats every adjacent pair `(y, x)` with `rank(x) < rank(y)` as
//! an inversion. An inversion is fixed by sending `y`, the member that belongs
//! further back, to the very back of the container. Passes run back to front
//! and repeat until one finds nothing to fix.
//!
//! Unranked members are never compared or moved, so they end up in front of
//! every ranked member that had to move.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::scene::SceneGraph;

/// What a restore did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderStats {
    /// Bubble passes run, including the final clean one.
    pub passes: usize,
    /// Successful send-to-back calls.
    pub moves: usize,
    /// Target members not found in the container.
    pub skipped: usize,
    /// Send-to-back calls the host rejected.
    pub failures: usize,
    /// The pass limit was hit and the order was finished by sending every
    /// ranked member to the back in target order.
    pub selection_finish: bool,
}

fn ranked_view<N>(current: &[N], rank: &FxHashMap<N, usize>) -> Vec<(N, usize)>
where
    N: Copy + Eq + Hash,
{
    current
        .iter()
        .filter_map(|&n| rank.get(&n).map(|&r| (n, r)))
        .collect()
}

/// Reorders `container` so that members listed in `target` appear in target
/// order.
///
/// Requires `target` to be a strict order: a member listed twice keeps its
/// first rank. Host failures are logged and skipped; the returned stats
/// report them.
pub fn restore_order<S>(scene: &mut S, container: S::Node, target: &[S::Node]) -> ReorderStats
where
    S: SceneGraph,
{
    let mut stats = ReorderStats::default();

    let mut rank: FxHashMap<S::Node, usize> = FxHashMap::default();
    for (i, &node) in target.iter().enumerate() {
        rank.entry(node).or_insert(i);
    }

    let mut current = match scene.children(container) {
        Ok(children) => children,
        Err(e) => {
            warn!(?container, error = %e, "cannot read container members, order left as is");
            return stats;
        }
    };

    let present: usize = current.iter().filter(|n| rank.contains_key(n)).count();
    stats.skipped = rank.len() - present;
    if stats.skipped > 0 {
        debug!(?container, skipped = stats.skipped, "target members missing from container");
    }

    let mut view = ranked_view(&current, &rank);
    let max_passes = view.len() + 1;

    loop {
        if stats.passes == max_passes {
            stats.selection_finish = true;
            finish_by_selection(scene, container, target, &rank, &mut stats);
            break;
        }
        stats.passes += 1;

        let mut inversions = 0usize;
        let moves_before = stats.moves;

        let mut i = view.len().saturating_sub(1);
        while i >= 1 {
            let mut j = i;
            while j >= 1 {
                if j < view.len() {
                    let (_, rank_x) = view[j];
                    let (y, rank_y) = view[j - 1];
                    if rank_x < rank_y {
                        inversions += 1;
                        match scene.send_to_back(y) {
                            Ok(()) => {
                                stats.moves += 1;
                                current = match scene.children(container) {
                                    Ok(children) => children,
                                    Err(e) => {
                                        warn!(?container, error = %e, "lost container while reordering");
                                        return stats;
                                    }
                                };
                                view = ranked_view(&current, &rank);
                            }
                            Err(e) => {
                                stats.failures += 1;
                                warn!(node = ?y, error = %e, "send to back failed");
                            }
                        }
                    }
                }
                j -= 1;
            }
            i -= 1;
        }

        if inversions == 0 {
            break;
        }
        if stats.moves == moves_before {
            // Every fix in this pass was rejected; further passes can't help.
            break;
        }
    }

    debug!(
        ?container,
        passes = stats.passes,
        moves = stats.moves,
        failures = stats.failures,
        "restored stacking order"
    );
    stats
}

fn finish_by_selection<S>(
    scene: &mut S,
    container: S::Node,
    target: &[S::Node],
    rank: &FxHashMap<S::Node, usize>,
    stats: &mut ReorderStats,
) where
    S: SceneGraph,
{
    warn!(?container, "bubble passes did not converge, sending members back in target order");
    let current = scene.children(container).unwrap_or_default();
    for (i, &node) in target.iter().enumerate() {
        if rank.get(&node) != Some(&i) || !current.contains(&node) {
            continue;
        }
        match scene.send_to_back(node) {
            Ok(()) => stats.moves += 1,
            Err(e) => {
                stats.failures += 1;
                warn!(?node, error = %e, "send to back failed");
            }
        }
    }
}

/// True when the ranked members of `current` already follow `target`.
pub fn is_in_target_order<N>(current: &[N], target: &[N]) -> bool
where
    N: Copy + Eq + Hash + Debug,
{
    let mut rank: FxHashMap<N, usize> = FxHashMap::default();
    for (i, &node) in target.iter().enumerate() {
        rank.entry(node).or_insert(i);
    }
    ranked_view(current, &rank)
        .windows(2)
        .all(|w| w[0].1 < w[1].1)
}
