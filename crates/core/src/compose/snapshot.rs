//! Stacking order captured before a cluster is touched.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::scene::SceneGraph;

/// Original stacking index of every cluster member.
///
/// Stacking indices are expected to be distinct. Equal indices keep cluster
/// order in [`target_order`](Self::target_order), but the restored order
/// between such members is not meaningful.
#[derive(Debug, Clone)]
pub struct ZOrderSnapshot<N> {
    order: Vec<(N, usize)>,
    by_node: FxHashMap<N, usize>,
}

impl<N: Copy + Eq + Hash + Debug> ZOrderSnapshot<N> {
    /// Reads the current stacking index of each member. A failed read falls
    /// back to the member's position in `members`.
    pub fn capture<S>(scene: &S, members: &[N]) -> Self
    where
        S: SceneGraph<Node = N>,
    {
        let order: Vec<(N, usize)> = members
            .iter()
            .enumerate()
            .map(|(pos, &node)| {
                let index = scene.stacking_index(node).unwrap_or_else(|e| {
                    warn!(?node, error = %e, "stacking index unavailable for snapshot");
                    pos
                });
                (node, index)
            })
            .collect();
        let by_node = order.iter().copied().collect();
        Self { order, by_node }
    }

    pub fn from_pairs(order: Vec<(N, usize)>) -> Self {
        let by_node = order.iter().copied().collect();
        Self { order, by_node }
    }

    /// Members with their captured index, in cluster order.
    pub fn entries(&self) -> &[(N, usize)] {
        &self.order
    }

    pub fn index_of(&self, node: N) -> Option<usize> {
        self.by_node.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members sorted front to back by captured index.
    pub fn target_order(&self) -> Vec<N> {
        let mut sorted = self.order.clone();
        sorted.sort_by_key(|&(_, index)| index);
        sorted.into_iter().map(|(node, _)| node).collect()
    }

    /// True when no two members share a stacking index.
    pub fn is_strict(&self) -> bool {
        let mut indices: Vec<usize> = self.order.iter().map(|&(_, i)| i).collect();
        indices.sort_unstable();
        indices.windows(2).all(|w| w[0] != w[1])
    }
}
