//! Connected-component extraction over an implicit adjacency graph.

use super::index::{GeometryEntry, GeometryIndex};

/// One connected component, members in depth-first visitation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster<N> {
    members: Vec<N>,
    positions: Vec<usize>,
}

impl<N: Copy + PartialEq> Cluster<N> {
    pub fn new(members: Vec<N>, positions: Vec<usize>) -> Self {
        debug_assert_eq!(members.len(), positions.len());
        Self { members, positions }
    }

    pub fn members(&self) -> &[N] {
        &self.members
    }

    /// Positions of the members in the geometry index.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn contains(&self, node: N) -> bool {
        self.members.contains(&node)
    }
}

/// Exhaustive, disjoint partition of a selection into clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterPartition<N> {
    clusters: Vec<Cluster<N>>,
}

impl<N: Copy + PartialEq> ClusterPartition<N> {
    pub fn clusters(&self) -> &[Cluster<N>] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of clusters holding exactly one node.
    pub fn singletons(&self) -> usize {
        self.clusters.iter().filter(|c| c.is_singleton()).count()
    }

    /// Clusters that would produce a container.
    pub fn groupable(&self) -> impl Iterator<Item = &Cluster<N>> {
        self.clusters.iter().filter(|c| c.len() > 1)
    }

    /// Total number of nodes across all clusters.
    pub fn node_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster<N>> {
        self.clusters.iter()
    }
}

impl<N> IntoIterator for ClusterPartition<N> {
    type Item = Cluster<N>;
    type IntoIter = std::vec::IntoIter<Cluster<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_iter()
    }
}

/// Splits the index into connected components.
///
/// Each unvisited entry, taken in input order, seeds a depth-first traversal
/// that descends into every unvisited entry `connected` accepts, scanning
/// candidates in input order. The frame stack keeps `(entry, next candidate)`
/// so the visitation order matches a recursive traversal without using the
/// call stack. O(n²) predicate calls in the worst case.
pub fn extract_clusters<N, F>(index: &GeometryIndex<N>, mut connected: F) -> ClusterPartition<N>
where
    N: Copy + Eq + std::hash::Hash,
    F: FnMut(&GeometryEntry<N>, &GeometryEntry<N>) -> bool,
{
    let entries = index.entries();
    let n = entries.len();
    let mut visited = vec![false; n];
    let mut clusters = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        let mut positions = vec![seed];
        visited[seed] = true;
        stack.push((seed, 0));

        while let Some(frame) = stack.last_mut() {
            let (current, cursor) = *frame;
            let next = (cursor..n).find(|&j| !visited[j] && connected(&entries[current], &entries[j]));
            match next {
                Some(j) => {
                    frame.1 = j + 1;
                    visited[j] = true;
                    positions.push(j);
                    stack.push((j, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }

        let members = positions.iter().map(|&p| entries[p].node).collect();
        clusters.push(Cluster { members, positions });
    }

    ClusterPartition { clusters }
}
