//! Adjacency clustering.
//!
//! Contains the geometry index, the pairwise adjacency predicate and the
//! connected-component extractor that together turn a selection into a
//! [`ClusterPartition`].

pub mod adjacency;
pub mod extract;
pub mod index;

use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::params::ClusterParams;

pub use adjacency::{UNREACHABLE_GAP, adjacent, axis_gap, omni_gap, overlap_ratio};
pub use extract::{Cluster, ClusterPartition, extract_clusters};
pub use index::{GeometryEntry, GeometryIndex};

/// Partitions an indexed selection under `params`.
///
/// Fallback entries (unreadable geometry) never connect, so each ends up in a
/// cluster of its own.
pub fn partition<N>(index: &GeometryIndex<N>, params: &ClusterParams) -> ClusterPartition<N>
where
    N: Copy + Eq + Hash + Debug,
{
    let partition = extract_clusters(index, |a, b| {
        !a.fallback && !b.fallback && adjacent(&a.bbox, &b.bbox, params)
    });
    debug!(
        nodes = index.len(),
        clusters = partition.len(),
        singletons = partition.singletons(),
        mode = ?params.mode,
        threshold = params.threshold,
        "partitioned selection"
    );
    partition
}
