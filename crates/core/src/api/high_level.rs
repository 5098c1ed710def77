//! High-level grouping API.
//!
//! - `partition_selection()` - cluster a selection without touching the scene
//! - `assemble_partition()` - build a container for every multi-member cluster
//! - `group_selection()` - both, in one call

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{info, warn};

use crate::cluster::{ClusterPartition, GeometryIndex, partition};
use crate::compose::{Assembly, assemble};
use crate::error::Result;
use crate::params::{AssembleParams, ClusterParams};
use crate::scene::SceneGraph;

/// Outcome of grouping a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingReport<N> {
    /// One entry per container built, in cluster order.
    pub assemblies: Vec<Assembly<N>>,
    /// Clusters of a single node, left untouched.
    pub singletons: usize,
    /// Clusters whose container could not be created.
    pub failed_clusters: usize,
}

impl<N> Default for GroupingReport<N> {
    fn default() -> Self {
        Self {
            assemblies: Vec::new(),
            singletons: 0,
            failed_clusters: 0,
        }
    }
}

impl<N: Copy + Eq + Hash + Debug> GroupingReport<N> {
    pub fn containers(&self) -> Vec<N> {
        self.assemblies.iter().map(|a| a.container).collect()
    }

    /// Host failures skipped across all assemblies.
    pub fn skipped_failures(&self) -> usize {
        self.assemblies.iter().map(|a| a.failures).sum()
    }
}

/// Clusters `shapes` under `params`. Reads only.
pub fn partition_selection<S>(
    scene: &S,
    shapes: &[S::Node],
    params: &ClusterParams,
) -> Result<ClusterPartition<S::Node>>
where
    S: SceneGraph,
{
    params.validate()?;
    let index = GeometryIndex::build(scene, shapes);
    Ok(partition(&index, params))
}

/// Assembles every cluster with more than one member.
///
/// A cluster whose container can't be created is counted and skipped; the
/// remaining clusters are still processed.
pub fn assemble_partition<S>(
    scene: &mut S,
    clusters: &ClusterPartition<S::Node>,
    params: &AssembleParams,
) -> GroupingReport<S::Node>
where
    S: SceneGraph,
{
    let mut report = GroupingReport {
        singletons: clusters.singletons(),
        ..GroupingReport::default()
    };

    for cluster in clusters.groupable() {
        match assemble(scene, cluster, params) {
            Ok(Some(assembly)) => report.assemblies.push(assembly),
            Ok(None) => {}
            Err(e) => {
                report.failed_clusters += 1;
                warn!(size = cluster.len(), error = %e, "could not assemble cluster");
            }
        }
    }

    info!(
        containers = report.assemblies.len(),
        singletons = report.singletons,
        failed = report.failed_clusters,
        "grouped selection"
    );
    report
}

/// Clusters `shapes` and assembles each multi-member cluster.
pub fn group_selection<S>(
    scene: &mut S,
    shapes: &[S::Node],
    cluster_params: &ClusterParams,
    assemble_params: &AssembleParams,
) -> Result<GroupingReport<S::Node>>
where
    S: SceneGraph,
{
    let clusters = partition_selection(&*scene, shapes, cluster_params)?;
    Ok(assemble_partition(scene, &clusters, assemble_params))
}
