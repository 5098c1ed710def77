//! Turning one cluster into a single container.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::cluster::Cluster;
use crate::error::{Result, SceneError};
use crate::params::{AssembleParams, ContainerKind, ReferencePolicy};
use crate::scene::{Placement, SceneGraph};

use super::reference::{is_in_front, select_reference};
use super::reorder::{ReorderStats, restore_order};
use super::snapshot::ZOrderSnapshot;

/// Result of assembling one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly<N> {
    /// The new container holding every member that could be moved.
    pub container: N,
    /// Clipping mask, for clip groups.
    pub reference: Option<N>,
    pub reorder: ReorderStats,
    /// Structural host calls that failed and were skipped.
    pub failures: usize,
}

/// Counts and logs host failures that must not abort the cluster.
struct Tolerant {
    failures: usize,
}

impl Tolerant {
    fn attempt<T>(&mut self, what: &str, result: std::result::Result<T, SceneError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.failures += 1;
                warn!(error = %e, "{what} failed, continuing");
                None
            }
        }
    }
}

/// Where a node sits relative to things outside the cluster: in front of the
/// first following sibling that is not a member, or at the end of its parent.
/// The node is located in the sibling list, so an unreadable stacking index
/// does not matter here.
fn outside_slot<S>(
    scene: &S,
    anchor: S::Node,
    members: &FxHashSet<S::Node>,
) -> std::result::Result<Placement<S::Node>, SceneError>
where
    S: SceneGraph,
{
    let parent = scene.parent(anchor)?.ok_or_else(|| {
        SceneError::InvalidPlacement(format!("{anchor:?} has no parent to hold a container"))
    })?;
    let siblings = scene.children(parent)?;
    let Some(position) = siblings.iter().position(|&s| s == anchor) else {
        warn!(?anchor, "not found among its siblings, placing container at the end");
        return Ok(Placement::AtEnd(parent));
    };
    let next_outside = siblings
        .iter()
        .skip(position + 1)
        .find(|sibling| !members.contains(sibling));
    Ok(match next_outside {
        Some(&sibling) => Placement::Before(sibling),
        None => Placement::AtEnd(parent),
    })
}

/// Assembles `cluster` into one container.
///
/// Singletons and empty clusters are left alone (`Ok(None)`). The stacking
/// order is captured before the first mutation and restored inside the new
/// container. In clip mode the reference member becomes the clipping mask
/// and the container takes the slot the reference used to occupy; plain
/// groups take the slot of their frontmost member.
///
/// Only a failure to create the container is an error. Every other host
/// failure is logged, counted in [`Assembly::failures`] and skipped.
pub fn assemble<S>(
    scene: &mut S,
    cluster: &Cluster<S::Node>,
    params: &AssembleParams,
) -> Result<Option<Assembly<S::Node>>>
where
    S: SceneGraph,
{
    if cluster.len() <= 1 {
        return Ok(None);
    }

    let snapshot = ZOrderSnapshot::capture(scene, cluster.members());
    if !snapshot.is_strict() {
        debug!("cluster has repeated stacking indices, order between them is arbitrary");
    }
    let members: FxHashSet<S::Node> = cluster.members().iter().copied().collect();

    let policy = match params.kind {
        ContainerKind::Clip => params.reference,
        ContainerKind::Plain => ReferencePolicy::Frontmost,
    };
    let Some(anchor) = select_reference(&snapshot, policy) else {
        debug!(size = cluster.len(), "no reference member, leaving cluster alone");
        return Ok(None);
    };
    let slot = outside_slot(&*scene, anchor, &members)?;

    let mut tolerant = Tolerant { failures: 0 };

    if params.kind == ContainerKind::Clip {
        promote_reference(scene, anchor, &snapshot, &mut tolerant);
    }

    let container = scene.create_container(slot)?;
    debug!(?container, size = cluster.len(), kind = ?params.kind, "assembling cluster");

    let reference = match params.kind {
        ContainerKind::Plain => {
            for &node in cluster.members() {
                let moved = scene.move_to(node, Placement::AtBeginning(container));
                tolerant.attempt("move into group", moved);
            }
            None
        }
        ContainerKind::Clip => {
            let moved = scene.move_to(anchor, Placement::AtBeginning(container));
            tolerant.attempt("move mask into clip group", moved);
            let flagged = scene.set_clipping(anchor, true);
            tolerant.attempt("set clipping mask", flagged);
            for &node in cluster.members().iter().filter(|&&n| n != anchor) {
                if scene.is_clipping(node).unwrap_or(false) {
                    let cleared = scene.set_clipping(node, false);
                    tolerant.attempt("clear stale clipping flag", cleared);
                }
                let moved = scene.move_to(node, Placement::AtEnd(container));
                tolerant.attempt("move into clip group", moved);
            }
            Some(anchor)
        }
    };

    let target: Vec<S::Node> = snapshot
        .target_order()
        .into_iter()
        .filter(|&n| reference != Some(n) || params.reference_in_reorder)
        .collect();
    let reorder = restore_order(scene, container, &target);
    tolerant.failures += reorder.failures;

    // The container was created in the anchor's outside slot; put it back
    // there in case moving members shifted it.
    tolerant.attempt("place container", scene.move_to(container, slot));

    Ok(Some(Assembly {
        container,
        reference,
        reorder,
        failures: tolerant.failures,
    }))
}

/// Moves the reference in front of every member that stacks ahead of it,
/// working from the back so it ends up ahead of the frontmost one.
fn promote_reference<S>(
    scene: &mut S,
    reference: S::Node,
    snapshot: &ZOrderSnapshot<S::Node>,
    tolerant: &mut Tolerant,
) where
    S: SceneGraph,
{
    let Some(reference_index) = snapshot.index_of(reference) else {
        return;
    };
    let reference_parent = scene.parent(reference).ok().flatten();

    let mut ahead: Vec<(S::Node, usize)> = snapshot
        .entries()
        .iter()
        .copied()
        .filter(|&(node, index)| node != reference && is_in_front(index, reference_index))
        .filter(|&(node, _)| scene.parent(node).ok().flatten() == reference_parent)
        .collect();
    ahead.sort_by(|a, b| b.1.cmp(&a.1));

    for (node, _) in ahead {
        let moved = scene.move_to(reference, Placement::Before(node));
        tolerant.attempt("promote mask", moved);
    }
}
