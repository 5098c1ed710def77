//! Host scene-graph interface.
//!
//! The engine never talks to an editor directly. Everything it needs from the
//! document model (geometry reads, container creation, reparenting and the
//! send-to-back primitive) goes through [`SceneGraph`]. [`Document`] is the
//! in-memory implementation used by the CLI, benchmarks and tests.
//!
//! Stacking convention: a container's children are listed front to back, so
//! a lower stacking index is closer to the viewer and "the very back" is the
//! end of the list.

mod document;

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SceneError;
use crate::geometry::BBox;

pub use document::{Document, NodeId, NodeKind};

/// Where to put a node when creating or moving it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Placement<N> {
    /// First (frontmost) child of the container.
    AtBeginning(N),
    /// Last (backmost) child of the container.
    AtEnd(N),
    /// Directly in front of the sibling, in the sibling's parent.
    Before(N),
    /// Directly behind the sibling, in the sibling's parent.
    After(N),
}

/// Document-model operations consumed by the clustering and grouping engine.
pub trait SceneGraph {
    /// Opaque handle to a shape or container.
    type Node: Copy + Eq + Hash + Debug;

    /// Visual bounding box of the node.
    fn bounds(&self, node: Self::Node) -> Result<BBox, SceneError>;

    /// Position among siblings; 0 is frontmost.
    fn stacking_index(&self, node: Self::Node) -> Result<usize, SceneError>;

    fn parent(&self, node: Self::Node) -> Result<Option<Self::Node>, SceneError>;

    /// Members of a container, front to back.
    fn children(&self, container: Self::Node) -> Result<Vec<Self::Node>, SceneError>;

    /// Creates an empty container at the given placement.
    fn create_container(&mut self, at: Placement<Self::Node>) -> Result<Self::Node, SceneError>;

    /// Detaches the node from its parent and reinserts it at the placement.
    fn move_to(&mut self, node: Self::Node, at: Placement<Self::Node>) -> Result<(), SceneError>;

    /// Moves the node to the very back of its current container.
    fn send_to_back(&mut self, node: Self::Node) -> Result<(), SceneError>;

    fn set_clipping(&mut self, node: Self::Node, clipping: bool) -> Result<(), SceneError>;

    fn is_clipping(&self, node: Self::Node) -> Result<bool, SceneError>;
}
