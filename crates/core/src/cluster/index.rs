//! Geometry snapshot of a selection.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::geometry::BBox;
use crate::scene::SceneGraph;

/// Geometry of one selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryEntry<N> {
    pub node: N,
    pub bbox: BBox,
    pub stacking_index: usize,
    pub area: f64,
    /// The host could not report usable bounds; `bbox` is degenerate and the
    /// entry never connects to anything.
    pub fallback: bool,
}

/// Bounding boxes and stacking indices for a selection, in input order.
#[derive(Debug, Clone)]
pub struct GeometryIndex<N> {
    entries: Vec<GeometryEntry<N>>,
    by_node: FxHashMap<N, usize>,
}

impl<N: Copy + Eq + Hash> GeometryIndex<N> {
    /// Reads geometry for every node.
    ///
    /// Reads never abort the batch: unreadable bounds become
    /// [`BBox::DEGENERATE`] and an unreadable stacking index falls back to
    /// the node's input position. Repeated nodes are indexed once.
    pub fn build<S>(scene: &S, nodes: &[N]) -> Self
    where
        S: SceneGraph<Node = N>,
        N: std::fmt::Debug,
    {
        let mut entries = Vec::with_capacity(nodes.len());
        let mut by_node = FxHashMap::default();

        for (input_pos, &node) in nodes.iter().enumerate() {
            if by_node.contains_key(&node) {
                debug!(?node, "skipping repeated node");
                continue;
            }

            let (bbox, fallback) = match scene.bounds(node) {
                Ok(b) if b.is_valid() => (b, false),
                Ok(b) => {
                    warn!(?node, ?b, "invalid bounds, isolating node");
                    (BBox::DEGENERATE, true)
                }
                Err(e) => {
                    warn!(?node, error = %e, "unreadable bounds, isolating node");
                    (BBox::DEGENERATE, true)
                }
            };
            let stacking_index = scene.stacking_index(node).unwrap_or_else(|e| {
                warn!(?node, error = %e, "unreadable stacking index");
                input_pos
            });

            by_node.insert(node, entries.len());
            entries.push(GeometryEntry {
                node,
                bbox,
                stacking_index,
                area: bbox.area(),
                fallback,
            });
        }

        Self { entries, by_node }
    }

    pub fn entries(&self) -> &[GeometryEntry<N>] {
        &self.entries
    }

    pub fn get(&self, node: N) -> Option<&GeometryEntry<N>> {
        self.by_node.get(&node).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
