//! Pairwise adjacency tests on bounding boxes.

use crate::geometry::{Axis, BBox};
use crate::params::{AdjacencyMode, ClusterParams, OverlapRatio};

/// Gap reported for pairs that can never connect along an axis.
pub const UNREACHABLE_GAP: f64 = f64::INFINITY;

/// Overlap area normalized by the smaller or larger box area.
///
/// Returns 0 when the denominator is zero, so degenerate boxes never count as
/// overlapping.
pub fn overlap_ratio(a: &BBox, b: &BBox, policy: OverlapRatio) -> f64 {
    let denom = match policy {
        OverlapRatio::Min => a.area().min(b.area()),
        OverlapRatio::Max => a.area().max(b.area()),
    };
    if denom <= 0.0 {
        return 0.0;
    }
    a.overlap_area(b) / denom
}

/// The larger of the horizontal and vertical separation.
pub fn omni_gap(a: &BBox, b: &BBox) -> f64 {
    a.horizontal_gap(b).max(a.vertical_gap(b))
}

/// Separation along `axis`, or [`UNREACHABLE_GAP`] when the boxes are also
/// separated on the orthogonal axis.
pub fn axis_gap(a: &BBox, b: &BBox, axis: Axis) -> f64 {
    let (along, across) = match axis {
        Axis::Horizontal => (a.horizontal_gap(b), a.vertical_gap(b)),
        Axis::Vertical => (a.vertical_gap(b), a.horizontal_gap(b)),
    };
    if across > 0.0 { UNREACHABLE_GAP } else { along }
}

fn within(gap: f64, limit: Option<f64>) -> bool {
    match limit {
        Some(limit) => gap.is_finite() && gap <= limit,
        None => false,
    }
}

/// Decides whether two boxes are connected under `params`.
pub fn adjacent(a: &BBox, b: &BBox, params: &ClusterParams) -> bool {
    let overlaps = || overlap_ratio(a, b, params.overlap_ratio) > params.min_overlap_ratio;
    let limit = params.distance_limit();

    match params.mode {
        AdjacencyMode::Overlap => overlaps(),
        AdjacencyMode::Proximity => overlaps() || within(omni_gap(a, b), limit),
        AdjacencyMode::Axis { axis, strict } => {
            within(axis_gap(a, b, axis), limit) || (!strict && overlaps())
        }
    }
}
