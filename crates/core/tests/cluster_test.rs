//! Tests for adjacency clustering of a selection.

use clump_core::api::partition_selection;
use clump_core::cluster::{GeometryIndex, partition};
use clump_core::geometry::{Axis, BBox};
use clump_core::params::{AdjacencyMode, ClusterParams, OverlapRatio};
use clump_core::scene::{Document, NodeId};

/// Builds a layer of shapes from `[left, bottom, right, top]` boxes.
fn scene(shapes: &[(&str, [f64; 4])]) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let ids = shapes
        .iter()
        .map(|(name, [x0, y0, x1, y1])| {
            doc.add_shape(layer, name, Some(BBox::from_corners(*x0, *y0, *x1, *y1)))
        })
        .collect();
    (doc, ids)
}

fn names(doc: &Document, params: &ClusterParams, ids: &[NodeId]) -> Vec<Vec<String>> {
    let clusters = partition_selection(doc, ids, params).unwrap();
    clusters
        .iter()
        .map(|c| {
            c.members()
                .iter()
                .map(|&n| doc.name(n).unwrap().to_string())
                .collect()
        })
        .collect()
}

// ============================================================================
// Proximity mode
// ============================================================================

#[test]
fn test_proximity_threshold_controls_merging() {
    let (doc, ids) = scene(&[
        ("A", [0.0, 0.0, 10.0, 10.0]),
        ("B", [9.0, 0.0, 20.0, 10.0]),
        ("C", [100.0, 0.0, 110.0, 10.0]),
    ]);

    let tight = ClusterParams::new(AdjacencyMode::Proximity, 5.0).unwrap();
    assert_eq!(
        names(&doc, &tight, &ids),
        vec![vec!["A", "B"], vec!["C"]]
    );

    let loose = ClusterParams::new(AdjacencyMode::Proximity, 90.0).unwrap();
    assert_eq!(names(&doc, &loose, &ids), vec![vec!["A", "B", "C"]]);
}

#[test]
fn test_proximity_uses_larger_of_both_gaps() {
    // 3 units apart horizontally, 8 units apart vertically.
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 10.0, 10.0]), ("B", [13.0, 18.0, 20.0, 25.0])]);

    let params = ClusterParams::new(AdjacencyMode::Proximity, 5.0).unwrap();
    assert_eq!(names(&doc, &params, &ids).len(), 2);

    let params = params.with_threshold(8.0);
    assert_eq!(names(&doc, &params, &ids).len(), 1);
}

#[test]
fn test_negative_threshold_is_overlap_only() {
    let (doc, ids) = scene(&[
        ("A", [0.0, 0.0, 10.0, 10.0]),
        ("B", [10.0, 0.0, 20.0, 10.0]),
        ("C", [15.0, 5.0, 25.0, 15.0]),
    ]);
    let params = ClusterParams::new(AdjacencyMode::Proximity, -1.0).unwrap();
    // A and B only touch; B and C overlap.
    assert_eq!(
        names(&doc, &params, &ids),
        vec![vec!["A"], vec!["B", "C"]]
    );
}

// ============================================================================
// Overlap mode
// ============================================================================

#[test]
fn test_touching_boxes_do_not_overlap() {
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 10.0, 10.0]), ("B", [10.0, 0.0, 20.0, 10.0])]);
    let params = ClusterParams::new(AdjacencyMode::Overlap, 100.0).unwrap();
    assert_eq!(names(&doc, &params, &ids), vec![vec!["A"], vec!["B"]]);
}

#[test]
fn test_overlap_ratio_denominator_policies() {
    // Overlap area 1: a quarter of the small box, a hundredth of the large one.
    let (doc, ids) = scene(&[
        ("small", [0.0, 0.0, 2.0, 2.0]),
        ("large", [1.0, 1.0, 11.0, 11.0]),
    ]);

    let by_min = ClusterParams::new(AdjacencyMode::Overlap, 0.0)
        .unwrap()
        .with_overlap_ratio(OverlapRatio::Min)
        .with_min_overlap_ratio(0.1);
    assert_eq!(names(&doc, &by_min, &ids).len(), 1);

    let by_max = by_min.clone().with_overlap_ratio(OverlapRatio::Max);
    assert_eq!(names(&doc, &by_max, &ids).len(), 2);
}

// ============================================================================
// Axis mode
// ============================================================================

#[test]
fn test_vertical_axis_threshold() {
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 10.0, 10.0]), ("D", [0.0, 20.0, 10.0, 30.0])]);
    let mode = AdjacencyMode::Axis {
        axis: Axis::Vertical,
        strict: true,
    };

    let near = ClusterParams::new(mode, 5.0).unwrap();
    assert_eq!(names(&doc, &near, &ids).len(), 2);

    let far = ClusterParams::new(mode, 15.0).unwrap();
    assert_eq!(names(&doc, &far, &ids), vec![vec!["A", "D"]]);
}

#[test]
fn test_axis_mode_ignores_pairs_offset_across() {
    // Stacked vertically but shifted one unit to the right of A.
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 10.0, 10.0]), ("D", [11.0, 12.0, 21.0, 22.0])]);
    let mode = AdjacencyMode::Axis {
        axis: Axis::Vertical,
        strict: true,
    };
    let params = ClusterParams::new(mode, 1_000.0).unwrap();
    assert_eq!(names(&doc, &params, &ids).len(), 2);
}

#[test]
fn test_loose_axis_accepts_overlap() {
    // Overlapping diagonally: zero gap on both axes, so even the strict
    // variant connects with a non-negative threshold.
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 10.0, 10.0]), ("B", [5.0, 5.0, 15.0, 15.0])]);
    let strict = AdjacencyMode::Axis {
        axis: Axis::Horizontal,
        strict: true,
    };
    let loose = AdjacencyMode::Axis {
        axis: Axis::Horizontal,
        strict: false,
    };

    let params = ClusterParams::new(strict, 0.0).unwrap();
    assert_eq!(names(&doc, &params, &ids).len(), 1);

    let params = ClusterParams::new(strict, -1.0).unwrap();
    assert_eq!(names(&doc, &params, &ids).len(), 2);

    let params = ClusterParams::new(loose, -1.0).unwrap();
    assert_eq!(names(&doc, &params, &ids).len(), 1);
}

// ============================================================================
// Unreadable geometry
// ============================================================================

#[test]
fn test_unreadable_shape_is_isolated() {
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let a = doc.add_shape(layer, "A", Some(BBox::from_corners(-5.0, -5.0, 5.0, 5.0)));
    let ghost = doc.add_shape(layer, "ghost", None);
    let b = doc.add_shape(layer, "B", Some(BBox::from_corners(4.0, -5.0, 14.0, 5.0)));

    let params = ClusterParams::new(AdjacencyMode::Proximity, 1_000.0).unwrap();
    let clusters = partition_selection(&doc, &[a, ghost, b], &params).unwrap();

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.clusters()[0].members(), &[a, b]);
    assert_eq!(clusters.clusters()[1].members(), &[ghost]);
}

#[test]
fn test_rejected_reads_fall_back_to_input_position() {
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let a = doc.add_shape(layer, "A", Some(BBox::from_corners(0.0, 0.0, 1.0, 1.0)));
    let b = doc.add_shape(layer, "B", Some(BBox::from_corners(0.0, 0.0, 1.0, 1.0)));
    doc.reject_reads(b);

    // Input order puts B first, so its fallback stacking index is 0.
    let index = GeometryIndex::build(&doc, &[b, a]);
    let entry = index.get(b).unwrap();
    assert!(entry.fallback);
    assert_eq!(entry.bbox, BBox::DEGENERATE);
    assert_eq!(entry.area, 0.0);
    assert_eq!(entry.stacking_index, 0);
    assert_eq!(index.get(a).unwrap().stacking_index, 0);
    assert!(!index.get(a).unwrap().fallback);
}

#[test]
fn test_invalid_bounds_are_isolated() {
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let a = doc.add_shape(layer, "A", Some(BBox::from_corners(0.0, 0.0, 10.0, 10.0)));
    let nan = doc.add_shape(layer, "nan", Some(BBox::new(f64::NAN, 10.0, 10.0, 0.0)));
    let inf = doc.add_shape(layer, "inf", Some(BBox::new(0.0, f64::INFINITY, 10.0, 0.0)));
    // Right of left and below bottom.
    let inverted = doc.add_shape(layer, "inverted", Some(BBox::new(8.0, 2.0, 2.0, 8.0)));
    let b = doc.add_shape(layer, "B", Some(BBox::from_corners(5.0, 5.0, 15.0, 15.0)));
    let ids = [a, nan, inf, inverted, b];

    let index = GeometryIndex::build(&doc, &ids);
    for node in [nan, inf, inverted] {
        let entry = index.get(node).unwrap();
        assert!(entry.fallback);
        assert_eq!(entry.bbox, BBox::DEGENERATE);
        assert_eq!(entry.area, 0.0);
    }
    assert!(!index.get(a).unwrap().fallback);

    let params = ClusterParams::new(AdjacencyMode::Overlap, 0.0).unwrap();
    let clusters = partition(&index, &params);
    let members: Vec<&[NodeId]> = clusters.iter().map(|c| c.members()).collect();
    assert_eq!(
        members,
        vec![&[a, b][..], &[nan][..], &[inf][..], &[inverted][..]]
    );
}

#[test]
fn test_empty_group_is_isolated() {
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let empty = doc.add_container(layer, "empty");
    let a = doc.add_shape(layer, "A", Some(BBox::from_corners(0.0, 0.0, 1.0, 1.0)));

    let params = ClusterParams::new(AdjacencyMode::Proximity, 1_000.0).unwrap();
    let clusters = partition_selection(&doc, &[empty, a], &params).unwrap();
    assert_eq!(clusters.singletons(), 2);
}

#[test]
fn test_group_is_clustered_by_its_bounds() {
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let group = doc.add_container(layer, "group");
    doc.add_shape(group, "inner1", Some(BBox::from_corners(0.0, 0.0, 5.0, 5.0)));
    doc.add_shape(group, "inner2", Some(BBox::from_corners(20.0, 0.0, 25.0, 5.0)));
    let a = doc.add_shape(layer, "A", Some(BBox::from_corners(10.0, 1.0, 12.0, 3.0)));

    let params = ClusterParams::new(AdjacencyMode::Overlap, 0.0).unwrap();
    let clusters = partition_selection(&doc, &[group, a], &params).unwrap();
    assert_eq!(clusters.len(), 1);
}

// ============================================================================
// Partition shape
// ============================================================================

#[test]
fn test_repeated_nodes_are_indexed_once() {
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 1.0, 1.0])]);
    let params = ClusterParams::default();
    let clusters = partition_selection(&doc, &[ids[0], ids[0]], &params).unwrap();
    assert_eq!(clusters.node_count(), 1);
}

#[test]
fn test_all_singletons_is_not_an_error() {
    let (doc, ids) = scene(&[
        ("A", [0.0, 0.0, 1.0, 1.0]),
        ("B", [10.0, 0.0, 11.0, 1.0]),
        ("C", [20.0, 0.0, 21.0, 1.0]),
    ]);
    let params = ClusterParams::new(AdjacencyMode::Overlap, 0.0).unwrap();
    let clusters = partition_selection(&doc, &ids, &params).unwrap();
    assert_eq!(clusters.singletons(), 3);
    assert_eq!(clusters.groupable().count(), 0);
}

#[test]
fn test_invalid_params_are_rejected() {
    let (doc, ids) = scene(&[("A", [0.0, 0.0, 1.0, 1.0])]);
    let params = ClusterParams::default().with_threshold(f64::NAN);
    assert!(partition_selection(&doc, &ids, &params).is_err());
}

#[test]
fn test_partition_is_repeatable() {
    let (doc, ids) = scene(&[
        ("A", [0.0, 0.0, 10.0, 10.0]),
        ("B", [30.0, 0.0, 40.0, 10.0]),
        ("C", [12.0, 0.0, 28.0, 10.0]),
        ("D", [80.0, 0.0, 90.0, 10.0]),
    ]);
    let params = ClusterParams::new(AdjacencyMode::Proximity, 2.0).unwrap();
    let index = GeometryIndex::build(&doc, &ids);
    let first = partition(&index, &params);
    let second = partition(&index, &params);
    assert_eq!(first, second);
    assert_eq!(first.clusters()[0].members(), &[ids[0], ids[2], ids[1]]);
}
