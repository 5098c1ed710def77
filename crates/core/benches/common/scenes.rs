use clump_core::geometry::BBox;
use clump_core::scene::{Document, NodeId};

use crate::rng::XorShift64;

/// A layer of `count` random boxes scattered over a square sized so that
/// roughly a third of them touch a neighbor.
pub fn scattered_layer(count: usize, seed: u64) -> (Document, Vec<NodeId>) {
    let mut rng = XorShift64::new(seed);
    let side = (count as f64).sqrt() * 40.0;
    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let ids = (0..count)
        .map(|i| {
            let x = rng.gen_f64(0.0, side);
            let y = rng.gen_f64(0.0, side);
            let w = rng.gen_f64(5.0, 25.0);
            let h = rng.gen_f64(5.0, 25.0);
            doc.add_shape(
                layer,
                &format!("shape{i}"),
                Some(BBox::from_corners(x, y, x + w, y + h)),
            )
        })
        .collect();
    (doc, ids)
}

/// A container whose `count` members are shuffled relative to creation order.
pub fn shuffled_container(count: usize, seed: u64) -> (Document, NodeId, Vec<NodeId>) {
    let mut rng = XorShift64::new(seed);
    let mut order: Vec<usize> = (0..count).collect();
    rng.shuffle(&mut order);

    let mut doc = Document::new();
    let layer = doc.add_layer("Layer 1");
    let group = doc.add_container(layer, "group");
    let mut target = vec![NodeId(0); count];
    for rank in order {
        target[rank] = doc.add_shape(group, &format!("shape{rank}"), None);
    }
    (doc, group, target)
}
