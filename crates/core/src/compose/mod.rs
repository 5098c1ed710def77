//! Order-preserving composition of clusters into containers.
//!
//! [`assemble`] snapshots a cluster's stacking order, builds a plain or clip
//! group, and hands the new container to [`restore_order`], which puts the
//! members back in their original front-to-back order using nothing but
//! send-to-back.

pub mod assemble;
pub mod reference;
pub mod reorder;
pub mod snapshot;

pub use assemble::{Assembly, assemble};
pub use reference::{FRONT_IS_LOWER_INDEX, is_in_front, select_reference};
pub use reorder::{ReorderStats, is_in_target_order, restore_order};
pub use snapshot::ZOrderSnapshot;
