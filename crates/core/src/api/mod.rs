//! High-level API module for clustering and grouping a selection.
//!
//! # Example
//!
//! ```
//! use clump_core::api::group_selection;
//! use clump_core::geometry::BBox;
//! use clump_core::params::{AdjacencyMode, AssembleParams, ClusterParams};
//! use clump_core::scene::Document;
//!
//! let mut doc = Document::new();
//! let layer = doc.add_layer("Layer 1");
//! let a = doc.add_shape(layer, "a", Some(BBox::from_corners(0.0, 0.0, 10.0, 10.0)));
//! let b = doc.add_shape(layer, "b", Some(BBox::from_corners(9.0, 0.0, 20.0, 10.0)));
//!
//! let params = ClusterParams::new(AdjacencyMode::Proximity, 5.0)?;
//! let report = group_selection(&mut doc, &[a, b], &params, &AssembleParams::plain())?;
//! assert_eq!(report.assemblies.len(), 1);
//! # Ok::<(), clump_core::ComposeError>(())
//! ```

pub mod high_level;

pub use high_level::{GroupingReport, assemble_partition, group_selection, partition_selection};
