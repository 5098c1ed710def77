//! clump - adjacency clustering and order-preserving grouping for vector scene graphs.
//!
//! Given a selection of shapes, clump partitions it into connected clusters
//! using bounding-box adjacency (overlap, gap distance, or axis-restricted
//! proximity) and turns each cluster into a single plain or clip group while
//! keeping the members' original front-to-back stacking order.
//!
//! The editor itself stays behind the [`scene::SceneGraph`] trait;
//! [`scene::Document`] is an in-memory implementation.

pub mod api;
pub mod cluster;
pub mod compose;
pub mod error;
pub mod geometry;
pub mod params;
pub mod scene;

pub use api::high_level;

pub use error::{ComposeError, Result, SceneError};
