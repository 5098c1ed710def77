//! Error types for clump scene operations.

use thiserror::Error;

/// Failure reported by a [`SceneGraph`](crate::scene::SceneGraph) host.
///
/// The engine treats every one of these as local: geometry reads fall back to
/// a degenerate box and structural calls are skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("node {0} does not exist")]
    StaleNode(usize),

    #[error("node {0} is not a container")]
    NotAContainer(usize),

    #[error("node {0} has no parent")]
    NoParent(usize),

    #[error("node {0} has no readable bounds")]
    Unreadable(usize),

    #[error("container {0} is empty and has no bounds")]
    EmptyBounds(usize),

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("host rejected operation on node {node}: {reason}")]
    Rejected { node: usize, reason: String },
}

/// Primary error type for clustering and grouping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("threshold must be a number, got {0}")]
    InvalidThreshold(f64),

    #[error("minimum overlap ratio must be in [0, 1), got {0}")]
    InvalidOverlapRatio(f64),
}

/// Convenience Result type alias for ComposeError.
pub type Result<T> = std::result::Result<T, ComposeError>;
