//! Clustering and grouping parameters.
//!
//! Both structs are plain immutable values threaded into
//! [`partition`](crate::cluster::partition) and
//! [`assemble`](crate::compose::assemble). Nothing in the crate keeps them in
//! shared state.

use crate::error::{ComposeError, Result};
use crate::geometry::Axis;

/// How two bounding boxes become "connected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjacencyMode {
    /// Only a positive overlap ratio connects.
    Overlap,
    /// Overlap, or a gap no larger than the threshold, where the gap is the
    /// larger of the horizontal and vertical separation.
    Proximity,
    /// Gap measured along `axis` only. Boxes separated on the orthogonal axis
    /// are never connected. With `strict: false` any overlap also connects.
    Axis { axis: Axis, strict: bool },
}

/// Denominator used when normalizing the overlap area of two boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlapRatio {
    /// Area of the smaller box.
    #[default]
    Min,
    /// Area of the larger box.
    Max,
}

/// Parameters for adjacency clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    /// Connectivity rule.
    pub mode: AdjacencyMode,

    /// Largest gap, in document units, that still connects two boxes.
    /// A negative value disables distance tests entirely (overlap only).
    pub threshold: f64,

    /// Denominator policy for the overlap ratio.
    pub overlap_ratio: OverlapRatio,

    /// The overlap ratio must be strictly greater than this to count as
    /// overlapping. Range: [0, 1).
    pub min_overlap_ratio: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            mode: AdjacencyMode::Proximity,
            threshold: 0.0,
            overlap_ratio: OverlapRatio::Min,
            min_overlap_ratio: 0.0,
        }
    }
}

impl ClusterParams {
    /// Creates validated parameters with the default overlap policy.
    pub fn new(mode: AdjacencyMode, threshold: f64) -> Result<Self> {
        let params = Self {
            mode,
            threshold,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_overlap_ratio(mut self, overlap_ratio: OverlapRatio) -> Self {
        self.overlap_ratio = overlap_ratio;
        self
    }

    pub fn with_min_overlap_ratio(mut self, min_overlap_ratio: f64) -> Self {
        self.min_overlap_ratio = min_overlap_ratio;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(ComposeError::InvalidThreshold(self.threshold));
        }
        if !(0.0..1.0).contains(&self.min_overlap_ratio) {
            return Err(ComposeError::InvalidOverlapRatio(self.min_overlap_ratio));
        }
        Ok(())
    }

    /// The distance limit, or `None` when the threshold is the negative
    /// "overlap only" sentinel.
    pub fn distance_limit(&self) -> Option<f64> {
        (self.threshold >= 0.0).then_some(self.threshold)
    }
}

/// Kind of container a cluster is assembled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerKind {
    #[default]
    Plain,
    /// Clip group; the reference member becomes the clipping mask.
    Clip,
}

/// Which cluster member acts as mask or anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferencePolicy {
    #[default]
    Frontmost,
    Backmost,
}

/// Parameters for assembling a cluster into a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssembleParams {
    pub kind: ContainerKind,

    /// Mask selection in clip mode. Ignored for plain groups.
    pub reference: ReferencePolicy,

    /// Whether the clipping mask takes part in the stacking restore. When
    /// false the mask stays frontmost in its clip group.
    pub reference_in_reorder: bool,
}

impl AssembleParams {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn clip(reference: ReferencePolicy) -> Self {
        Self {
            kind: ContainerKind::Clip,
            reference,
            reference_in_reorder: false,
        }
    }
}
