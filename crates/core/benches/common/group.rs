use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;

use crate::bench_settings::BenchTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupWeight {
    /// Read-only work such as clustering.
    Light,
    /// Work that rebuilds a scene every iteration.
    Heavy,
}

pub fn configure_group<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    tier: BenchTier,
    weight: GroupWeight,
) {
    let (sample_size, measurement) = match (weight, tier) {
        (GroupWeight::Light, BenchTier::Quick) => (20, Duration::from_secs(3)),
        (GroupWeight::Light, BenchTier::Full) => (30, Duration::from_secs(5)),
        (GroupWeight::Heavy, BenchTier::Quick) => (12, Duration::from_secs(5)),
        (GroupWeight::Heavy, BenchTier::Full) => (20, Duration::from_secs(10)),
    };
    group.sample_size(sample_size);
    group.measurement_time(measurement);
}
