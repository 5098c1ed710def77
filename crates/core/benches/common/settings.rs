//! Benchmark knobs read from the environment.
//!
//! `CLUMP_BENCH_TIER=full` adds the largest selection size and longer
//! measurement windows. `CLUMP_BENCH_SEED` fixes the scene generator so
//! runs on different machines compare the same layouts.

use std::env;

const DEFAULT_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

#[derive(Debug, Clone, Copy)]
pub struct BenchSettings {
    pub tier: BenchTier,
    pub seed: u64,
}

impl BenchSettings {
    pub fn from_env() -> Self {
        let tier = match env::var("CLUMP_BENCH_TIER").as_deref() {
            Ok("full") => BenchTier::Full,
            _ => BenchTier::Quick,
        };
        let seed = env::var("CLUMP_BENCH_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SEED);
        Self { tier, seed }
    }

    /// Number of selected nodes per scene at this tier.
    pub fn selection_sizes(&self) -> &'static [usize] {
        match self.tier {
            BenchTier::Quick => &[64, 256],
            BenchTier::Full => &[64, 256, 1024],
        }
    }
}
