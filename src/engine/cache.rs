use std::collections::HashMap;

use crate::engine::metrics::ComputedMetrics;

/// Exact identity of one scaling computation.
///
/// Floats are keyed by bit pattern so two inputs share an entry only when they are the same
/// value. `-0.0` is folded into `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    size_in_dp: u32,
    subunit_design_size: u32,
    screen_size_px: u32,
    baseline_scaled_density: u32,
    base_on_width: bool,
    use_device_size: bool,
}

impl CacheKey {
    /// Build a key from the inputs the computation depends on.
    pub fn new(
        size_in_dp: f32,
        subunit_design_size: f32,
        screen_size_px: u32,
        baseline_scaled_density: f32,
        base_on_width: bool,
        use_device_size: bool,
    ) -> Self {
        Self {
            size_in_dp: quantize(size_in_dp),
            subunit_design_size: quantize(subunit_design_size),
            screen_size_px,
            baseline_scaled_density: quantize(baseline_scaled_density),
            base_on_width,
            use_device_size,
        }
    }
}

fn quantize(v: f32) -> u32 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

/// Append-only memo of computed metrics. Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct MetricsCache {
    entries: HashMap<CacheKey, ComputedMetrics>,
    hits: u64,
    misses: u64,
}

impl MetricsCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, counting the hit or miss.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<ComputedMetrics> {
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Look up `key` without touching the counters.
    pub fn peek(&self, key: &CacheKey) -> Option<&ComputedMetrics> {
        self.entries.get(key)
    }

    /// Store `metrics` under `key`. An existing entry is kept: it was computed from the same
    /// inputs and is therefore identical.
    pub fn insert(&mut self, key: CacheKey, metrics: ComputedMetrics) -> ComputedMetrics {
        *self.entries.entry(key).or_insert(metrics)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing was cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/cache.rs"]
mod tests;
