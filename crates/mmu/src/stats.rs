//! Access counters kept by the address translator.
use serde::Serialize;

/// Monotonic counters for one translator instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_accesses: u64,
    pub page_faults: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl Statistics {
    /// Fraction of accesses that faulted, or 0 when nothing was accessed.
    pub fn page_fault_rate(&self) -> f64 {
        ratio(self.page_faults, self.total_accesses)
    }

    /// Fraction of accesses served by the translation cache, or 0 when nothing was accessed.
    pub fn cache_hit_rate(&self) -> f64 {
        ratio(self.cache_hits, self.total_accesses)
    }

    /// Captures the counters and derived rates.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            page_faults: self.page_faults,
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
            total_accesses: self.total_accesses,
            page_fault_rate: self.page_fault_rate(),
            cache_hit_rate: self.cache_hit_rate(),
        }
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Point-in-time copy of the statistics handed to callers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub page_faults: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_accesses: u64,
    pub page_fault_rate: f64,
    pub cache_hit_rate: f64,
}
