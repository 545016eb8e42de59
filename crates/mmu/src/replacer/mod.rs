//! Standalone page replacement simulators.
//!
//! Each replacer owns its resident set and is fed one page reference at a time. They share
//! nothing with the address translator, except that [`HybridReplacer`] uses the same eviction
//! window.
mod fifo_replacer;
mod hybrid_replacer;
mod lru_replacer;
mod replacer;

pub use fifo_replacer::FifoReplacer;
pub use hybrid_replacer::HybridReplacer;
pub use lru_replacer::LruReplacer;
pub use replacer::Replacer;

use serde::{Deserialize, Serialize};

use crate::typedef::PageId;

/// Page replacement policy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    Fifo,
    Lru,
    Hybrid,
}

impl ReplacementPolicy {
    pub const ALL: [ReplacementPolicy; 3] = [
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Lru,
        ReplacementPolicy::Hybrid,
    ];

    /// Creates an empty replacer of this policy.
    pub fn replacer(self, capacity: usize) -> Box<dyn Replacer> {
        match self {
            ReplacementPolicy::Fifo => Box::new(FifoReplacer::new(capacity)),
            ReplacementPolicy::Lru => Box::new(LruReplacer::new(capacity)),
            ReplacementPolicy::Hybrid => Box::new(HybridReplacer::new(capacity)),
        }
    }

    /// Replays `pages` against a fresh replacer and returns the number of faults.
    pub fn simulate(self, pages: &[PageId], capacity: usize) -> usize {
        count_faults(self.replacer(capacity).as_mut(), pages)
    }
}

impl std::fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplacementPolicy::Fifo => write!(f, "FIFO"),
            ReplacementPolicy::Lru => write!(f, "LRU"),
            ReplacementPolicy::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// Feeds every page to `replacer` and counts the references that faulted.
pub fn count_faults(replacer: &mut dyn Replacer, pages: &[PageId]) -> usize {
    pages
        .iter()
        .filter(|&&page_id| replacer.reference(page_id))
        .count()
}
