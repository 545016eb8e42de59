//! The victim selection rule shared by the address translator and the hybrid replacer.
//!
//! Only the first [`EVICTION_WINDOW`] resident slots are candidates. Among those, the slot with
//! the smallest last-used timestamp is chosen, and the earliest slot wins a tie. With more than two
//! slots this is neither FIFO nor LRU: a page that settles past the window is never reclaimed.
use crate::typedef::Timestamp;

/// Number of leading slots inspected when picking a victim.
pub const EVICTION_WINDOW: usize = 2;

/// Picks the victim position among the given last-used timestamps, listed in slot order.
///
/// Returns `None` when there are no candidates, so an empty resident set never yields an index.
pub fn select_victim<I>(last_used: I) -> Option<usize>
where
    I: IntoIterator<Item = Timestamp>,
{
    last_used
        .into_iter()
        .take(EVICTION_WINDOW)
        .enumerate()
        .min_by_key(|&(_, timestamp)| timestamp)
        .map(|(position, _)| position)
}
