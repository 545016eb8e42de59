use tracing::debug;

use crate::typedef::{FrameId, PageId, Timestamp};

/// A cached virtual page to frame translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlbEntry {
    pub virtual_page: PageId,
    pub physical_frame: FrameId,
    pub timestamp: Timestamp,
}

/// Bounded translation lookaside buffer with least-recently-touched eviction.
///
/// Entries are kept in insertion order and looked up by linear scan. At most one entry exists
/// per virtual page.
#[derive(Debug)]
pub struct TranslationCache {
    entries: Vec<TlbEntry>,
    capacity: usize,
}

impl TranslationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TlbEntry] {
        &self.entries
    }

    /// Looks up `virtual_page`, refreshing the entry's timestamp on a hit.
    /// A miss leaves the cache untouched.
    pub fn lookup(&mut self, virtual_page: PageId, time: Timestamp) -> Option<FrameId> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.virtual_page == virtual_page)?;
        entry.timestamp = time;
        Some(entry.physical_frame)
    }

    /// Caches a translation, replacing any entry for the same page. If this grows the cache past
    /// capacity, the entry with the oldest timestamp is dropped.
    pub fn insert(&mut self, virtual_page: PageId, physical_frame: FrameId, time: Timestamp) {
        self.invalidate(virtual_page);
        self.entries.push(TlbEntry {
            virtual_page,
            physical_frame,
            timestamp: time,
        });

        if self.entries.len() > self.capacity {
            // min_by_key keeps the first of equal timestamps, so ties go to the older insertion
            if let Some(oldest) = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, entry)| entry.timestamp)
                .map(|(idx, _)| idx)
            {
                let evicted = self.entries.remove(oldest);
                debug!(
                    page = evicted.virtual_page,
                    frame = evicted.physical_frame,
                    "translation cache full, dropped oldest entry"
                );
            }
        }
    }

    /// Drops any entry for `virtual_page`.
    pub fn invalidate(&mut self, virtual_page: PageId) {
        self.entries.retain(|entry| entry.virtual_page != virtual_page);
    }
}
