use std::collections::HashMap;

use super::replacer::Replacer;
use crate::typedef::{PageId, Timestamp};

#[derive(Debug)]
struct LruNode {
    page_id: PageId,
    last_accessed_timestamp: Timestamp,
}

/// Evicts the resident page whose last reference is the oldest.
#[derive(Debug)]
pub struct LruReplacer {
    node_store: HashMap<PageId, LruNode>,
    capacity: usize,
    current_timestamp: Timestamp,
}

impl LruReplacer {
    pub fn new(capacity: usize) -> Self {
        LruReplacer {
            node_store: HashMap::new(),
            capacity,
            current_timestamp: 0,
        }
    }

    /// Increments and returns the current timestamp.
    fn advance_timestamp(&mut self) -> Timestamp {
        let old_timestamp = self.current_timestamp;
        self.current_timestamp += 1;
        old_timestamp
    }

    /// Removes the least recently used page, if any.
    fn evict(&mut self) -> Option<PageId> {
        // timestamps are unique, so there is exactly one oldest node
        let page_id = self
            .node_store
            .values()
            .min_by_key(|node| node.last_accessed_timestamp)
            .map(|node| node.page_id)?;
        self.node_store.remove(&page_id);
        Some(page_id)
    }
}

impl Replacer for LruReplacer {
    /// Moves a resident page to the most recently used position, or admits it as such.
    fn reference(&mut self, page_id: PageId) -> bool {
        let ts = self.advance_timestamp();

        if let Some(node) = self.node_store.get_mut(&page_id) {
            node.last_accessed_timestamp = ts;
            return false;
        }
        if self.capacity == 0 {
            return true;
        }
        if self.node_store.len() == self.capacity {
            self.evict();
        }
        self.node_store.insert(
            page_id,
            LruNode {
                page_id,
                last_accessed_timestamp: ts,
            },
        );
        true
    }

    fn is_resident(&self, page_id: PageId) -> bool {
        self.node_store.contains_key(&page_id)
    }

    fn resident_count(&self) -> usize {
        self.node_store.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
