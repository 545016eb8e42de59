use std::collections::HashMap;

use super::replacer::Replacer;
use crate::eviction;
use crate::typedef::{PageId, Timestamp};

/// Keeps pages in admission order but picks victims by recency among the first slots only,
/// using the same window rule as the address translator.
#[derive(Debug)]
pub struct HybridReplacer {
    resident: Vec<PageId>,                // Admission order
    last_used: HashMap<PageId, Timestamp>, // Logical time of the latest reference
    capacity: usize,
    current_time: Timestamp,
}

impl HybridReplacer {
    pub fn new(capacity: usize) -> Self {
        HybridReplacer {
            resident: Vec::new(),
            last_used: HashMap::new(),
            capacity,
            current_time: 0,
        }
    }

    /// Removes the page chosen by the eviction window, if any.
    fn evict(&mut self) -> Option<PageId> {
        let position = eviction::select_victim(
            self.resident
                .iter()
                .map(|page_id| self.last_used.get(page_id).copied().unwrap_or_default()),
        )?;
        let page_id = self.resident.remove(position);
        self.last_used.remove(&page_id);
        Some(page_id)
    }
}

impl Replacer for HybridReplacer {
    fn reference(&mut self, page_id: PageId) -> bool {
        self.current_time += 1;

        if let Some(last_used) = self.last_used.get_mut(&page_id) {
            *last_used = self.current_time;
            return false;
        }
        if self.capacity == 0 {
            return true;
        }
        if self.resident.len() == self.capacity {
            self.evict();
        }
        self.resident.push(page_id);
        self.last_used.insert(page_id, self.current_time);
        true
    }

    fn is_resident(&self, page_id: PageId) -> bool {
        self.last_used.contains_key(&page_id)
    }

    fn resident_count(&self) -> usize {
        self.resident.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
