use std::collections::VecDeque;

use super::replacer::Replacer;
use crate::typedef::PageId;

/// Evicts pages in the order they were admitted. Hits do not reorder anything.
#[derive(Debug)]
pub struct FifoReplacer {
    queue: VecDeque<PageId>, // Oldest admission at the front
    capacity: usize,
}

impl FifoReplacer {
    pub fn new(capacity: usize) -> Self {
        FifoReplacer {
            queue: VecDeque::new(),
            capacity,
        }
    }
}

impl Replacer for FifoReplacer {
    fn reference(&mut self, page_id: PageId) -> bool {
        if self.queue.contains(&page_id) {
            return false;
        }
        if self.capacity == 0 {
            return true;
        }
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(page_id);
        true
    }

    fn is_resident(&self, page_id: PageId) -> bool {
        self.queue.contains(&page_id)
    }

    fn resident_count(&self) -> usize {
        self.queue.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
