use std::collections::HashMap;

use crate::typedef::{FrameId, PageId};

/// Authoritative mapping of resident virtual pages to the frames holding them.
#[derive(Debug, Default)]
pub struct PageTable {
    entries: HashMap<PageId, FrameId>,
}

impl PageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the frame holding `page_id`, if resident.
    pub fn lookup(&self, page_id: PageId) -> Option<FrameId> {
        self.entries.get(&page_id).copied()
    }

    /// Maps `page_id` to `frame_id`, overwriting any previous mapping.
    pub fn bind(&mut self, page_id: PageId, frame_id: FrameId) {
        self.entries.insert(page_id, frame_id);
    }

    /// Removes the mapping for `page_id`, returning the frame it pointed to.
    ///
    /// Callers must also invalidate the page in the translation cache.
    pub fn unbind(&mut self, page_id: PageId) -> Option<FrameId> {
        self.entries.remove(&page_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageId, FrameId)> + '_ {
        self.entries.iter().map(|(&page_id, &frame_id)| (page_id, frame_id))
    }
}
