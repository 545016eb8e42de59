use crate::{
    eviction,
    typedef::{FrameId, PageId, Timestamp},
};

/// Represents a physical frame slot with residency metadata. No page bytes are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    resident_page: Option<PageId>, // Virtual page currently held by this frame
    last_used: Timestamp,          // Logical time of admission, or of the latest touch
}

impl Frame {
    /// Creates a new, unoccupied frame.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the resident page, if any.
    pub fn resident_page(&self) -> Option<PageId> {
        self.resident_page
    }

    /// Returns the logical time this frame was last used.
    pub fn last_used(&self) -> Timestamp {
        self.last_used
    }

    /// Checks if the frame holds a page.
    pub fn is_occupied(&self) -> bool {
        self.resident_page.is_some()
    }

    /// Loads `page_id` into the frame, returning the page it held before.
    pub(crate) fn load(&mut self, page_id: PageId, time: Timestamp) -> Option<PageId> {
        self.last_used = time;
        self.resident_page.replace(page_id)
    }

    /// Updates the last-used time without changing residency.
    pub(crate) fn touch(&mut self, time: Timestamp) {
        self.last_used = time;
    }
}

/// Bounded set of physical frames.
///
/// Frames are filled in index order and are never released, only overwritten, so the occupied
/// frames always form a prefix of the table. Slots are created on admission, so only occupied
/// frames are stored and memory grows with the number of resident pages, not with `capacity`.
#[derive(Debug)]
pub struct FrameTable {
    frames: Vec<Frame>, // Occupied frames, indexed by FrameId
    capacity: usize,
}

impl FrameTable {
    /// Creates an empty frame table that can hold up to `capacity` pages.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            capacity,
        }
    }

    /// Returns the total number of frames.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of frames that hold a page.
    pub fn occupied_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    /// Returns the frame at `frame_id`, or `None` if that frame is still free.
    pub fn get(&self, frame_id: FrameId) -> Option<&Frame> {
        self.frames.get(frame_id)
    }

    /// Iterates over the occupied frames in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Loads `page_id` into the lowest-index free frame.
    /// Returns `None` if every frame is occupied; the caller must then pick a victim.
    pub fn admit(&mut self, page_id: PageId, time: Timestamp) -> Option<FrameId> {
        if self.is_full() {
            return None;
        }
        let frame_id = self.frames.len();
        let mut frame = Frame::new();
        frame.load(page_id, time);
        self.frames.push(frame);
        Some(frame_id)
    }

    /// Chooses the frame to reclaim according to the shared eviction window.
    /// Returns `None` only when no frame is occupied.
    pub fn victim(&self) -> Option<FrameId> {
        eviction::select_victim(self.frames.iter().map(|frame| frame.last_used()))
    }

    /// Overwrites an occupied frame with `page_id`, returning the page it held.
    pub fn replace(
        &mut self,
        frame_id: FrameId,
        page_id: PageId,
        time: Timestamp,
    ) -> Option<PageId> {
        let frame = self.frames.get_mut(frame_id)?;
        if !frame.is_occupied() {
            return None;
        }
        frame.load(page_id, time)
    }

    /// Updates the last-used time of `frame_id`.
    pub fn touch(&mut self, frame_id: FrameId, time: Timestamp) {
        if let Some(frame) = self.frames.get_mut(frame_id) {
            frame.touch(time);
        }
    }
}
