use std::fmt::Debug;

use crate::typedef::PageId;

pub trait Replacer: Send + Sync + Debug {
    /// Records a reference to `page_id`, admitting it if it is not resident.
    /// Returns `true` if the reference faulted.
    fn reference(&mut self, page_id: PageId) -> bool;

    /// Returns whether `page_id` is currently resident.
    fn is_resident(&self, page_id: PageId) -> bool;

    /// Returns the number of resident pages.
    fn resident_count(&self) -> usize;

    /// Returns the maximum number of resident pages.
    fn capacity(&self) -> usize;
}
