/// Identifier of a virtual page (the quotient of a virtual address by the page size).
pub type PageId = u64;
/// Index of a physical frame slot.
pub type FrameId = usize;
/// Logical clock value, advanced once per access.
pub type Timestamp = u64;
pub type VirtAddr = u64;
pub type PhysAddr = u64;
