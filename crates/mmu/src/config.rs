//! Translator configuration.
//!
//! Every field has a default, so a partial JSON object such as `{"frames": 8}` deserializes into
//! a complete configuration.
use serde::{Deserialize, Serialize};
use vmsim_error::{errinput, Error};

use crate::Result;

/// Baseline values used when a field is not supplied.
pub mod defaults {
    /// Number of physical frames.
    pub const FRAMES: usize = 3;
    /// Number of translation cache entries.
    pub const TLB_SIZE: usize = 4;
    /// Page size in bytes.
    pub const PAGE_SIZE: u64 = 4096;
}

/// Parameters of an [`crate::translator::AddressTranslator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MmuConfig {
    /// Number of physical frames. Must be at least 1.
    pub frames: usize,
    /// Number of translation cache entries. Zero disables caching.
    pub tlb_size: usize,
    /// Page size in bytes. Must be at least 1; a power of two is customary but not required.
    pub page_size: u64,
    /// Refresh a frame's last-used time on every cache or page table hit. When off, a frame's
    /// timestamp is its admission time.
    pub refresh_frames_on_hit: bool,
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            frames: defaults::FRAMES,
            tlb_size: defaults::TLB_SIZE,
            page_size: defaults::PAGE_SIZE,
            refresh_frames_on_hit: false,
        }
    }
}

impl MmuConfig {
    pub fn new(frames: usize, tlb_size: usize, page_size: u64) -> Self {
        Self {
            frames,
            tlb_size,
            page_size,
            ..Self::default()
        }
    }

    /// Sets whether hits refresh the frame's last-used time.
    pub fn with_refresh_frames_on_hit(mut self, refresh: bool) -> Self {
        self.refresh_frames_on_hit = refresh;
        self
    }

    /// Checks that the configuration describes a usable physical memory.
    pub fn validate(&self) -> Result<()> {
        if self.frames == 0 {
            return errinput!("frame capacity must be at least 1");
        }
        if self.page_size == 0 {
            return errinput!("page size must be at least 1");
        }
        // The highest physical address is frames * page_size - 1.
        u64::try_from(self.frames)
            .ok()
            .and_then(|frames| frames.checked_mul(self.page_size))
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }
}
