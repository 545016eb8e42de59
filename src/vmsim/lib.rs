//! Vmsim, a pedagogical virtual memory and page replacement simulator.
//!
//! Re-exports the workspace crates under one name.
pub use vmsim_error::{Error, Result};
pub use vmsim_mmu::*;
