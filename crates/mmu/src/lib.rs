//! Address translation and page replacement engine of the Vmsim pedagogical memory simulator.
//!
//! [`translator::AddressTranslator`] resolves virtual addresses through a translation cache, a
//! page table and a bounded frame table. The [`replacer`] module holds standalone FIFO, LRU and
//! hybrid fault counters that replay reference strings without touching any translator.
pub mod config;
pub mod eviction;
pub mod frame;
pub mod page_table;
pub mod replacer;
pub mod scenario;
pub mod stats;
pub mod tlb;
pub mod translator;
pub mod typedef;

pub(crate) type Result<T> = std::result::Result<T, vmsim_error::Error>;

pub use config::MmuConfig;
pub use replacer::{count_faults, ReplacementPolicy, Replacer};
pub use scenario::{Scenario, ScenarioReport};
pub use stats::StatsSnapshot;
pub use translator::{AccessOutcome, AddressTranslator, Translation};
