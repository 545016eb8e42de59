//! Reference-string workloads and the comparison run over every policy.
//!
//! A [`Scenario`] pairs a reference string with a memory configuration. Running it replays the
//! string through every [`ReplacementPolicy`] and through an [`AddressTranslator`], where page
//! `p` becomes the virtual address `p * page_size`.
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use vmsim_error::{errdata, errinput, Error};

use crate::config::{defaults, MmuConfig};
use crate::replacer::ReplacementPolicy;
use crate::stats::StatsSnapshot;
use crate::translator::AddressTranslator;
use crate::typedef::PageId;
use crate::Result;

/// Page size used by the built-in scenarios.
pub const BUILTIN_PAGE_SIZE: u64 = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub reference_string: Vec<PageId>,
    pub frames: usize,
    pub tlb_size: usize,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 {
    defaults::PAGE_SIZE
}

/// Fault count of one replacement policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PolicyFaults {
    pub policy: ReplacementPolicy,
    pub page_faults: usize,
}

/// Everything measured for one scenario.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub replacement: Vec<PolicyFaults>,
    pub translation: StatsSnapshot,
}

impl ScenarioReport {
    /// Returns the fault count recorded for `policy`.
    pub fn faults(&self, policy: ReplacementPolicy) -> Option<usize> {
        self.replacement
            .iter()
            .find(|entry| entry.policy == policy)
            .map(|entry| entry.page_faults)
    }
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        reference_string: Vec<PageId>,
        frames: usize,
        tlb_size: usize,
        page_size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            reference_string,
            frames,
            tlb_size,
            page_size,
        }
    }

    /// The three classic reference strings, each with three frames.
    pub fn builtin() -> Vec<Scenario> {
        vec![
            Scenario::new(
                "Test Case 1",
                vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5],
                3,
                4,
                BUILTIN_PAGE_SIZE,
            ),
            Scenario::new(
                "Test Case 2",
                vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2],
                3,
                2,
                BUILTIN_PAGE_SIZE,
            ),
            Scenario::new(
                "Test Case 3",
                vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 6, 7, 8],
                3,
                6,
                BUILTIN_PAGE_SIZE,
            ),
        ]
    }

    /// Returns the translator configuration for this scenario.
    pub fn mmu_config(&self) -> MmuConfig {
        MmuConfig::new(self.frames, self.tlb_size, self.page_size)
    }

    /// Runs every replacement policy and the address translator over the reference string.
    pub fn run(&self) -> Result<ScenarioReport> {
        let mut translator = AddressTranslator::new(self.mmu_config())?;
        for &page_id in &self.reference_string {
            let address = page_id
                .checked_mul(self.page_size)
                .ok_or(Error::ArithmeticOverflow)?;
            translator.translate(address);
        }

        let replacement = ReplacementPolicy::ALL
            .iter()
            .map(|&policy| PolicyFaults {
                policy,
                page_faults: policy.simulate(&self.reference_string, self.frames),
            })
            .collect();

        let report = ScenarioReport {
            name: self.name.clone(),
            replacement,
            translation: translator.stats(),
        };
        info!(
            scenario = %report.name,
            references = self.reference_string.len(),
            page_faults = report.translation.page_faults,
            cache_hits = report.translation.cache_hits,
            "scenario finished"
        );
        Ok(report)
    }
}

/// Parses a JSON array of scenarios.
pub fn load_scenarios(json: &str) -> Result<Vec<Scenario>> {
    match serde_json::from_str(json) {
        Ok(scenarios) => Ok(scenarios),
        Err(e) => errdata!("malformed scenario file: {e}"),
    }
}

/// Reads and parses a JSON scenario file.
pub fn load_scenarios_from_path(path: impl AsRef<Path>) -> Result<Vec<Scenario>> {
    let json = std::fs::read_to_string(path)?;
    load_scenarios(&json)
}

/// Parses page ids separated by commas and/or whitespace, e.g. `"7, 0 1,2"`.
pub fn parse_reference_string(input: &str) -> Result<Vec<PageId>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| -> Result<PageId> { Ok(token.parse()?) })
        .collect()
}

/// Draws `len` page ids uniformly from `0..distinct_pages`.
pub fn random_reference_string<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    distinct_pages: PageId,
) -> Result<Vec<PageId>> {
    if distinct_pages == 0 {
        return errinput!("a reference string needs at least one distinct page");
    }
    Ok((0..len).map(|_| rng.random_range(0..distinct_pages)).collect())
}
