use serde::Serialize;
use tracing::{debug, trace};

use crate::config::MmuConfig;
use crate::frame::FrameTable;
use crate::page_table::PageTable;
use crate::stats::{Statistics, StatsSnapshot};
use crate::tlb::TranslationCache;
use crate::typedef::{FrameId, PageId, PhysAddr, Timestamp, VirtAddr};
use crate::Result;

/// How a single access was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccessOutcome {
    /// Served by the translation cache.
    CacheHit,
    /// Missed the cache but the page was resident.
    CacheMissPageHit,
    /// The page was not resident and had to be admitted.
    PageFault,
}

/// Result of translating one virtual address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub physical_address: PhysAddr,
    pub outcome: AccessOutcome,
}

impl Translation {
    pub fn was_cache_hit(&self) -> bool {
        self.outcome == AccessOutcome::CacheHit
    }

    pub fn was_page_fault(&self) -> bool {
        self.outcome == AccessOutcome::PageFault
    }

    /// Returns `(physical_address, was_cache_hit, was_page_fault)`.
    pub fn as_tuple(&self) -> (PhysAddr, bool, bool) {
        (
            self.physical_address,
            self.was_cache_hit(),
            self.was_page_fault(),
        )
    }
}

/// Translates virtual addresses through a translation cache, a page table and a bounded set of
/// physical frames.
///
/// Invariants maintained after every call to [`AddressTranslator::translate`]:
/// - the page table has exactly one entry per occupied frame, pointing at that frame;
/// - every translation cache entry agrees with the page table.
#[derive(Debug)]
pub struct AddressTranslator {
    config: MmuConfig,
    frames: FrameTable,       // Physical frame slots
    page_table: PageTable,    // Maps resident pages to frames
    tlb: TranslationCache,    // Recently used translations
    stats: Statistics,
    current_time: Timestamp,
}

impl AddressTranslator {
    /// Creates a translator with empty frames and an empty cache.
    pub fn new(config: MmuConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            frames: FrameTable::new(config.frames),
            page_table: PageTable::new(),
            tlb: TranslationCache::new(config.tlb_size),
            stats: Statistics::default(),
            current_time: 0,
            config,
        })
    }

    pub fn config(&self) -> &MmuConfig {
        &self.config
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.frames
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn translation_cache(&self) -> &TranslationCache {
        &self.tlb
    }

    /// Returns the raw counters.
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Returns the counters together with the derived rates.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Translates a virtual address to a physical address, admitting its page if necessary.
    pub fn translate(&mut self, virtual_address: VirtAddr) -> Translation {
        self.current_time += 1;
        self.stats.total_accesses += 1;
        let now = self.current_time;

        let page_size = self.config.page_size;
        let virtual_page = virtual_address / page_size;
        let offset = virtual_address % page_size;

        let (frame_id, outcome) = if let Some(frame_id) = self.tlb.lookup(virtual_page, now) {
            self.stats.cache_hits += 1;
            self.refresh_frame(frame_id, now);
            (frame_id, AccessOutcome::CacheHit)
        } else {
            self.stats.cache_misses += 1;
            let resolved = match self.page_table.lookup(virtual_page) {
                Some(frame_id) => {
                    self.refresh_frame(frame_id, now);
                    (frame_id, AccessOutcome::CacheMissPageHit)
                }
                None => {
                    self.stats.page_faults += 1;
                    (self.handle_page_fault(virtual_page, now), AccessOutcome::PageFault)
                }
            };
            self.tlb.insert(virtual_page, resolved.0, now);
            resolved
        };

        // frame_id < frames and offset < page_size, and frames * page_size fits in u64
        let physical_address = frame_id as u64 * page_size + offset;
        trace!(
            virtual_address,
            virtual_page,
            frame = frame_id,
            physical_address,
            ?outcome,
            "translated"
        );

        Translation {
            physical_address,
            outcome,
        }
    }

    /// Translates every address in order.
    pub fn translate_all<I>(&mut self, addresses: I) -> Vec<Translation>
    where
        I: IntoIterator<Item = VirtAddr>,
    {
        addresses
            .into_iter()
            .map(|address| self.translate(address))
            .collect()
    }

    /// Loads `virtual_page` into a free frame, or reclaims a frame chosen by the eviction window.
    fn handle_page_fault(&mut self, virtual_page: PageId, now: Timestamp) -> FrameId {
        let frame_id = if let Some(frame_id) = self.frames.admit(virtual_page, now) {
            frame_id
        } else {
            // A full table has at least one frame since the config rejects zero frames.
            let victim = self.frames.victim().unwrap_or(0);
            if let Some(old_page) = self.frames.replace(victim, virtual_page, now) {
                self.page_table.unbind(old_page);
                self.tlb.invalidate(old_page);
                debug!(
                    evicted_page = old_page,
                    new_page = virtual_page,
                    frame = victim,
                    "page fault evicted resident page"
                );
            }
            victim
        };

        self.page_table.bind(virtual_page, frame_id);
        frame_id
    }

    fn refresh_frame(&mut self, frame_id: FrameId, now: Timestamp) {
        if self.config.refresh_frames_on_hit {
            self.frames.touch(frame_id, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PAGE_SIZE: u64 = 1024;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("vmsim_mmu=trace")
            .try_init();
    }

    fn translator(frames: usize, tlb_size: usize) -> AddressTranslator {
        AddressTranslator::new(MmuConfig::new(frames, tlb_size, PAGE_SIZE)).unwrap()
    }

    fn run_pages(translator: &mut AddressTranslator, pages: &[PageId]) -> Vec<Translation> {
        translator.translate_all(pages.iter().map(|page| page * PAGE_SIZE))
    }

    // Checks the page table, frame table and translation cache agree with each other.
    fn assert_consistent(translator: &AddressTranslator) {
        let frames = translator.frame_table();
        let page_table = translator.page_table();
        let tlb = translator.translation_cache();

        assert_eq!(frames.occupied_count(), page_table.len());
        assert!(page_table.len() <= frames.capacity());
        assert!(tlb.len() <= tlb.capacity());

        for (page_id, frame_id) in page_table.iter() {
            let frame = frames.get(frame_id).expect("page table points past the frame table");
            assert_eq!(Some(page_id), frame.resident_page());
        }
        for entry in tlb.entries() {
            assert_eq!(Some(entry.physical_frame), page_table.lookup(entry.virtual_page));
        }
    }

    #[test]
    fn test_zero_frames_rejected() {
        assert!(AddressTranslator::new(MmuConfig::new(0, 4, PAGE_SIZE)).is_err());
    }

    #[test]
    fn test_physical_address_keeps_offset() {
        let mut translator = AddressTranslator::new(MmuConfig::new(3, 4, 4096)).unwrap();

        let first = translator.translate(5000);
        assert_eq!((904, false, true), first.as_tuple());

        let second = translator.translate(4096 * 7 + 10);
        assert_eq!((4096 + 10, false, true), second.as_tuple());

        let third = translator.translate(4100);
        assert_eq!((4, true, false), third.as_tuple());
    }

    #[test]
    fn test_repeat_access_hits_cache() {
        let mut translator = translator(2, 1);
        let first = translator.translate(3 * PAGE_SIZE + 12);
        let second = translator.translate(3 * PAGE_SIZE + 12);
        assert_eq!(AccessOutcome::PageFault, first.outcome);
        assert_eq!(AccessOutcome::CacheHit, second.outcome);
        assert_eq!(first.physical_address, second.physical_address);
    }

    #[test]
    fn test_cache_miss_page_hit() {
        let mut translator = translator(3, 1);
        let outcomes: Vec<_> = run_pages(&mut translator, &[1, 2, 1])
            .iter()
            .map(|translation| translation.outcome)
            .collect();
        assert_eq!(
            vec![
                AccessOutcome::PageFault,
                AccessOutcome::PageFault,
                AccessOutcome::CacheMissPageHit
            ],
            outcomes
        );

        let stats = translator.stats();
        assert_eq!(3, stats.cache_misses);
        assert_eq!(2, stats.page_faults);
        assert_eq!(1, translator.translation_cache().len());
        assert_consistent(&translator);
    }

    #[test]
    fn test_zero_tlb_never_hits() {
        let mut translator = translator(2, 0);
        run_pages(&mut translator, &[1, 1, 1]);
        let stats = translator.stats();
        assert_eq!(0, stats.cache_hits);
        assert_eq!(3, stats.cache_misses);
        assert_eq!(1, stats.page_faults);
    }

    #[test]
    fn test_eviction_invalidates_cache_entry() {
        let mut translator = translator(1, 4);
        run_pages(&mut translator, &[1, 2]);
        assert_eq!(None, translator.page_table().lookup(1));
        assert_eq!(1, translator.translation_cache().len());
        assert_eq!(2, translator.translation_cache().entries()[0].virtual_page);

        // Page 1 must fault again rather than hit a stale cache entry.
        let translation = translator.translate(PAGE_SIZE);
        assert!(translation.was_page_fault());
        assert_consistent(&translator);
    }

    #[test]
    fn test_eviction_window_never_reclaims_third_frame() {
        let mut translator = translator(3, 4);
        run_pages(&mut translator, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(Some(2), translator.page_table().lookup(3));
        assert_consistent(&translator);
    }

    #[test]
    fn test_refresh_frames_on_hit() {
        let config = MmuConfig::new(2, 4, PAGE_SIZE).with_refresh_frames_on_hit(true);
        let mut refreshing = AddressTranslator::new(config).unwrap();
        // Page 1 is refreshed at time 3, so page 2 becomes the victim.
        run_pages(&mut refreshing, &[1, 2, 1, 3]);
        assert_eq!(Some(0), refreshing.page_table().lookup(1));
        assert_eq!(None, refreshing.page_table().lookup(2));
        assert_eq!(Some(1), refreshing.page_table().lookup(3));

        // Without refresh, page 1 keeps its admission time and is evicted instead.
        let mut plain = translator(2, 4);
        run_pages(&mut plain, &[1, 2, 1, 3]);
        assert_eq!(None, plain.page_table().lookup(1));
        assert_eq!(Some(1), plain.page_table().lookup(2));
        assert_eq!(Some(0), plain.page_table().lookup(3));
    }

    #[test]
    fn test_belady_reference_string() {
        init_tracing();
        let mut translator = translator(3, 4);
        let translations = run_pages(&mut translator, &[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);

        let stats = translator.stats();
        assert_eq!(12, stats.total_accesses);
        assert_eq!(1, stats.cache_hits);
        assert_eq!(11, stats.cache_misses);
        assert_eq!(11, stats.page_faults);
        // The lone hit is page 3, parked in frame 2 since its admission.
        assert_eq!((2 * PAGE_SIZE, true, false), translations[9].as_tuple());
        assert_consistent(&translator);
    }

    #[test]
    fn test_small_cache_reference_string() {
        init_tracing();
        let mut translator = translator(3, 2);
        let translations = run_pages(&mut translator, &[7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2]);

        let stats = translator.stats();
        assert_eq!(13, stats.total_accesses);
        assert_eq!(1, stats.cache_hits);
        assert_eq!(12, stats.cache_misses);
        assert_eq!(11, stats.page_faults);
        assert_eq!(AccessOutcome::CacheMissPageHit, translations[4].outcome);
        assert_eq!(AccessOutcome::CacheHit, translations[11].outcome);
        assert_consistent(&translator);
    }

    #[test]
    fn test_streaming_reference_string() {
        let mut translator = translator(3, 6);
        run_pages(&mut translator, &[1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 6, 7, 8]);

        let stats = translator.stats();
        assert_eq!(13, stats.total_accesses);
        assert_eq!(1, stats.cache_hits);
        assert_eq!(12, stats.page_faults);
        assert!((stats.page_fault_rate - 12.0 / 13.0).abs() < 1e-12);
        assert!((stats.cache_hit_rate - 1.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_huge_frame_count() {
        let mut translator = AddressTranslator::new(MmuConfig::new(1 << 40, 4, 1)).unwrap();
        assert_eq!(1 << 40, translator.frame_table().capacity());

        let translations: Vec<_> = translator
            .translate_all([5, 7, 5])
            .iter()
            .map(Translation::as_tuple)
            .collect();
        assert_eq!(vec![(0, false, true), (1, false, true), (0, true, false)], translations);
        assert_eq!(2, translator.frame_table().occupied_count());
        assert_consistent(&translator);
    }

    #[test]
    fn test_fresh_translator_stats() {
        let translator = translator(3, 4);
        let stats = translator.stats();
        assert_eq!(0, stats.total_accesses);
        assert_eq!(0.0, stats.page_fault_rate);
        assert_eq!(0.0, stats.cache_hit_rate);
    }

    proptest! {
        #[test]
        fn prop_counters_and_invariants_hold(
            addresses in prop::collection::vec(0u64..64 * PAGE_SIZE, 0..200),
            frames in 1usize..6,
            tlb_size in 0usize..6,
            refresh in any::<bool>()
        ) {
            let config =
                MmuConfig::new(frames, tlb_size, PAGE_SIZE).with_refresh_frames_on_hit(refresh);
            let mut translator = AddressTranslator::new(config).unwrap();
            for address in addresses {
                let translation = translator.translate(address);
                prop_assert_eq!(address % PAGE_SIZE, translation.physical_address % PAGE_SIZE);
                prop_assert!(translation.physical_address < frames as u64 * PAGE_SIZE);
                assert_consistent(&translator);
            }

            let stats = translator.stats();
            prop_assert_eq!(stats.total_accesses, stats.cache_hits + stats.cache_misses);
            prop_assert!(stats.page_faults <= stats.cache_misses);
        }

        #[test]
        fn prop_repeat_access_is_cache_hit(
            address in any::<u32>(),
            frames in 1usize..4,
            tlb_size in 1usize..4
        ) {
            let mut translator = translator(frames, tlb_size);
            translator.translate(u64::from(address));
            prop_assert!(translator.translate(u64::from(address)).was_cache_hit());
        }
    }
}
