//! Page packing
//!
//! Distributes measured blocks over fixed-size pages. Blocks keep their input
//! order and are never split. A block that does not fit in the space left on
//! the current page moves to a fresh page; a block taller than an empty page
//! is placed at the top of one and clipped to the space above the footer
//! band, and that page is closed to further content. Packing never fails.
//!
//! A page counts as having content only once it holds a block of positive
//! height. Zero-height blocks still consume their gap, but a run of them never
//! forces a page break: when the next real block does not fit after them, the
//! cursor returns to the top margin of the same page instead.
//!
//! [`Packer`] works incrementally so heights can be fed in as each block is
//! rasterized; [`pack`] runs it over a known list of heights.

use tracing::{debug, warn};

/// Page parameters in page units (millimeters for PDF export)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackSettings {
    content_height: f64,
    margin: f64,
    gap: f64,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl PackSettings {
    /// Build settings from the full page height, the footer band reserved on
    /// every page, the top margin and the gap left after each block
    pub fn new(page_height: f64, footer_height: f64, margin: f64, gap: f64) -> Self {
        Self {
            content_height: non_negative(non_negative(page_height) - non_negative(footer_height)),
            margin: non_negative(margin),
            gap: non_negative(gap),
        }
    }

    /// Height above the footer band
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Space an empty page offers below the top margin
    pub fn page_capacity(&self) -> f64 {
        non_negative(self.content_height - self.margin)
    }
}

/// Where one block landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position of the block in the input sequence
    pub block: usize,
    /// 0-based page index
    pub page_index: usize,
    /// Offset of the block's top edge from the top of the page
    pub y: f64,
    /// Height drawn on the page (measured height, or less when clipped)
    pub height: f64,
    /// Height reported for the block, negatives and NaN read as 0
    pub measured: f64,
    pub clipped: bool,
}

/// One closed page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number printed in the footer
    pub number: usize,
    pub placements: Vec<Placement>,
}

impl Page {
    /// Sum of the drawn block heights
    pub fn used_height(&self) -> f64 {
        self.placements.iter().map(|p| p.height).sum()
    }

    /// Lowest edge reached by any block on the page
    pub fn bottom(&self) -> f64 {
        self.placements
            .iter()
            .map(|p| p.y + p.height)
            .fold(0.0, f64::max)
    }
}

/// Incremental page packer
#[derive(Debug)]
pub struct Packer {
    settings: PackSettings,
    cursor: f64,
    page_index: usize,
    current: Vec<Placement>,
    /// Set after a clipped block: the page takes no more content
    sealed: bool,
    pages: Vec<Page>,
    next_block: usize,
}

impl Packer {
    pub fn new(settings: PackSettings) -> Self {
        Self {
            settings,
            cursor: settings.margin,
            page_index: 0,
            current: Vec::new(),
            sealed: false,
            pages: Vec::new(),
            next_block: 0,
        }
    }

    /// Place the next block
    pub fn place(&mut self, height: f64) -> Placement {
        let measured = non_negative(height);
        let block = self.next_block;
        self.next_block += 1;

        if !self.sealed && measured <= self.space_available() {
            return self.put(block, measured, measured);
        }

        if self.sealed || self.has_content() {
            self.close_page();
        } else {
            // Only invisible blocks so far; the page still counts as empty
            self.cursor = self.settings.margin;
        }

        let capacity = self.settings.page_capacity();
        if measured > capacity {
            warn!(block, measured, capacity, page = self.page_index + 1, "block clipped to page");
            let placement = self.put(block, measured, capacity);
            self.sealed = true;
            return placement;
        }

        self.put(block, measured, measured)
    }

    /// Close the last page and return every page in order
    pub fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() {
            self.close_page();
        }
        self.pages
    }

    fn space_available(&self) -> f64 {
        self.settings.content_height - self.cursor
    }

    fn has_content(&self) -> bool {
        self.current.iter().any(|p| p.height > 0.0)
    }

    fn put(&mut self, block: usize, measured: f64, drawn: f64) -> Placement {
        let placement = Placement {
            block,
            page_index: self.page_index,
            y: self.cursor,
            height: drawn,
            measured,
            clipped: drawn < measured,
        };
        debug!(block, page = self.page_index + 1, y = placement.y, height = drawn, "block placed");
        self.current.push(placement);
        self.cursor += drawn + self.settings.gap;
        placement
    }

    fn close_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            placements: std::mem::take(&mut self.current),
        });
        self.page_index += 1;
        self.cursor = self.settings.margin;
        self.sealed = false;
    }
}

/// Pack a known sequence of block heights
pub fn pack(heights: &[f64], settings: &PackSettings) -> Vec<Page> {
    let mut packer = Packer::new(*settings);
    for &height in heights {
        packer.place(height);
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Content height 120, no margin, no gap
    fn tight() -> PackSettings {
        PackSettings::new(120.0, 0.0, 0.0, 0.0)
    }

    fn page_of_each(pages: &[Page]) -> Vec<usize> {
        let mut out: Vec<(usize, usize)> = pages
            .iter()
            .flat_map(|page| page.placements.iter().map(move |p| (p.block, page.number)))
            .collect();
        out.sort();
        out.into_iter().map(|(_, number)| number).collect()
    }

    /// Deterministic pseudo-random heights
    fn heights(seed: u64, count: usize, max: f64) -> Vec<f64> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
                unit * max - max * 0.05
            })
            .collect()
    }

    #[test]
    fn test_fits_else_overflow() {
        let pages = pack(&[50.0, 50.0, 50.0], &tight());
        assert_eq!(pages.len(), 2);
        assert_eq!(page_of_each(&pages), vec![1, 1, 2]);
        assert_eq!(pages[0].placements[1].y, 50.0);
        assert_eq!(pages[1].placements[0].y, 0.0);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let pages = pack(&[60.0, 60.0], &tight());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].used_height(), 120.0);
    }

    #[test]
    fn test_oversized_block_is_clipped() {
        let pages = pack(&[200.0, 10.0], &tight());
        assert_eq!(pages.len(), 2);

        let clipped = pages[0].placements[0];
        assert!(clipped.clipped);
        assert_eq!(clipped.height, 120.0);
        assert_eq!(clipped.measured, 200.0);
        assert_eq!(clipped.y, 0.0);

        assert_eq!(pages[1].placements[0].block, 1);
        assert_eq!(pages[1].placements[0].y, 0.0);
    }

    #[test]
    fn test_oversized_last_block_opens_no_extra_page() {
        let pages = pack(&[200.0], &tight());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_oversized_block_after_content_moves_first() {
        let pages = pack(&[30.0, 500.0, 5.0], &tight());
        assert_eq!(page_of_each(&pages), vec![1, 2, 3]);
        assert!(pages[1].placements[0].clipped);
    }

    #[test]
    fn test_clipped_page_takes_no_more_blocks() {
        let pages = pack(&[200.0, 0.0], &tight());
        assert_eq!(page_of_each(&pages), vec![1, 2]);
    }

    #[test]
    fn test_zero_and_negative_heights_are_placed() {
        let pages = pack(&[0.0, -15.0, f64::NAN, 40.0], &tight());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].placements.len(), 4);
        for placement in &pages[0].placements[..3] {
            assert_eq!(placement.height, 0.0);
            assert!(!placement.clipped);
        }
    }

    #[test]
    fn test_invisible_blocks_do_not_force_a_page_break() {
        let settings = PackSettings::new(120.0, 0.0, 0.0, 5.0);
        let pages = pack(&[0.0, 118.0], &settings);
        assert_eq!(pages.len(), 1);
        let tall = pages[0].placements[1];
        assert_eq!(tall.y, 0.0);
        assert!(!tall.clipped);
    }

    #[test]
    fn test_run_of_zero_height_blocks_stays_on_first_page() {
        let settings = PackSettings::new(120.0, 0.0, 0.0, 5.0);
        let pages = pack(&[0.0, 0.0, 0.0, 0.0, 118.0], &settings);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].placements.len(), 5);
        let tall = pages[0].placements[4];
        assert_eq!((tall.page_index, tall.y, tall.clipped), (0, 0.0, false));
    }

    #[test]
    fn test_margin_and_gap() {
        // A4 with footer: content height 262, top margin 10
        let settings = PackSettings::new(297.0, 35.0, 10.0, 5.0);
        let pages = pack(&[100.0, 100.0, 50.0], &settings);

        let ys: Vec<f64> = pages[0].placements.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![10.0, 115.0]);
        // 262 - 220 = 42 left, so the third block moves
        assert_eq!(pages[1].placements[0].y, 10.0);
    }

    #[test]
    fn test_clip_uses_space_below_margin() {
        let settings = PackSettings::new(297.0, 35.0, 10.0, 5.0);
        let pages = pack(&[400.0], &settings);
        let placement = pages[0].placements[0];
        assert_eq!(placement.y, 10.0);
        assert_eq!(placement.height, 252.0);
        assert_eq!(pages[0].bottom(), 262.0);
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        assert!(pack(&[], &tight()).is_empty());
    }

    #[test]
    fn test_footer_taller_than_page_still_places_everything() {
        let settings = PackSettings::new(100.0, 150.0, 10.0, 5.0);
        let pages = pack(&[10.0, 20.0, 0.0], &settings);
        let placed: usize = pages.iter().map(|p| p.placements.len()).sum();
        assert_eq!(placed, 3);
        assert!(pages.iter().flat_map(|p| &p.placements).all(|p| p.height == 0.0));
    }

    #[test]
    fn test_incremental_matches_batch() {
        let settings = PackSettings::new(297.0, 35.0, 10.0, 5.0);
        let input = heights(7, 40, 150.0);

        let mut packer = Packer::new(settings);
        let placements: Vec<Placement> = input.iter().map(|&h| packer.place(h)).collect();
        let pages = packer.finish();

        let batch: Vec<Placement> = pack(&input, &settings)
            .into_iter()
            .flat_map(|p| p.placements)
            .collect();
        assert_eq!(placements, batch);
        assert_eq!(pages.iter().map(|p| p.placements.len()).sum::<usize>(), input.len());
    }

    #[test]
    fn test_packing_invariants_hold_for_random_heights() {
        for seed in 1..50u64 {
            let settings = PackSettings::new(297.0, 35.0, 10.0, 5.0);
            let input = heights(seed, 30, 320.0);
            let pages = pack(&input, &settings);

            // Every block placed exactly once, in order
            let order: Vec<usize> = pages.iter().flat_map(|p| p.placements.iter().map(|pl| pl.block)).collect();
            assert_eq!(order, (0..input.len()).collect::<Vec<_>>(), "seed {}", seed);

            for (i, page) in pages.iter().enumerate() {
                // Contiguous 1-based numbering
                assert_eq!(page.number, i + 1, "seed {}", seed);
                assert!(!page.placements.is_empty());
                // Nothing reaches into the footer band
                assert!(page.bottom() <= settings.content_height() + 1e-9, "seed {}", seed);
                assert!(page.used_height() <= settings.page_capacity() + 1e-9, "seed {}", seed);
                for placement in &page.placements {
                    assert_eq!(placement.page_index, i);
                    assert!(placement.y >= settings.margin());
                    if placement.clipped {
                        let visible = page.placements.iter().filter(|p| p.height > 0.0).count();
                        assert_eq!(visible, 1, "clipped block shares page, seed {}", seed);
                    }
                }
            }
        }
    }
}
