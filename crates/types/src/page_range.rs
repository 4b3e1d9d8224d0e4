use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An inclusive, zero-based range of pages. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRange")]
pub struct PageRange {
    start: usize,
    end: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("page range ends at {end} before it starts at {start}")]
pub struct ReversedPageRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Deserialize)]
struct RawPageRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawPageRange> for PageRange {
    type Error = ReversedPageRange;

    fn try_from(raw: RawPageRange) -> Result<Self, Self::Error> {
        PageRange::new(raw.start, raw.end).ok_or(ReversedPageRange {
            start: raw.start,
            end: raw.end,
        })
    }
}

impl PageRange {
    /// Selects every page the layout produced, however many that is.
    pub const ALL_PAGES: PageRange = PageRange {
        start: 0,
        end: usize::MAX,
    };

    /// Returns `None` when `end < start`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn single(page: usize) -> Self {
        Self {
            start: page,
            end: page,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_all_pages(&self) -> bool {
        *self == Self::ALL_PAGES
    }

    pub fn contains(&self, page: usize) -> bool {
        (self.start..=self.end).contains(&page)
    }

    /// Clamps the range to a document with `page_count` pages.
    pub fn clamp_to(&self, page_count: usize) -> Option<PageRange> {
        if page_count == 0 || self.start >= page_count {
            return None;
        }
        Some(PageRange {
            start: self.start,
            end: self.end.min(page_count - 1),
        })
    }

    /// The zero-based page indices selected by `ranges` in a document of
    /// `page_count` pages, in order and without duplicates.
    pub fn select(ranges: &[PageRange], page_count: usize) -> Vec<usize> {
        let mut selected: Vec<usize> = ranges
            .iter()
            .filter_map(|r| r.clamp_to(page_count))
            .flat_map(|r| r.start..=r.end)
            .collect();
        selected.sort_unstable();
        selected.dedup();
        selected
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all_pages() {
            write!(f, "all pages")
        } else if self.start == self.end {
            write!(f, "page {}", self.start + 1)
        } else {
            write!(f, "pages {}-{}", self.start + 1, self.end + 1)
        }
    }
}
