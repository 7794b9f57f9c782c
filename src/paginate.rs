//! Grouping of extracted records into slide-sized pages.
//!
//! A page holds up to [`PAGE_CAPACITY`] records that share one title and one
//! subtitle. Three things close the accumulating page: the capacity is
//! reached, the title changes, or the subtitle changes. A group that spills
//! past capacity continues on a structurally new page carrying the same
//! title and subtitle. Input order is preserved exactly; pagination never
//! re-sorts.

use crate::error::{Error, Result};
use crate::model::Record;

/// Maximum number of records shown on one slide (5 columns by 4 rows).
pub const PAGE_CAPACITY: usize = 20;

/// An ordered group of records that will share one slide.
///
/// Always non-empty; every record carries the same title and subtitle.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    records: Vec<Record>,
}

impl Page {
    fn new(records: Vec<Record>) -> Self {
        debug_assert!(!records.is_empty());
        Self { records }
    }

    /// Slide title, shared by every record on the page.
    pub fn title(&self) -> &str {
        &self.records[0].title
    }

    /// Slide subtitle, shared by every record on the page.
    pub fn subtitle(&self) -> &str {
        &self.records[0].subtitle
    }

    /// Number of records on the page (1..=[`PAGE_CAPACITY`]).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; pages are created non-empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records on this page, in input order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Group an ordered record sequence into pages.
///
/// Consumes the records; each ends up on exactly one page. Fails with
/// [`Error::NoRecords`] on empty input (extraction guarantees at least one
/// record, so hitting this indicates a caller defect).
pub fn paginate(records: Vec<Record>) -> Result<Vec<Page>> {
    let first = records.first().ok_or(Error::NoRecords)?;
    let mut current_title = first.title.clone();
    let mut current_subtitle = first.subtitle.clone();

    let mut pages = Vec::new();
    let mut accumulator: Vec<Record> = Vec::new();

    for record in records {
        if accumulator.len() == PAGE_CAPACITY
            || record.title != current_title
            || record.subtitle != current_subtitle
        {
            if !accumulator.is_empty() {
                pages.push(Page::new(std::mem::take(&mut accumulator)));
            }
            current_title = record.title.clone();
            current_subtitle = record.subtitle.clone();
        }
        accumulator.push(record);
    }

    // The loop never emits the trailing group on its own.
    if !accumulator.is_empty() {
        pages.push(Page::new(accumulator));
    }

    log::debug!("Paginated into {} page(s)", pages.len());
    Ok(pages)
}
