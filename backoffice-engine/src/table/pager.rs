//! Pagination state machine.

use crate::config::TableConfig;

/// An interaction with the table's own pager controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    First,
    Previous,
    Next,
    Last,
    /// Jump to a zero-based page index.
    GoTo(usize),
    /// Pick a new page size from the allowed set.
    SetPageSize(usize),
}

/// Where a page change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The table's own pager controls.
    Internal,
    /// The owning page, through the [`TableHandle`](super::TableHandle).
    External,
}

/// A page or page-size transition that has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page_index: usize,
    pub page_size: usize,
    pub origin: ChangeOrigin,
}

/// Page index, page size and the server-reported total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_index: usize,
    page_size: usize,
    total_record_count: usize,
    page_sizes: Vec<usize>,
}

impl Pager {
    /// Create a pager on page 0 with the configured default size.
    ///
    /// `config` is expected to have passed [`TableConfig::validate`].
    pub fn new(config: &TableConfig) -> Self {
        Self {
            page_index: 0,
            page_size: config.default_page_size.max(1),
            total_record_count: 0,
            page_sizes: config.page_sizes.clone(),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_record_count(&self) -> usize {
        self.total_record_count
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    /// Number of pages needed for the total; zero when there are no records.
    pub fn page_count(&self) -> usize {
        self.total_record_count.div_ceil(self.page_size)
    }

    /// Index of the last page, `0` when there are no records.
    pub fn last_page_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_count() > 0 && self.page_index < self.last_page_index()
    }

    /// One-based `(first, last)` record numbers shown on the current page,
    /// or `None` when the page is past the end of the data.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        let first = self.page_index.checked_mul(self.page_size)?;
        if first >= self.total_record_count {
            return None;
        }
        let last = first.saturating_add(self.page_size).min(self.total_record_count);
        Some((first + 1, last))
    }

    /// Apply a pager interaction.
    ///
    /// Returns `None` when the action is disabled or changes nothing, in
    /// which case no state was modified. A page-size change moves back to
    /// page 0 in the same step.
    pub fn apply(&mut self, action: PagerAction) -> Option<PageChange> {
        let target = match action {
            PagerAction::First => 0,
            PagerAction::Previous if self.can_previous() => self.page_index - 1,
            PagerAction::Next if self.can_next() => self.page_index + 1,
            PagerAction::Last => self.last_page_index(),
            PagerAction::GoTo(index) if index <= self.last_page_index() => index,
            PagerAction::SetPageSize(size) => return self.apply_page_size(size),
            PagerAction::Previous | PagerAction::Next | PagerAction::GoTo(_) => return None,
        };
        if target == self.page_index {
            return None;
        }
        self.page_index = target;
        Some(self.change(ChangeOrigin::Internal))
    }

    fn apply_page_size(&mut self, size: usize) -> Option<PageChange> {
        if size == self.page_size || !self.page_sizes.contains(&size) {
            return None;
        }
        self.page_size = size;
        self.page_index = 0;
        Some(self.change(ChangeOrigin::Internal))
    }

    /// Force the page index from outside the pager. Not clamped: the owning
    /// page may reconcile the index before the total arrives.
    pub fn set_page_index(&mut self, page_index: usize) -> PageChange {
        self.page_index = page_index;
        self.change(ChangeOrigin::External)
    }

    pub fn set_total_record_count(&mut self, total: usize) {
        self.total_record_count = total;
    }

    /// The current position as a change with the given origin.
    pub fn change(&self, origin: ChangeOrigin) -> PageChange {
        PageChange {
            page_index: self.page_index,
            page_size: self.page_size,
            origin,
        }
    }
}
