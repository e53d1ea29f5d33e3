//! Imperative handle held by a table's owning page.

use log::debug;

use crate::state::State;

use super::pager::ChangeOrigin;
use super::state::TableInner;

/// Read/write access to a table's pagination for its owning page.
///
/// The handle shares the table's state cell but exposes only the page
/// position and total. Forcing the page index through the handle is an
/// External change and never invokes the sync callback: it reconciles the
/// display with a fetch the owning page already started.
#[derive(Debug, Clone)]
pub struct TableHandle {
    state: State<TableInner>,
}

impl TableHandle {
    pub(super) fn new(state: State<TableInner>) -> Self {
        Self { state }
    }

    pub fn page_index(&self) -> usize {
        self.state.read(|inner| inner.pager.page_index())
    }

    pub fn page_size(&self) -> usize {
        self.state.read(|inner| inner.pager.page_size())
    }

    pub fn total_record_count(&self) -> usize {
        self.state.read(|inner| inner.pager.total_record_count())
    }

    /// Force the table to `page_index`. The last call wins.
    pub fn set_page_index(&self, page_index: usize) {
        let change = self.state.update(|inner| {
            let change = inner.pager.set_page_index(page_index);
            inner.last_origin = Some(ChangeOrigin::External);
            change
        });
        debug!(
            "Page index set externally to {} (size {})",
            change.page_index, change.page_size
        );
    }
}
