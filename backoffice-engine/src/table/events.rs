//! Pager event handling for the paginated table.

use log::{debug, trace};

use crate::config::MountSync;
use crate::events::EventResult;
use crate::state::State;

use super::pager::{ChangeOrigin, PageChange, PagerAction};
use super::state::{PaginatedTable, TableInner};

impl PaginatedTable {
    /// Handle an interaction with the table's own pager controls.
    ///
    /// An enabled action is an Internal change: the new position is applied
    /// in one step (a page-size change resets to page 0 in the same step)
    /// and the sync callback runs exactly once with it. Disabled actions
    /// are ignored and do not sync.
    pub fn dispatch(&self, action: PagerAction) -> EventResult {
        let change = self.state.update(|inner| {
            let change = inner.pager.apply(action)?;
            inner.last_origin = Some(ChangeOrigin::Internal);
            Some(change)
        });

        match change {
            Some(change) => {
                debug!("{}: pager {:?} -> {:?}", self.id_string(), action, change);
                self.sync(change);
                EventResult::Consumed
            }
            None => {
                trace!("{}: pager {:?} ignored", self.id_string(), action);
                EventResult::Ignored
            }
        }
    }

    /// Called by the renderer when the table is first shown.
    ///
    /// With [`MountSync::Skip`] (the default) this never syncs: the owning
    /// page performs the first fetch itself. With [`MountSync::Immediate`]
    /// the first call syncs `(0, page_size)` once. Later calls do nothing.
    pub fn mount(&self) -> EventResult {
        let change = self.state.update(|inner| {
            if inner.mounted {
                return None;
            }
            inner.mounted = true;
            match inner.mount_sync {
                MountSync::Skip => None,
                MountSync::Immediate => {
                    inner.last_origin = Some(ChangeOrigin::Internal);
                    Some(inner.pager.change(ChangeOrigin::Internal))
                }
            }
        });

        match change {
            Some(change) => {
                debug!("{}: initial sync on mount", self.id_string());
                self.sync(change);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.state.read(|inner| inner.mounted)
    }

    /// Run the sync callback outside the state lock so it may re-enter the
    /// table.
    fn sync(&self, change: PageChange) {
        let Some(callback) = self.on_sync.as_ref() else {
            return;
        };
        let _syncing = SyncingGuard::enter(&self.state);
        callback(change.page_index, change.page_size);
    }
}

/// Holds the `syncing` flag for the duration of a callback, including one
/// that unwinds.
struct SyncingGuard<'a> {
    state: &'a State<TableInner>,
}

impl<'a> SyncingGuard<'a> {
    fn enter(state: &'a State<TableInner>) -> Self {
        state.update(|inner| inner.syncing = true);
        Self { state }
    }
}

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.state.update(|inner| inner.syncing = false);
    }
}
