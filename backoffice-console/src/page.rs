//! Search page: the composition root for a form and a table.

use std::sync::Arc;

use backoffice_engine::config::TableConfig;
use backoffice_engine::events::EventResult;
use backoffice_engine::form::{FormValues, Values};
use backoffice_engine::table::{Column, PagerAction, PaginatedTable, TableView};
use backoffice_engine::validation::Schema;
use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::error::{ConsoleError, FetchError};
use crate::source::{DataSource, PageQuery};

/// A data request raised by the table's sync callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRequest {
    pub page_index: usize,
    pub page_size: usize,
}

/// A filter form over a paginated result table.
///
/// The table's sync callback only queues a [`SyncRequest`]; the page turns
/// queued requests into fetches in [`pump`](Self::pump). After every fetch
/// the page reconciles the table with the page number the source
/// confirmed, through the table handle, which never re-syncs. An expired
/// session empties the table; other failures leave the previous rows.
pub struct SearchPage<S: DataSource> {
    form: FormValues,
    table: PaginatedTable,
    source: Arc<S>,
    requests: UnboundedReceiver<SyncRequest>,
}

impl<S: DataSource> SearchPage<S> {
    pub fn new(
        source: Arc<S>,
        columns: Vec<Column>,
        config: &TableConfig,
        filters: Values,
    ) -> Result<Self, ConsoleError> {
        let (tx, requests) = mpsc::unbounded_channel();
        let table = PaginatedTable::with_config(columns, config)?
            .with_key_field("id")
            .on_sync(move |page_index, page_size| {
                if tx.send(SyncRequest { page_index, page_size }).is_err() {
                    debug!("Sync request after the page was dropped");
                }
            });
        Ok(Self {
            form: FormValues::new(filters),
            table,
            source,
            requests,
        })
    }

    /// Validate the filter form with `schema`.
    pub fn with_filter_schema(mut self, schema: impl Schema + 'static) -> Result<Self, ConsoleError> {
        self.form = self.form.schema(schema)?;
        Ok(self)
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn table(&self) -> &PaginatedTable {
        &self.table
    }

    pub fn render(&self) -> TableView {
        self.table.render()
    }

    /// Show the table. Fetches only when the table is configured to sync
    /// on mount.
    pub async fn mount(&mut self) -> Result<(), ConsoleError> {
        self.table.mount();
        self.pump().await?;
        Ok(())
    }

    /// Run a new search with the current criteria, starting at page 0.
    ///
    /// Pending pager requests belong to the previous criteria and are
    /// dropped. Criteria with errors are refused without fetching.
    pub async fn search(&mut self) -> Result<(), ConsoleError> {
        if let Some(errors) = self.form.errors() {
            return Err(ConsoleError::InvalidCriteria(errors));
        }
        let dropped = self.drain().count();
        if dropped > 0 {
            debug!("Dropped {} stale sync requests", dropped);
        }

        let handle = self.table.handle();
        handle.set_page_index(0);
        self.fetch(0, handle.page_size()).await
    }

    /// Forward a pager interaction and serve the sync it raised.
    pub async fn on_pager(&mut self, action: PagerAction) -> Result<EventResult, ConsoleError> {
        let result = self.table.dispatch(action);
        self.pump().await?;
        Ok(result)
    }

    /// Serve queued sync requests. Only the most recent one is fetched.
    /// Returns whether a fetch happened.
    pub async fn pump(&mut self) -> Result<bool, ConsoleError> {
        let Some(request) = self.drain().last() else {
            return Ok(false);
        };
        self.fetch(request.page_index, request.page_size).await?;
        Ok(true)
    }

    fn drain(&mut self) -> impl Iterator<Item = SyncRequest> + '_ {
        std::iter::from_fn(|| self.requests.try_recv().ok())
    }

    async fn fetch(&self, page_index: usize, page_size: usize) -> Result<(), ConsoleError> {
        let query = PageQuery::from_index(page_index, page_size, self.form.values());
        debug!(
            "Fetching page {} (size {}) with {} filters",
            query.page_number,
            query.page_size,
            query.filters.len()
        );

        self.table.set_loading(true);
        let result = self.source.fetch(query).await;
        self.table.set_loading(false);

        let page = match result {
            Ok(page) => page,
            Err(FetchError::SessionExpired) => {
                warn!("Session expired, clearing results");
                self.table.set_rows(Vec::new());
                self.table.set_total_record_count(0);
                return Err(FetchError::SessionExpired.into());
            }
            Err(err) => {
                warn!("Fetch failed: {}", err);
                return Err(err.into());
            }
        };
        self.table.set_rows(page.rows);
        self.table.set_total_record_count(page.total_count);
        self.table
            .handle()
            .set_page_index(page.page_number.saturating_sub(1));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use crate::fixtures;

    fn page(records: usize) -> SearchPage<InMemorySource> {
        let source = Arc::new(InMemorySource::new(fixtures::institutions(records)));
        SearchPage::new(
            source,
            vec![Column::new("Name", "name")],
            &TableConfig::default(),
            Values::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn pump_without_requests_does_nothing() {
        let mut page = page(5);
        assert!(!page.pump().await.unwrap());
        assert_eq!(page.source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn only_latest_request_is_fetched() {
        let mut page = page(100);
        page.search().await.unwrap();

        page.table.dispatch(PagerAction::Next);
        page.table.dispatch(PagerAction::Next);
        page.table.dispatch(PagerAction::Next);
        assert!(page.pump().await.unwrap());

        assert_eq!(page.source.fetch_count(), 2);
        assert_eq!(page.table.page_index(), 3);
        assert_eq!(page.render().rows[0].cells, vec!["Institution 31"]);
    }
}
