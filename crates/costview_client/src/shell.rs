//! Dashboard shell: load state, refresh and delete.
//!
//! The shell owns the only mutable state of a dashboard. Each refresh fetches
//! records and summary concurrently and replaces the loaded snapshot
//! wholesale. Refreshes are numbered, and a result that arrives for anything
//! but the latest one is dropped.

use tracing::{error, info, warn};

use costview_core::{CostSnapshot, DashboardView, TableState};

use crate::api::CostApi;
use crate::error::ClientResult;

/// Message shown for any failed load, whatever the cause.
pub const LOAD_ERROR_MESSAGE: &str =
    "Failed to fetch cost data. Please ensure the backend is running and reachable.";

/// Where the dashboard is in its load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Error(String),
    Loaded(CostSnapshot),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn snapshot(&self) -> Option<&CostSnapshot> {
        match self {
            Self::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Loaded(_) => "loaded",
        }
    }
}

/// Identifies one load; only the latest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// A cost dashboard bound to a backend.
pub struct Dashboard<A> {
    api: A,
    state: LoadState,
    table: TableState,
    generation: u64,
}

impl<A: CostApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: LoadState::Idle,
            table: TableState::default(),
            generation: 0,
        }
    }

    pub fn with_table(mut self, table: TableState) -> Self {
        self.table = table;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Enter `Loading` and hand out the ticket for this load.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply the outcome of a load. Returns false if the ticket is stale and
    /// the result was dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ClientResult<CostSnapshot>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                "Dropping stale load result (generation {}, latest {})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(snapshot) => {
                info!(
                    "Loaded {} cost records ({} in summary)",
                    snapshot.records.len(),
                    snapshot.summary.total_records
                );
                LoadState::Loaded(snapshot)
            }
            Err(e) => {
                error!("Error fetching cost data: {}", e);
                LoadState::Error(LOAD_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Fetch records and summary concurrently. The first failure wins and
    /// the other result is discarded.
    pub async fn fetch(&self) -> ClientResult<CostSnapshot> {
        let (records, summary) = tokio::try_join!(self.api.list_costs(), self.api.get_summary())?;
        Ok(CostSnapshot::new(records, summary))
    }

    /// Run a full load cycle.
    pub async fn refresh(&mut self) -> &LoadState {
        let ticket = self.begin_load();
        let result = self.fetch().await;
        self.finish_load(ticket, result);
        &self.state
    }

    /// Delete a record, then reload everything.
    ///
    /// On failure the error is returned and the current state is left as it
    /// was.
    pub async fn delete(&mut self, id: i64) -> ClientResult<()> {
        if let Err(e) = self.api.delete_cost(id).await {
            warn!("Error deleting cost record {}: {}", id, e);
            return Err(e);
        }

        info!("Deleted cost record {}", id);
        self.refresh().await;
        Ok(())
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.table.set_search(term);
    }

    pub fn set_page(&mut self, page: usize) {
        self.table.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.table.set_page_size(page_size);
    }

    /// The rendered dashboard, once data is loaded.
    pub fn view(&self) -> Option<DashboardView> {
        self.state
            .snapshot()
            .map(|snapshot| DashboardView::build(&snapshot.records, &snapshot.summary, &self.table))
    }
}
