use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use vitals_llm::LlmProvider;
use vitals_retrieval::Session;
use vitals_series::IndexedDataset;

/// Shared server state. Requests take turns on the single session.
pub struct AppState {
    pub session: Mutex<Session>,
    /// Snapshot of the session's dataset, readable while a query holds the
    /// session lock. Replaced on reload.
    pub dataset: RwLock<Arc<IndexedDataset>>,
    /// Provider used for liveness pings.
    pub llm: Arc<dyn LlmProvider>,
    /// Target of `POST /range/last/export`.
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(session: Session, export_path: PathBuf) -> Self {
        let dataset = RwLock::new(session.dataset_handle());
        let llm = session.pipeline().extractor().shared_provider();
        Self {
            session: Mutex::new(session),
            dataset,
            llm,
            export_path,
        }
    }
}
