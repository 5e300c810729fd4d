pub mod cache;
pub mod export;
pub mod indexer;
pub mod loader;
pub mod resolver;
pub mod series;

// Re-export key types
pub use cache::DatasetCache;
pub use indexer::index;
pub use loader::{load_dataset, load_records, DatasetKey, IndexedDataset};
pub use resolver::resolve;
pub use series::TimeSeries;
