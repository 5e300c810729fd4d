pub mod config;
pub mod error;
pub mod query;
pub mod record;

pub use config::Config;
pub use error::*;
pub use query::ExtractedQuery;
pub use record::{HealthRecord, HourBucketKey, InvalidBucketKey};
