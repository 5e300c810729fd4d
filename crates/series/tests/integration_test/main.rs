/// Integration tests for the health series covering file load, hour-bucket
/// indexing, inclusive range resolution, caching and JSON export.

mod export_roundtrip;
mod helpers;
mod pipeline;
