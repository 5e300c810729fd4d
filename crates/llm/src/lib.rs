pub mod decode;
pub mod extract;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use decode::DecodePath;
pub use extract::{interpret_reply, Extraction, ExtractionError, QueryExtractor};
pub use provider::{GenerateRequest, LlmError, LlmProvider, ResponseFormat};
