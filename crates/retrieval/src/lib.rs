pub mod assemble;
pub mod pipeline;
pub mod session;
pub mod validate;

pub use assemble::{matching_prompts, PromptRow, RetrievalReport};
pub use pipeline::{QueryOutcome, QueryPipeline};
pub use session::{LastRange, Session};
