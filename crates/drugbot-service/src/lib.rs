mod blocking;
mod error;
mod generator;
mod workflow;

pub use blocking::BlockingWorkflow;
pub use error::ServiceError;
pub use generator::{GeneratedQuery, GeneratorConfig, QueryGenerator};
pub use workflow::{ChatWorkflow, Outcome, NO_RESULTS, REJECTED_MESSAGE};
