pub mod call;
pub mod catalog;
pub mod display;
pub mod error;
pub mod message;
pub mod session;
pub mod suggestion;
pub mod tool;

pub use call::{RawToolCall, ToolArgs, ToolCall, DEFAULT_LIMIT};
pub use error::DrugbotError;
pub use message::{ChatMessage, Transcript};
pub use session::{PendingQuery, Session};
pub use tool::QueryTool;
