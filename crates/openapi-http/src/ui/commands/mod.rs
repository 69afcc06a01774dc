pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, GenerateOutcome, generate_requests, log_stream_is_terminal};
pub use list::list_operations;
