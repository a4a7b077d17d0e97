pub mod error;
pub mod ticker;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use ticker::{TickerRequest, TickerResult, has_symbols, parse_symbols};
