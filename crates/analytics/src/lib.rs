//! # Return Analytics
//!
//! Pure calculations behind the returns table: the per-symbol percentage
//! return and the portfolio summary.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the
//!   price API. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function takes its inputs by value or
//!   reference and returns a fresh result, which keeps it easy to test.
//!
//! ## Public API
//!
//! - `calculate_return` / `average_return`: the two formulas.
//! - `ReturnsReport`: the rows of one run plus the average return.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod report;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use error::AnalyticsError;
pub use report::ReturnsReport;
pub use returns::{average_return, calculate_return};
