//! # Giro Analytics Engine
//!
//! This crate turns a snapshot of product records into inventory performance
//! indicators: turnover, stock coverage, ABC revenue class and the
//! turnover/margin strategic quadrant.
//!
//! ## Architectural Principles
//!
//! - **Pure Calculation:** `PerformanceAnalyzer` is stateless. It takes the
//!   records of one spreadsheet and returns new enriched records; nothing is
//!   mutated or cached between calls.
//! - **Dataset-Wide Classification:** ABC classes and quadrants depend on totals
//!   and medians over the whole input, so records are always analysed together.
//! - **Undefined, Not Failed:** zero denominators produce `None` values that
//!   flow through medians, classification and the summary without raising.
//!
//! ## Public API
//!
//! - `PerformanceAnalyzer`: the analysis itself.
//! - `InventorySummary`: the KPI aggregates shown on the report.
//! - `stockout_risks`, `micos`, `filter_by_class`: alert and filter selections.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{PerformanceAnalyzer, classify_quadrant, cumulative_shares};
pub use error::AnalyticsError;
pub use report::{InventorySummary, filter_by_class, is_stockout_risk, micos, stockout_risks};
