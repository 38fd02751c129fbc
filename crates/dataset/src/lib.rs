//! # Giro Dataset Crate
//!
//! The I/O boundary of the analyzer. It reads a spreadsheet export into a
//! `Table`, checks that the required columns are present, converts rows into
//! `ProductRecord`s and writes enriched records back out.
//!
//! ## Public API
//!
//! - `load_table` / `load_table_file`: parse a delimited file into a `Table`.
//! - `Table`: header plus raw cells; `validate_columns` and `to_records` live here.
//! - `write_enriched` / `write_enriched_file`: serialize the analysis result.
//! - `DatasetError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod export;
pub mod loader;
pub mod number;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use export::{DERIVED_COLUMNS, SheetLayout, write_enriched, write_enriched_file};
pub use loader::{load_table, load_table_file};
pub use table::Table;
