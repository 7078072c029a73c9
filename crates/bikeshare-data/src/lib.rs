//! Data layer for the bikeshare explorer.
//!
//! Loads and filters city CSV files, counts value frequencies, computes the
//! time, station, duration and user statistics and runs them as one
//! analysis pass.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod reporters;

pub use bikeshare_core as core;
