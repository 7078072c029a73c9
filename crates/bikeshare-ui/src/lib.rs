//! Terminal presentation for the bikeshare explorer.
//!
//! Everything here writes plain lines: the [`prompt::Console`] owns the
//! input/output pair, [`report_view`] renders statistics and [`table_view`]
//! renders raw rows.

pub mod prompt;
pub mod report_view;
pub mod table_view;

pub use bikeshare_core as core;
