//! Runtime layer for the bikeshare explorer.
//!
//! Ties the resolver, loader, reporters and viewer together into the
//! interactive session loop.

pub mod pager;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
