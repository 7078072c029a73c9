//! Shared types for the bikeshare explorer: errors, settings, selector
//! vocabularies, the trip model and text formatting helpers.

pub mod error;
pub mod filters;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
