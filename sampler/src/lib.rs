//! Evaluate primitive and contracted Gaussian basis functions from a YAML configuration.

pub mod app;
pub mod config;
pub mod io;
