//! Input/Output operations for the sampler
//!
//! This module handles logging setup and report output.

mod output;

pub use output::{save_contractions, save_report, setup_output, write_report};
