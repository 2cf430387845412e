//! Command-line argument parsing for the sampler

use clap::Parser;

/// Evaluate Gaussian basis functions described in a YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the evaluation report as JSON to this path
    #[arg(short, long)]
    pub report: Option<String>,

    /// Save every contracted function as a pickle file in this directory
    #[arg(long)]
    pub save_contractions: Option<String>,

    /// Force the numerical normalization check on
    #[arg(long)]
    pub check_normalization: bool,

    /// Override quadrature subdivisions per axis
    #[arg(long)]
    pub steps: Option<usize>,

    /// Override half width of the integration cube (Bohr)
    #[arg(long)]
    pub half_width: Option<f64>,
}
