//! Basis function sampler command-line interface
//!
//! Reads a YAML configuration, evaluates every listed function at the
//! requested points and optionally checks their normalization numerically.

use color_eyre::eyre::Result;
use sampler::app::SamplerApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    SamplerApplication::from_cli()?.run()
}
