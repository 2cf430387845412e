mod functions;
mod report;
mod sampling;

pub use functions::{build_functions, Function};
pub use report::{report_summary, FunctionReport, PointValue, Report};
pub use sampling::{numerical_norm, sample_function, sample_points};

use crate::config::{Args, Config};
use crate::io::{save_contractions, save_report, setup_output};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct SamplerApplication {
    args: Args,
    config: Config,
}

impl SamplerApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        Self::from_args(args)
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = load_config(&args.config_file)?;
        config.apply_overrides(&args);
        Ok(Self { args, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Configuration loaded:\n{:?}", self.config);

        let report = self.execute()?;
        report_summary(&report);

        if let Some(path) = &self.args.report {
            save_report(path, &report)?;
        }
        if let Some(dir) = &self.args.save_contractions {
            self.save_contractions(dir)?;
        }
        Ok(())
    }

    /// Build and sample every configured function
    pub fn execute(&self) -> Result<Report> {
        let functions = build_functions(&self.config)?;

        let normalization = if self.config.is_normalization_enabled() {
            Some(self.config.normalization_params())
        } else {
            None
        };

        let functions = functions
            .iter()
            .map(|f| sample_function(f, &self.config.points, normalization.as_ref()))
            .collect();

        Ok(Report { functions })
    }

    /// Write each configured contraction to `dir` as `cgbf_<n>.pkl`
    pub fn save_contractions(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let functions = build_functions(&self.config)?;
        let contracted: Vec<_> = functions
            .iter()
            .filter_map(|f| match f {
                Function::Contracted(c) => Some(c),
                Function::Primitive(_) => None,
            })
            .collect();
        save_contractions(dir.as_ref(), &contracted)
    }
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
