//! Output formatting and logging utilities

use crate::app::Report;
use basis::ContractedGaussian;
use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // HH:MM:SS
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            }
            Err(err) => {
                eprintln!("Could not create output file {}: {}", path, err);
            }
        },
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
            info!("Output will be printed to stdout");
        }
    }
}

/// Write the report as pretty JSON
pub fn write_report<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).wrap_err("Failed to serialize report")?;
    writeln!(writer)?;
    Ok(())
}

/// Write the report as JSON to `path`
pub fn save_report(path: &str, report: &Report) -> Result<()> {
    let mut file =
        File::create(path).wrap_err_with(|| format!("Unable to create report file: {}", path))?;
    write_report(&mut file, report)?;
    info!("Report written to: {}", path);
    Ok(())
}

/// Save contractions as pickle files `cgbf_<n>.pkl` (1-based) under `dir`
pub fn save_contractions(dir: &Path, contracted: &[&ContractedGaussian]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Unable to create directory: {}", dir.display()))?;

    let mut paths = Vec::with_capacity(contracted.len());
    for (idx, cgbf) in contracted.iter().enumerate() {
        let path = dir.join(format!("cgbf_{}.pkl", idx + 1));
        cgbf.save_to_file(&path)
            .wrap_err_with(|| format!("Unable to save contraction to: {}", path.display()))?;
        info!("Contraction {} saved to: {}", idx + 1, path.display());
        paths.push(path);
    }
    Ok(paths)
}
