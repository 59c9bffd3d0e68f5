//! CLI for the CNTK sample installer.

mod install;

use anyhow::Result;
use clap::Parser;
use samples_core::config::{self, SamplesConfig};
use std::path::PathBuf;

use install::run_install;

/// Fetch the CNTK samples from a URL and extract them to a local directory.
#[derive(Debug, Parser)]
#[command(name = "cntk-samples")]
#[command(about = "CNTK Sample Installer", long_about = None)]
pub struct Cli {
    /// URL of the zip file to download (default: the archive matching the installed CNTK module).
    #[arg(short, long)]
    pub url: Option<String>,

    /// Directory to extract the samples into. Must be non-existing or empty.
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Suppress status output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Installed module version to use instead of querying Python.
    #[arg(long, value_name = "VERSION")]
    pub module_version: Option<String>,

    /// Python interpreter used to query the installed module version.
    #[arg(long, value_name = "EXE")]
    pub python: Option<String>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_default().unwrap_or_else(|e| {
            tracing::warn!("using built-in config: {:#}", e);
            SamplesConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        run_install(&self, &cfg)
    }
}

#[cfg(test)]
mod tests;
