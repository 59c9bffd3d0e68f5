use crate::package_manager::PackageManagerCommand;
use crate::version::{SampleSource, DEFAULT_BASE_URL, DEFAULT_PRODUCT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/cntk-samples/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplesConfig {
    /// Where sample archives are published (no trailing slash needed).
    pub base_url: String,
    /// Product prefix in the archive name (`<product>-Samples-<version>.zip`).
    pub product: String,
    /// Python interpreter used to query the installed module version.
    pub python: String,
    /// Module whose `__version__` selects the samples archive.
    pub module: String,
    /// Command that installs a requirements file; the manifest path is appended.
    #[serde(default)]
    pub package_manager: PackageManagerCommand,
    /// Optional connect timeout in seconds (None = libcurl default, no overall timeout).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            python: "python".to_string(),
            module: "cntk".to_string(),
            package_manager: PackageManagerCommand::default(),
            connect_timeout_secs: None,
        }
    }
}

impl SamplesConfig {
    pub fn source(&self) -> SampleSource {
        SampleSource {
            base_url: self.base_url.clone(),
            product: self.product.clone(),
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

/// `~/.config/cntk-samples/config.toml` (not created).
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cntk-samples")?;
    Ok(xdg_dirs
        .get_config_home()
        .join("cntk-samples")
        .join("config.toml"))
}

/// Load configuration from disk, falling back to built-in defaults if none exists.
///
/// Nothing is written: the install destination check must be the first
/// side effect of a run.
pub fn load_or_default() -> Result<SamplesConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SamplesConfig::default());
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SamplesConfig = toml::from_str(&data)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
