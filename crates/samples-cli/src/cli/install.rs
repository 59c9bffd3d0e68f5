//! Wires the real downloader, extractor and package manager into the installer.

use super::Cli;
use anyhow::Result;
use samples_core::archive::ZipExtractor;
use samples_core::config::SamplesConfig;
use samples_core::fetch::CurlDownloader;
use samples_core::package_manager::CommandPackageManager;
use samples_core::version::{FixedVersion, PythonModuleVersion, VersionProvider};
use samples_core::{InstallOptions, SampleInstaller};
use std::io;

pub(super) fn options_from(cli: &Cli) -> InstallOptions {
    InstallOptions {
        url: cli.url.clone().filter(|u| !u.is_empty()),
        dir: cli.dir.clone(),
        quiet: cli.quiet,
    }
}

pub(super) fn version_provider(cli: &Cli, cfg: &SamplesConfig) -> Box<dyn VersionProvider> {
    match &cli.module_version {
        Some(v) => Box::new(FixedVersion(v.clone())),
        None => Box::new(PythonModuleVersion::new(
            cli.python.clone().unwrap_or_else(|| cfg.python.clone()),
            cfg.module.clone(),
        )),
    }
}

pub fn run_install(cli: &Cli, cfg: &SamplesConfig) -> Result<()> {
    let installer = SampleInstaller::new(
        CurlDownloader::new(cfg.connect_timeout()),
        ZipExtractor,
        CommandPackageManager::new(cfg.package_manager.clone()),
    )
    .with_source(cfg.source());

    let options = options_from(cli);
    let version = version_provider(cli, cfg);
    let report = installer.install(&options, version.as_ref(), io::stdout().lock())?;

    tracing::info!(
        url = %report.url,
        bytes = report.bytes,
        entries = report.entries,
        dependencies = ?report.dependencies,
        "samples installed into {}",
        options.dir.display()
    );
    Ok(())
}
