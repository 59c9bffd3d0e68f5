//! The install procedure: check destination, fetch, extract, install requirements.
//!
//! Runs strictly in order on the calling thread:
//! `Idle -> Checked -> Fetched -> Extracted -> DependenciesHandled -> Done`.
//! Any error before `DependenciesHandled` aborts the run. The transient
//! download file is removed on every exit path once it has been created.

use crate::archive::Archive;
use crate::destination::check_destination;
use crate::error::InstallError;
use crate::fetch::Downloader;
use crate::package_manager::{CommandStatus, PackageManager, REQUIREMENTS_FILE};
use crate::status::StatusWriter;
use crate::version::{is_unreleased, SampleSource, VersionProvider};
use std::io::Write;
use std::path::{Path, PathBuf};

const UNRELEASED_WARNING: &str = "You are not on a released CNTK module version. \
    When running into problems running samples, please check \
    https://github.com/Microsoft/CNTK for updated versions";

/// Parameters of a single install run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Archive URL; `None` derives it from the installed module version.
    pub url: Option<String>,
    /// Extraction directory. Must not exist or be empty.
    pub dir: PathBuf,
    /// Suppress status messages.
    pub quiet: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            url: None,
            dir: PathBuf::from("."),
            quiet: false,
        }
    }
}

/// Linear progress of an install run (used in logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Checked,
    Fetched,
    Extracted,
    DependenciesHandled,
    Done,
}

/// What happened to the requirements manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyOutcome {
    /// Package manager ran; its exit status is not checked further.
    Installed(CommandStatus),
    /// Package manager could not be started.
    LaunchFailed(String),
    /// No `requirements.txt` at the top of the destination.
    ManifestMissing,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub url: String,
    pub bytes: u64,
    pub entries: usize,
    pub dependencies: DependencyOutcome,
}

/// Install procedure over swappable fetch, archive and package-manager capabilities.
pub struct SampleInstaller<D, A, P> {
    downloader: D,
    archive: A,
    package_manager: P,
    source: SampleSource,
}

impl<D, A, P> SampleInstaller<D, A, P>
where
    D: Downloader,
    A: Archive,
    P: PackageManager,
{
    pub fn new(downloader: D, archive: A, package_manager: P) -> Self {
        Self {
            downloader,
            archive,
            package_manager,
            source: SampleSource::default(),
        }
    }

    /// Publish location used when no URL is given.
    pub fn with_source(mut self, source: SampleSource) -> Self {
        self.source = source;
        self
    }

    /// Runs the full procedure, writing status messages to `out`.
    ///
    /// `version` is only consulted when `options.url` is `None`.
    pub fn install<W: Write>(
        &self,
        options: &InstallOptions,
        version: &dyn VersionProvider,
        out: W,
    ) -> Result<InstallReport, InstallError> {
        let mut status = StatusWriter::new(out, options.quiet);
        let mut stage = Stage::Idle;
        tracing::debug!(?stage, dir = %options.dir.display(), "install requested");

        check_destination(&options.dir)?;
        advance(&mut stage, Stage::Checked);

        let url = match &options.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => {
                let v = version.version()?;
                if is_unreleased(&v) {
                    status.warn(UNRELEASED_WARNING);
                }
                self.source.url_for(&v)
            }
        };

        let temp = tempfile::Builder::new()
            .prefix("cntk-samples-")
            .suffix(".zip")
            .tempfile()
            .map_err(InstallError::TempFile)?
            .into_temp_path();
        tracing::debug!(temp = %temp.display(), "created transient download file");

        let result =
            self.fetch_and_extract(&url, &temp, &options.dir, &mut status, &mut stage);
        if let Err(e) = temp.close() {
            tracing::warn!("failed to remove transient download file: {}", e);
        }
        let (bytes, entries) = result?;

        let dependencies = self.install_dependencies(&options.dir, &mut status);
        advance(&mut stage, Stage::DependenciesHandled);
        advance(&mut stage, Stage::Done);

        Ok(InstallReport {
            url,
            bytes,
            entries,
            dependencies,
        })
    }

    fn fetch_and_extract<W: Write>(
        &self,
        url: &str,
        temp: &Path,
        dir: &Path,
        status: &mut StatusWriter<W>,
        stage: &mut Stage,
    ) -> Result<(u64, usize), InstallError> {
        status.info(&format!("retrieving {}", url));
        let bytes = self
            .downloader
            .download(url, temp)
            .map_err(|e| InstallError::fetch(url, e))?;
        advance(stage, Stage::Fetched);

        status.info(&format!("unzipping to directory {}", dir.display()));
        let entries = self
            .archive
            .extract(temp, dir)
            .map_err(|source| InstallError::Extraction {
                archive: temp.to_path_buf(),
                dest: dir.to_path_buf(),
                source,
            })?;
        advance(stage, Stage::Extracted);

        Ok((bytes, entries))
    }

    fn install_dependencies<W: Write>(
        &self,
        dir: &Path,
        status: &mut StatusWriter<W>,
    ) -> DependencyOutcome {
        let manifest = dir.join(REQUIREMENTS_FILE);
        if !manifest.is_file() {
            status.warn(&format!(
                "file {} does not exist, modules to run the samples may be missing",
                manifest.display()
            ));
            return DependencyOutcome::ManifestMissing;
        }

        status.info("installing requirements");
        match self.package_manager.install_requirements(&manifest) {
            Ok(code) => {
                if !code.success() {
                    tracing::warn!("package manager finished with {}", code);
                }
                DependencyOutcome::Installed(code)
            }
            Err(e) => {
                tracing::warn!("package manager could not be started: {}", e);
                DependencyOutcome::LaunchFailed(e.to_string())
            }
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!(from = ?stage, to = ?next, "stage");
    *stage = next;
}
