//! Fetch, unpack and prepare the CNTK sample projects.
//!
//! The install procedure lives in [`installer`]; network, archive and package
//! manager access sit behind traits so they can be swapped out.

pub mod config;
pub mod logging;

pub mod archive;
pub mod destination;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod package_manager;
pub mod status;
pub mod version;

pub use error::{ExtractFailure, FetchFailure, InstallError, VersionError};
pub use installer::{DependencyOutcome, InstallOptions, InstallReport, SampleInstaller, Stage};
