//! Error taxonomy for the sample installer.
//!
//! Every variant is fatal to an install run. Package-manager failures are not
//! represented here; they are reported through `DependencyOutcome` instead.

use std::path::PathBuf;
use thiserror::Error;

/// Why the archive GET failed. Kept separate from `InstallError` so callers can
/// tell transport problems from HTTP status failures.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// URL could not be parsed or uses a scheme we do not fetch.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Curl reported an error (DNS, connection refused, TLS, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the response body to the transient file failed.
    #[error("write: {0}")]
    Io(#[from] std::io::Error),
}

/// Why unpacking the samples archive failed.
#[derive(Debug, Error)]
pub enum ExtractFailure {
    /// Not a zip file, or the central directory / an entry is corrupt.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    /// Entry name is absolute or climbs out of the destination.
    #[error("refusing to extract unsafe entry {0:?}")]
    UnsafeEntry(String),
    /// Creating or writing an extracted file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while asking the environment which module version is installed.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Query {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("{program} reported an empty version")]
    Empty { program: String },
}

#[derive(Debug, Error)]
pub enum InstallError {
    /// Destination exists and is either not a directory or not empty.
    #[error("destination {} must be non-existing or point to an empty directory", .path.display())]
    InvalidDestination { path: PathBuf },

    #[error("failed to retrieve {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchFailure,
    },

    #[error("failed to extract {} into {}", .archive.display(), .dest.display())]
    Extraction {
        archive: PathBuf,
        dest: PathBuf,
        #[source]
        source: ExtractFailure,
    },

    #[error("could not determine installed module version")]
    Version(#[from] VersionError),

    #[error("failed to create temporary download file")]
    TempFile(#[source] std::io::Error),
}

impl InstallError {
    pub(crate) fn fetch(url: &str, source: impl Into<FetchFailure>) -> Self {
        InstallError::Fetch {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
