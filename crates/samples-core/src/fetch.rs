//! Archive retrieval.
//!
//! `CurlDownloader` performs a single GET with libcurl and streams the body to
//! a local file. No Range, no resume, no retry.

use crate::error::FetchFailure;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Fetches a resource into a local file.
pub trait Downloader {
    /// Downloads `url` into `dest` (created or truncated). Returns bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchFailure>;
}

impl<T: Downloader + ?Sized> Downloader for &T {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchFailure> {
        (**self).download(url, dest)
    }
}

/// libcurl-backed downloader.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlDownloader {
    /// Connect timeout; `None` leaves libcurl's default and no overall timeout is set.
    pub connect_timeout: Option<Duration>,
}

impl CurlDownloader {
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        Self { connect_timeout }
    }
}

/// Only schemes libcurl can serve a whole file from are accepted.
fn validate_url(raw: &str) -> Result<(), FetchFailure> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| FetchFailure::InvalidUrl(format!("{}: {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" | "file" => Ok(()),
        other => Err(FetchFailure::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            raw, other
        ))),
    }
}

impl Downloader for CurlDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchFailure> {
        validate_url(url)?;
        let mut file = File::create(dest)?;
        let mut written: u64 = 0;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("archive write failed: {}", e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(FetchFailure::Io(e));
        }
        performed?;

        // file:// has no status line; curl reports 0.
        let code = easy.response_code()?;
        if code != 0 && !(200..300).contains(&code) {
            return Err(FetchFailure::Http(code));
        }

        file.flush()?;
        tracing::debug!(url, bytes = written, "GET complete");
        Ok(written)
    }
}
