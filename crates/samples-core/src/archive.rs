//! Samples archive extraction.
//!
//! Entries are written under the destination as-is (no common-root
//! stripping). Extraction stops at the first failing entry; files already
//! written stay on disk.

use crate::error::ExtractFailure;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Unpacks an archive file into a directory.
pub trait Archive {
    /// Extracts every entry of `archive` into `dest`, creating `dest` if needed.
    /// Returns the number of entries extracted.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractFailure>;
}

impl<T: Archive + ?Sized> Archive for &T {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractFailure> {
        (**self).extract(archive, dest)
    }
}

/// Zip extractor backed by the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ExtractFailure + '_ {
    move |source| ExtractFailure::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Archive for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractFailure> {
        let file = File::open(archive).map_err(io_err(archive))?;
        let mut zip = zip::ZipArchive::new(file)?;

        fs::create_dir_all(dest).map_err(io_err(dest))?;

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;

            // `enclosed_name` is None for absolute names and names with `..`.
            let relative = entry
                .enclosed_name()
                .ok_or_else(|| ExtractFailure::UnsafeEntry(entry.name().to_string()))?;

            let out = dest.join(&relative);
            if entry.is_dir() {
                fs::create_dir_all(&out).map_err(io_err(&out))?;
                continue;
            }

            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).map_err(io_err(parent))?;
            }
            let mut outfile = File::create(&out).map_err(io_err(&out))?;
            io::copy(&mut entry, &mut outfile).map_err(io_err(&out))?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&out, fs::Permissions::from_mode(mode & 0o777))
                    .map_err(io_err(&out))?;
            }
        }

        tracing::debug!(
            archive = %archive.display(),
            dest = %dest.display(),
            entries = zip.len(),
            "archive extracted"
        );
        Ok(zip.len())
    }
}
