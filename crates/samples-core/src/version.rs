//! Module version handling and default sample URL resolution.
//!
//! The installed module version is always passed in explicitly; discovering it
//! is the job of a `VersionProvider`.

use crate::error::VersionError;
use std::process::Command;

/// Trailing marker on development (non-release) builds, e.g. `2.5.1+`.
pub const UNRELEASED_MARKER: char = '+';

pub const DEFAULT_BASE_URL: &str = "https://cntk.ai/Samples";
pub const DEFAULT_PRODUCT: &str = "CNTK";

/// Where sample archives are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSource {
    /// Base URL without trailing slash, e.g. `https://cntk.ai/Samples`.
    pub base_url: String,
    /// Product prefix used in the archive name.
    pub product: String,
}

impl Default for SampleSource {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
        }
    }
}

impl SampleSource {
    /// URL of the samples archive for `version`:
    /// `<base_url>/<product>-Samples-<Version>.zip`.
    pub fn url_for(&self, version: &str) -> String {
        format!(
            "{}/{}-Samples-{}.zip",
            self.base_url.trim_end_matches('/'),
            self.product,
            archive_version(version)
        )
    }
}

/// True if `version` carries the unreleased marker.
pub fn is_unreleased(version: &str) -> bool {
    version.ends_with(UNRELEASED_MARKER)
}

/// Default samples URL for `version` on the public download site.
pub fn default_url(version: &str) -> String {
    SampleSource::default().url_for(version)
}

/// `2.5.1+` -> `2-5-1`, `2.0.rc1` -> `2-0-Rc1`.
fn archive_version(version: &str) -> String {
    let version = version.strip_suffix(UNRELEASED_MARKER).unwrap_or(version);
    version
        .replace('.', "-")
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Source of the installed module's version string.
pub trait VersionProvider {
    fn version(&self) -> Result<String, VersionError>;
}

/// Version given up front (e.g. `--module-version`).
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionProvider for FixedVersion {
    fn version(&self) -> Result<String, VersionError> {
        Ok(self.0.clone())
    }
}

/// Asks a Python interpreter for `<module>.__version__`.
#[derive(Debug, Clone)]
pub struct PythonModuleVersion {
    pub python: String,
    pub module: String,
}

impl PythonModuleVersion {
    pub fn new(python: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            module: module.into(),
        }
    }

    fn script(&self) -> String {
        format!("import {m}; print({m}.__version__)", m = self.module)
    }
}

impl VersionProvider for PythonModuleVersion {
    fn version(&self) -> Result<String, VersionError> {
        let output = Command::new(&self.python)
            .args(["-c", &self.script()])
            .output()
            .map_err(|source| VersionError::Launch {
                program: self.python.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VersionError::Query {
                program: self.python.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            return Err(VersionError::Empty {
                program: self.python.clone(),
            });
        }
        tracing::debug!(python = %self.python, module = %self.module, %version, "queried module version");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreleased_marker_detected() {
        assert!(is_unreleased("2.5.1+"));
        assert!(!is_unreleased("2.5.1"));
        assert!(!is_unreleased("+2.5.1"));
    }

    #[test]
    fn unreleased_version_url_drops_marker() {
        let v = "2.5.1+";
        assert!(is_unreleased(v));
        assert_eq!(
            default_url(v),
            "https://cntk.ai/Samples/CNTK-Samples-2-5-1.zip"
        );
    }

    #[test]
    fn released_version_url_is_dash_joined() {
        let url = default_url("2.0.0");
        assert!(url.ends_with("CNTK-Samples-2-0-0.zip"));
        let name = url.rsplit('/').next().unwrap();
        assert_eq!(name.matches('.').count(), 1, "only the .zip dot remains");
    }

    #[test]
    fn components_are_title_cased() {
        assert_eq!(archive_version("2.0.beta12"), "2-0-Beta12");
        assert_eq!(archive_version("2.0.RC1"), "2-0-Rc1");
        assert_eq!(archive_version("1.7-ALPHA.3"), "1-7-Alpha-3");
    }

    #[test]
    fn empty_components_are_kept() {
        assert_eq!(archive_version("2..1"), "2--1");
        assert_eq!(archive_version(""), "");
    }

    #[test]
    fn only_one_marker_is_stripped() {
        assert_eq!(archive_version("2.5++"), "2-5+");
    }

    #[test]
    fn custom_source_trims_trailing_slash() {
        let source = SampleSource {
            base_url: "http://mirror.local/samples/".to_string(),
            product: "Demo".to_string(),
        };
        assert_eq!(
            source.url_for("1.0"),
            "http://mirror.local/samples/Demo-Samples-1-0.zip"
        );
    }

    #[test]
    fn fixed_version_returns_value() {
        let v = FixedVersion("2.7".to_string()).version().unwrap();
        assert_eq!(v, "2.7");
    }

    #[test]
    fn python_version_launch_failure() {
        let provider = PythonModuleVersion::new("definitely-not-a-python-binary-xyz", "cntk");
        match provider.version() {
            Err(VersionError::Launch { program, .. }) => {
                assert_eq!(program, "definitely-not-a-python-binary-xyz")
            }
            other => panic!("expected launch failure, got {:?}", other),
        }
    }

    #[test]
    fn python_script_imports_module() {
        let provider = PythonModuleVersion::new("python3", "cntk");
        assert_eq!(provider.script(), "import cntk; print(cntk.__version__)");
    }
}
