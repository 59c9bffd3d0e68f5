//! Requirements installation through an external package manager.
//!
//! The package manager owns its own output and diagnostics; we only capture
//! whether it could be launched and how it exited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Name of the requirements manifest looked up at the top of the destination.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Exit status of an external command. `code` is `None` when the process was
/// terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Installs packages listed in a requirements manifest.
pub trait PackageManager {
    fn install_requirements(&self, manifest: &Path) -> io::Result<CommandStatus>;
}

impl<T: PackageManager + ?Sized> PackageManager for &T {
    fn install_requirements(&self, manifest: &Path) -> io::Result<CommandStatus> {
        (**self).install_requirements(manifest)
    }
}

/// Command line used to install a requirements file: `program args... <manifest>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PackageManagerCommand {
    fn default() -> Self {
        Self {
            program: "pip".to_string(),
            args: vec!["install".to_string(), "-r".to_string()],
        }
    }
}

/// Runs the configured command as a child process with inherited stdio.
#[derive(Debug, Clone, Default)]
pub struct CommandPackageManager {
    pub command: PackageManagerCommand,
}

impl CommandPackageManager {
    pub fn new(command: PackageManagerCommand) -> Self {
        Self { command }
    }

    fn build(&self, manifest: &Path) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .arg(manifest)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl PackageManager for CommandPackageManager {
    fn install_requirements(&self, manifest: &Path) -> io::Result<CommandStatus> {
        tracing::info!(
            program = %self.command.program,
            manifest = %manifest.display(),
            "running package manager"
        );
        let status = self.build(manifest).status()?;
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn default_command_is_pip_install_r() {
        let pm = CommandPackageManager::default();
        let cmd = pm.build(Path::new("out/requirements.txt"));
        assert_eq!(cmd.get_program(), OsStr::new("pip"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(
            args,
            [
                OsStr::new("install"),
                OsStr::new("-r"),
                OsStr::new("out/requirements.txt")
            ]
        );
    }

    #[test]
    fn missing_program_is_launch_error() {
        let pm = CommandPackageManager::new(PackageManagerCommand {
            program: "no-such-package-manager-xyz".to_string(),
            args: vec![],
        });
        let err = pm
            .install_requirements(Path::new("requirements.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_captured() {
        let pm = CommandPackageManager::new(PackageManagerCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 3".to_string()],
        });
        let status = pm.install_requirements(Path::new("ignored")).unwrap();
        assert_eq!(status.code, Some(3));
        assert!(!status.success());
    }

    #[test]
    fn command_status_display() {
        assert_eq!(CommandStatus { code: Some(0) }.to_string(), "exit code 0");
        assert_eq!(CommandStatus { code: None }.to_string(), "terminated by signal");
        assert!(CommandStatus { code: Some(0) }.success());
    }
}
