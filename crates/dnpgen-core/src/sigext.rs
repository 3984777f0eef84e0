//! SIGEXT integration
//!
//! SIGEXT extracts the `<node>.SIG` signal file from a CWave model. Running
//! it is optional: callers log a failure and fall back to an existing
//! signal file.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::config::Config;
use crate::error::{DnpGenError, Result};

/// External signal extraction tool
#[derive(Debug, Clone)]
pub struct SigExt {
    exe: PathBuf,
    flags: Vec<String>,
}

impl SigExt {
    pub fn new(exe: impl Into<PathBuf>, flags: &str) -> Self {
        Self {
            exe: exe.into(),
            flags: flags.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.sigext_path, &config.sigext_flags)
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Full argument list: flags, then model, node and output file
    pub fn args(&self, mwt: &Path, node: &str, sig: &Path) -> Vec<String> {
        let mut args = self.flags.clone();
        args.push(mwt.display().to_string());
        args.push(node.to_string());
        args.push(sig.display().to_string());
        args
    }

    /// Run SIGEXT in `working_dir` and wait for it to finish
    ///
    /// # Errors
    /// * `SigExtNotFound` - the executable does not exist
    /// * `SigExtFailed` - spawn failure or non-zero exit
    pub fn run(&self, working_dir: &Path, mwt: &Path, node: &str, sig: &Path) -> Result<()> {
        if self.exe.as_os_str().is_empty() || !self.exe.is_file() {
            return Err(DnpGenError::SigExtNotFound {
                path: self.exe.clone(),
            });
        }

        let args = self.args(mwt, node, sig);
        debug!("running {} {:?}", self.exe.display(), args);

        let output = Command::new(&self.exe)
            .args(&args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DnpGenError::SigExtFailed {
                message: format!("Failed to spawn {}: {}", self.exe.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DnpGenError::SigExtFailed {
                message: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}
