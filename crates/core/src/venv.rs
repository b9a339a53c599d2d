//! Virtual environment activation.
//!
//! Replaces `source <venv>/bin/activate` with an explicit value: activation
//! validates the venv layout once and produces an [`ActivatedEnv`] that is
//! applied to each child command. The runner's own process environment is
//! never mutated, so the effect of activation stays visible and testable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;

/// Errors raised while activating a virtual environment.
///
/// Every variant is fatal: if activation fails, no program may be launched.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("virtual environment not found: {0}")]
    NotFound(PathBuf),

    #[error("{0} exists but is not a virtual environment (no pyvenv.cfg)")]
    NotAVirtualEnv(PathBuf),

    #[error("virtual environment has no python interpreter at {0}")]
    MissingInterpreter(PathBuf),

    #[error("I/O error while inspecting virtual environment: {0}")]
    Io(#[from] std::io::Error),
}

/// An activated virtual environment.
///
/// Immutable after construction. Holds everything `bin/activate` would
/// have exported: the venv root (`VIRTUAL_ENV`), its `bin` directory, the
/// interpreter path, and a `PATH` value with the venv `bin` prepended.
#[derive(Debug, Clone)]
pub struct ActivatedEnv {
    venv_dir: PathBuf,
    bin_dir: PathBuf,
    python_bin: PathBuf,
    path_value: OsString,
}

impl ActivatedEnv {
    /// Validate the venv layout at `venv_dir` and build the activation value.
    ///
    /// Checks, in order: the directory exists, it carries a `pyvenv.cfg`
    /// (the marker every venv has), and `bin/python` is present.
    pub async fn activate(venv_dir: impl AsRef<Path>) -> Result<Self, ActivationError> {
        let venv_dir = venv_dir.as_ref().to_path_buf();

        match tokio::fs::metadata(&venv_dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ActivationError::NotAVirtualEnv(venv_dir)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ActivationError::NotFound(venv_dir));
            }
            Err(e) => return Err(ActivationError::Io(e)),
        }

        if tokio::fs::metadata(venv_dir.join("pyvenv.cfg")).await.is_err() {
            return Err(ActivationError::NotAVirtualEnv(venv_dir));
        }

        let bin_dir = venv_dir.join("bin");
        let python_bin = bin_dir.join("python");
        if tokio::fs::metadata(&python_bin).await.is_err() {
            return Err(ActivationError::MissingInterpreter(python_bin));
        }

        // Prepend the venv bin dir to the caller's PATH, exactly as
        // `bin/activate` does.
        let mut path_value = OsString::from(bin_dir.as_os_str());
        if let Some(existing) = std::env::var_os("PATH") {
            path_value.push(":");
            path_value.push(existing);
        }

        Ok(Self {
            venv_dir,
            bin_dir,
            python_bin,
            path_value,
        })
    }

    /// The venv root directory (exported as `VIRTUAL_ENV`).
    pub fn venv_dir(&self) -> &Path {
        &self.venv_dir
    }

    /// The venv `bin` directory.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Absolute path to the venv's python interpreter.
    pub fn python_bin(&self) -> &Path {
        &self.python_bin
    }

    /// The `PATH` value children run with (venv `bin` first).
    pub fn path_value(&self) -> &std::ffi::OsStr {
        &self.path_value
    }

    /// Apply the activation to a child command.
    ///
    /// Sets `VIRTUAL_ENV` and the prepended `PATH`, and removes
    /// `PYTHONHOME`, mirroring the exports in `bin/activate`.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("VIRTUAL_ENV", &self.venv_dir)
            .env("PATH", &self.path_value)
            .env_remove("PYTHONHOME");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
