//! `scout-core` -- orchestration logic for the nightly ingest runner.
//!
//! Activation, launch specifications, and sequential execution live here,
//! isolated from configuration and process-exit concerns (those belong to
//! the `runner` binary crate). Nothing in this crate touches global
//! process state: activation produces an explicit [`venv::ActivatedEnv`]
//! value that is applied to each child launch.

pub mod launch;
pub mod runner;
pub mod venv;

/// Shared test helpers for activation and runner tests.
#[cfg(test)]
pub(crate) mod test_helpers {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Create a minimal but valid virtual environment layout under `root`.
    ///
    /// Writes `pyvenv.cfg` and an executable `bin/python` stub, which is
    /// all [`crate::venv::ActivatedEnv::activate`] inspects.
    pub fn make_fake_venv(root: &Path) -> PathBuf {
        let venv_dir = root.join("venv");
        let bin_dir = venv_dir.join("bin");
        std::fs::create_dir_all(&bin_dir).expect("create venv bin dir");
        std::fs::write(venv_dir.join("pyvenv.cfg"), "home = /usr/bin\n")
            .expect("write pyvenv.cfg");
        write_fake_program(&bin_dir, "python", "exit 0\n");
        venv_dir
    }

    /// Write an executable bash script named `name` into `dir`.
    ///
    /// Returns the absolute path as a `String` for use in launch specs.
    pub fn write_fake_program(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).expect("create fake program");
        writeln!(f, "#!/bin/bash").expect("write shebang");
        write!(f, "{body}").expect("write body");
        drop(f);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake program");
        path.to_str().expect("utf-8 path").to_string()
    }
}
