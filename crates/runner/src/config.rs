//! Runner configuration loaded from environment variables.

use scout_core::runner::FailurePolicy;

/// Configuration for one ingest run.
///
/// All fields have defaults suitable for running from the project root;
/// override via environment variables (a `.env` file is honored).
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Virtual environment to activate (default: `.venv`).
    pub venv_dir: String,
    /// Directory containing the ingest scripts (default: `.`).
    pub scripts_dir: String,
    /// Step-failure policy (default: `continue`).
    pub on_failure: FailurePolicy,
}

impl RunnerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var       | Default    |
    /// |---------------|------------|
    /// | `VENV_DIR`    | `.venv`    |
    /// | `SCRIPTS_DIR` | `.`        |
    /// | `ON_FAILURE`  | `continue` |
    pub fn from_env() -> Self {
        let venv_dir = std::env::var("VENV_DIR").unwrap_or_else(|_| ".venv".into());

        let scripts_dir = std::env::var("SCRIPTS_DIR").unwrap_or_else(|_| ".".into());

        let on_failure: FailurePolicy = std::env::var("ON_FAILURE")
            .unwrap_or_else(|_| "continue".into())
            .parse()
            .expect("ON_FAILURE must be 'continue' or 'abort'");

        Self {
            venv_dir,
            scripts_dir,
            on_failure,
        }
    }
}
