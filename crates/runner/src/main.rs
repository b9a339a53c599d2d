//! `scout-runner` -- nightly ingest orchestrator.
//!
//! Activates the project virtual environment, then runs the three ingest
//! programs in a fixed order: `insert_ideas.py`, `insert_jobs.py`,
//! `scraps.py`. Each program inherits the runner's stdio and runs to
//! completion before the next starts.
//!
//! # Environment variables
//!
//! | Variable      | Required | Default    | Description                              |
//! |---------------|----------|------------|------------------------------------------|
//! | `VENV_DIR`    | no       | `.venv`    | Virtual environment to activate          |
//! | `SCRIPTS_DIR` | no       | `.`        | Directory containing the ingest scripts  |
//! | `ON_FAILURE`  | no       | `continue` | `continue` or `abort` on a failing step  |
//!
//! Exit code: the last executed program's exit code, or `1` if activation
//! fails or the abort policy stops the run on a spawn error.

use scout_core::launch;
use scout_core::runner;
use scout_core::venv::ActivatedEnv;
use scout_runner::config::RunnerConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout_runner=info,scout_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RunnerConfig::from_env();

    let env = match ActivatedEnv::activate(&config.venv_dir).await {
        Ok(env) => env,
        Err(err) => {
            tracing::error!(venv_dir = %config.venv_dir, error = %err, "activation failed");
            std::process::exit(1);
        }
    };
    tracing::info!(venv_dir = %config.venv_dir, "virtual environment activated");

    let sequence = launch::ingest_sequence(&config.scripts_dir);
    let report = match runner::run_sequence(&env, &sequence, config.on_failure).await {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(error = %err, "ingest sequence aborted");
            std::process::exit(1);
        }
    };

    let summary = serde_json::to_string(&report).unwrap_or_else(|_| "<unserializable>".into());
    tracing::info!(
        steps = report.steps.len(),
        exit_code = report.exit_code,
        aborted = report.aborted,
        summary = %summary,
        "ingest run finished"
    );

    // Negative codes mean the last step died on a signal; map those to 1.
    let code = if report.exit_code < 0 { 1 } else { report.exit_code };
    std::process::exit(code);
}
