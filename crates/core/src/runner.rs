//! Sequential execution of launch specifications.
//!
//! [`run_program`] launches one child with the activated environment
//! applied, stdio inherited, and waits for it to finish. [`run_sequence`]
//! drives the ordered list under a [`FailurePolicy`]. There is no timeout,
//! no retry, and never more than one child in flight.

use std::str::FromStr;
use std::time::Instant;

use serde::Serialize;
use tokio::process::Command;

use crate::launch::LaunchSpec;
use crate::venv::ActivatedEnv;

/// Exit code recorded when a program cannot be spawned (shell convention).
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// What to do when a step fails.
///
/// The default is [`Continue`](Self::Continue): a failing step is reported
/// and the remaining steps still run. [`Abort`](Self::Abort) halts the
/// sequence at the first non-zero exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Continue,
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "invalid failure policy '{other}' (expected 'continue' or 'abort')"
            )),
        }
    }
}

/// Errors raised while launching a program (before it produces an exit code).
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("program not found: {0}")]
    NotFound(String),

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Result of one executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Program name or path as given in the launch spec.
    pub program: String,
    /// Arguments the program ran with.
    pub args: Vec<String>,
    /// Process exit code (`-1` if killed by signal, `127` if the program
    /// could not be spawned under the continue policy).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl StepOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Result of a whole sequence run.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceReport {
    /// Outcomes of the steps that executed, in order.
    pub steps: Vec<StepOutcome>,
    /// Exit code of the last executed step.
    pub exit_code: i32,
    /// Whether the abort policy cut the sequence short.
    pub aborted: bool,
}

/// Launch one program with the activated environment and wait for it.
///
/// Stdio is inherited: the ingest programs own their diagnostics, and the
/// runner captures nothing. An explicit path (containing `/`) is checked
/// for existence up front; a bare name resolves through the activated
/// `PATH` at spawn time.
pub async fn run_program(
    env: &ActivatedEnv,
    spec: &LaunchSpec,
) -> Result<StepOutcome, LaunchError> {
    if spec.program.contains('/') && tokio::fs::metadata(&spec.program).await.is_err() {
        return Err(LaunchError::NotFound(spec.program.clone()));
    }

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    env.apply(&mut cmd);

    let start = Instant::now();
    let status = cmd.status().await.map_err(|source| LaunchError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    Ok(StepOutcome {
        program: spec.program.clone(),
        args: spec.args.clone(),
        exit_code: status.code().unwrap_or(-1),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Run each spec in order under the given policy.
///
/// Under [`FailurePolicy::Continue`], a step that exits non-zero (or
/// cannot be spawned, recorded as exit 127) is logged and the next step
/// still runs. Under [`FailurePolicy::Abort`], the first failure ends the
/// sequence; a spawn failure is returned as an error.
pub async fn run_sequence(
    env: &ActivatedEnv,
    specs: &[LaunchSpec],
    policy: FailurePolicy,
) -> Result<SequenceReport, LaunchError> {
    let mut steps = Vec::with_capacity(specs.len());
    let mut exit_code = 0;
    let mut aborted = false;

    for spec in specs {
        tracing::info!(program = %spec.program, args = ?spec.args, "running ingest step");

        let outcome = match run_program(env, spec).await {
            Ok(outcome) => outcome,
            Err(err) => match policy {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Continue => {
                    tracing::warn!(
                        program = %spec.program,
                        error = %err,
                        "step could not be launched, continuing"
                    );
                    StepOutcome {
                        program: spec.program.clone(),
                        args: spec.args.clone(),
                        exit_code: EXIT_COMMAND_NOT_FOUND,
                        duration_ms: 0,
                    }
                }
            },
        };

        if outcome.success() {
            tracing::info!(
                program = %outcome.program,
                duration_ms = outcome.duration_ms,
                "ingest step completed"
            );
        } else {
            tracing::warn!(
                program = %outcome.program,
                exit_code = outcome.exit_code,
                "ingest step failed"
            );
        }

        exit_code = outcome.exit_code;
        let failed = !outcome.success();
        steps.push(outcome);

        if failed && policy == FailurePolicy::Abort {
            aborted = true;
            break;
        }
    }

    Ok(SequenceReport {
        steps,
        exit_code,
        aborted,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
