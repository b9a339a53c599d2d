//! Launch specifications for the ingest sequence.
//!
//! The three ingest programs are represented as data (an ordered list of
//! [`LaunchSpec`] values) rather than hardcoded calls, so the runner can
//! be exercised against fake executables in tests.

/// The ingest scripts, in their fixed execution order. Not configurable.
const INGEST_SCRIPTS: [&str; 3] = ["insert_ideas.py", "insert_jobs.py", "scraps.py"];

/// One external program to launch: a program name or path plus arguments.
///
/// A bare program name (no `/`) resolves through the activated `PATH`, so
/// `python` finds the venv interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// A spec with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument (builder style).
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// A spec that runs `script_path` through the activated `python`.
    pub fn python_script(script_path: impl Into<String>) -> Self {
        Self::new("python").arg(script_path)
    }
}

/// The fixed ingest sequence: idea ingest, then job ingest, then scraps.
///
/// Scripts are looked up under `scripts_dir`; the order never changes.
pub fn ingest_sequence(scripts_dir: &str) -> Vec<LaunchSpec> {
    INGEST_SCRIPTS
        .iter()
        .map(|script| LaunchSpec::python_script(format!("{scripts_dir}/{script}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_sequence_has_fixed_order() {
        let sequence = ingest_sequence("/opt/scout");
        let scripts: Vec<&str> = sequence
            .iter()
            .map(|spec| spec.args[0].as_str())
            .collect();
        assert_eq!(
            scripts,
            [
                "/opt/scout/insert_ideas.py",
                "/opt/scout/insert_jobs.py",
                "/opt/scout/scraps.py",
            ]
        );
    }

    #[test]
    fn ingest_sequence_runs_through_python() {
        for spec in ingest_sequence(".") {
            assert_eq!(spec.program, "python");
            assert_eq!(spec.args.len(), 1);
        }
    }

    #[test]
    fn launch_spec_builder_appends_args() {
        let spec = LaunchSpec::new("pg_dump").arg("--schema-only").arg("scout");
        assert_eq!(spec.program, "pg_dump");
        assert_eq!(spec.args, ["--schema-only", "scout"]);
    }
}
