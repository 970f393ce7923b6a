//! Container runtime availability checks.

use crate::process::{self, Cmd};

use super::types::CheckResult;

/// Check that the runtime program is installed and its daemon answers.
pub fn check_runtime(program: &str) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match process::which(program) {
        Some(path) => results.push(CheckResult::pass_with(program, &path.display().to_string())),
        None => {
            results.push(CheckResult::fail(
                program,
                "Not found in PATH. Install Docker (or set CSP_CHECKER_RUNTIME).",
            ));
            return results;
        }
    }

    let daemon = format!("{} daemon", program);
    match Cmd::new(program)
        .args(["info", "--format", "{{.ServerVersion}}"])
        .allow_fail()
        .run()
    {
        Ok(result) if result.success() => {
            results.push(CheckResult::pass_with(&daemon, result.stdout_trimmed()));
        }
        Ok(result) => {
            results.push(CheckResult::fail(&daemon, result.stderr_trimmed()));
        }
        Err(e) => results.push(CheckResult::fail(&daemon, &format!("{:#}", e))),
    }

    results
}
