//! Build context checks.

use crate::config::Config;
use crate::invocation::EnvFilePolicy;

use super::types::CheckResult;

/// Check the tool directory holds what `build` and `start` need.
pub fn check_build_context(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if config.base_dir.is_dir() {
        results.push(CheckResult::pass_with(
            "tool directory",
            &config.base_dir.display().to_string(),
        ));
    } else {
        results.push(CheckResult::fail(
            "tool directory",
            &format!("{} does not exist", config.base_dir.display()),
        ));
    }

    if config.dockerfile().is_file() {
        results.push(CheckResult::pass("Dockerfile"));
    } else {
        results.push(CheckResult::fail(
            "Dockerfile",
            &format!(
                "{} not found - the image cannot be built",
                config.dockerfile().display()
            ),
        ));
    }

    let env_file = config.env_file();
    match (config.env_file_policy, env_file.is_file()) {
        (EnvFilePolicy::Fallback, true) => {
            results.push(CheckResult::pass_with(".env", "used when no domains are given"));
        }
        (EnvFilePolicy::Fallback, false) => {
            results.push(CheckResult::warn(
                ".env",
                "fallback enabled but no .env found; runs without domains get no targets",
            ));
        }
        (EnvFilePolicy::Ignore, true) => {
            results.push(CheckResult::pass_with(".env", "present (fallback disabled)"));
        }
        (EnvFilePolicy::Ignore, false) => {}
    }

    results
}
