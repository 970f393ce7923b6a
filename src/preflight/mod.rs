//! Preflight checks for csp-checker.
//!
//! Validates the container runtime and the build context before `start`.
//! Run with `csp-checker preflight` to check everything is ready.

mod environment;
mod host_tools;
mod types;

use anyhow::{bail, Result};

use crate::config::Config;

pub use types::{CheckResult, CheckStatus, PreflightReport};

/// Run all preflight checks.
pub fn run_preflight(config: &Config) -> PreflightReport {
    let mut checks = Vec::new();

    tracing::info!("Checking container runtime...");
    checks.extend(host_tools::check_runtime(&config.runtime));

    tracing::info!("Checking build context...");
    checks.extend(environment::check_build_context(config));

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config) -> Result<()> {
    let report = run_preflight(config);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before running.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!");
    Ok(())
}
