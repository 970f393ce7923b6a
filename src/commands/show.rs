//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::invocation::InvocationRequest;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show the run command without executing it
    Command(InvocationRequest),
}

/// Execute the show command.
pub fn cmd_show(config: &Config, target: ShowTarget) -> Result<()> {
    match target {
        ShowTarget::Config => config.print(),
        ShowTarget::Command(request) => println!("{}", request.compose().join(" ")),
    }
    Ok(())
}
