//! Start command - provision the image, then run the checker against domains.

use anyhow::Result;

use crate::config::Config;
use crate::error::CheckerError;
use crate::image::ImageTag;
use crate::invocation::{EnvFilePolicy, InvocationRequest};
use crate::provision;
use crate::runtime::ContainerRuntime;

/// Options collected from `csp-checker start`.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub tag: ImageTag,
    pub domains: Vec<String>,
    pub short_mode: bool,
    pub ignore_network_blocks_from: Vec<String>,
    /// `--env-file-fallback` given on the command line.
    pub env_file_fallback: bool,
}

impl StartOptions {
    /// Turn the options into a run request under `config`.
    pub fn request(&self, config: &Config) -> InvocationRequest {
        let policy = if self.env_file_fallback {
            EnvFilePolicy::Fallback
        } else {
            config.env_file_policy
        };
        let env_file = if self.domains.is_empty() {
            policy.resolve(&config.base_dir)
        } else {
            None
        };

        InvocationRequest::new(self.tag.clone())
            .runtime(config.runtime.as_str())
            .domains(self.domains.clone())
            .short_mode(self.short_mode)
            .ignore_list(self.ignore_network_blocks_from.clone())
            .env_file(env_file)
    }
}

/// Execute the start command.
///
/// A non-zero exit of the checker container becomes
/// [`CheckerError::Invocation`] carrying the container's exit code.
pub fn cmd_start(runtime: &dyn ContainerRuntime, config: &Config, options: &StartOptions) -> Result<()> {
    provision::ensure(runtime, &config.base_dir, &options.tag)?;

    let request = options.request(config);
    if request.uses_env_file() {
        tracing::warn!("No domains provided; falling back to the deprecated .env file");
    }
    let argv = request.compose();

    let status = runtime.run(&argv, &config.base_dir)?;
    if !status.success() {
        return Err(CheckerError::invocation(status).into());
    }
    Ok(())
}
