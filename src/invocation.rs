//! Assembly of the `docker run` command line for the checker container.
//!
//! The order of the produced tokens is a contract with the checker's own
//! argument parser:
//!
//! ```text
//! docker run --rm [--env-file <path>] <tag> [--short]
//!     [--ignore-network-blocks-from <domain>... --] [<domain>...]
//! ```
//!
//! The image tag always comes before the checker's flags. The ignore-list is
//! variadic inside the container, so it is closed with a literal `--` before
//! the target domains follow.

use std::path::{Path, PathBuf};

use crate::image::ImageTag;

/// Runtime program used when nothing else is configured.
pub const DEFAULT_RUNTIME: &str = "docker";

pub const SHORT_FLAG: &str = "--short";
pub const IGNORE_FLAG: &str = "--ignore-network-blocks-from";
pub const END_OF_FLAGS: &str = "--";

/// Name of the env file consulted by the deprecated fallback.
pub const ENV_FILE_NAME: &str = ".env";

/// Whether a `.env` next to the tool replaces missing domains.
///
/// `Fallback` reproduces an older behavior where running without domains
/// passed `--env-file <tool dir>/.env` to the container instead. The
/// ignore-list behavior is the canonical one; this stays off unless asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvFilePolicy {
    #[default]
    Ignore,
    Fallback,
}

impl EnvFilePolicy {
    /// Path of the env file to pass, if the policy allows it and it exists.
    ///
    /// Only existence is checked; the contents belong to the container.
    pub fn resolve(self, base_dir: &Path) -> Option<PathBuf> {
        match self {
            Self::Ignore => None,
            Self::Fallback => {
                let path = base_dir.join(ENV_FILE_NAME);
                path.is_file().then_some(path)
            }
        }
    }
}

/// Everything needed to compose one run invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationRequest {
    /// Program that talks to the container runtime. `docker` by default.
    pub runtime: Option<String>,
    pub tag: ImageTag,
    pub domains: Vec<String>,
    pub short_mode: bool,
    pub ignore_list: Vec<String>,
    /// Env file used in place of domains (deprecated fallback).
    pub env_file: Option<PathBuf>,
}

impl InvocationRequest {
    pub fn new(tag: ImageTag) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn domains(mut self, domains: Vec<String>) -> Self {
        self.domains = domains;
        self
    }

    pub fn short_mode(mut self, short_mode: bool) -> Self {
        self.short_mode = short_mode;
        self
    }

    pub fn ignore_list(mut self, ignore_list: Vec<String>) -> Self {
        self.ignore_list = ignore_list;
        self
    }

    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn env_file(mut self, env_file: Option<PathBuf>) -> Self {
        self.env_file = env_file;
        self
    }

    /// True if the env file will stand in for the domain list.
    pub fn uses_env_file(&self) -> bool {
        self.domains.is_empty() && self.env_file.is_some()
    }

    /// Produce the full argument vector, program first.
    ///
    /// Running without domains is allowed: a warning is logged and the
    /// container decides what to do with an empty target list.
    pub fn compose(&self) -> Vec<String> {
        let runtime = self.runtime.as_deref().unwrap_or(DEFAULT_RUNTIME);
        let mut argv = vec![runtime.to_string(), "run".to_string(), "--rm".to_string()];

        // docker options must precede the image
        if self.domains.is_empty() {
            if let Some(env_file) = &self.env_file {
                argv.push("--env-file".to_string());
                argv.push(env_file.to_string_lossy().into_owned());
            }
        }

        argv.push(self.tag.to_string());

        if self.short_mode {
            argv.push(SHORT_FLAG.to_string());
        }

        if !self.ignore_list.is_empty() {
            argv.push(IGNORE_FLAG.to_string());
            argv.extend(self.ignore_list.iter().cloned());
            argv.push(END_OF_FLAGS.to_string());
        }

        if !self.domains.is_empty() {
            argv.extend(self.domains.iter().cloned());
        } else if self.env_file.is_none() {
            tracing::warn!("No domains provided; container may error if it expects args.");
        }

        argv
    }
}

/// Compose the `docker run` argument vector for the checker.
///
/// Shorthand for an [`InvocationRequest`] with the default runtime and no
/// env-file fallback.
pub fn compose(tag: &str, domains: &[String], short_mode: bool, ignore_list: &[String]) -> Vec<String> {
    InvocationRequest {
        tag: ImageTag(tag.to_string()),
        domains: domains.to_vec(),
        short_mode,
        ignore_list: ignore_list.to_vec(),
        ..InvocationRequest::default()
    }
    .compose()
}
