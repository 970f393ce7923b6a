//! Configuration management for csp-checker.
//!
//! Reads configuration from `csp-checker.env` in the tool directory and from
//! environment variables. Environment variables take precedence over the file.
//! The tool directory's `.env` belongs to the container and is never read here,
//! and neither is any `.env` in the caller's working directory.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::image::{ImageTag, DEFAULT_TAG};
use crate::invocation::{EnvFilePolicy, DEFAULT_RUNTIME, ENV_FILE_NAME};

/// Settings file in the tool directory.
pub const CONFIG_FILE_NAME: &str = "csp-checker.env";

pub const HOME_VAR: &str = "CSP_CHECKER_HOME";
pub const TAG_VAR: &str = "CSP_CHECKER_TAG";
pub const RUNTIME_VAR: &str = "CSP_CHECKER_RUNTIME";
pub const ENV_FALLBACK_VAR: &str = "CSP_CHECKER_ENV_FALLBACK";

/// csp-checker configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tool directory: build context for the image and working directory for
    /// every runtime call.
    pub base_dir: PathBuf,
    /// Tag used when `--tag` is not given.
    pub default_tag: ImageTag,
    /// Runtime program (default: docker).
    pub runtime: String,
    pub env_file_policy: EnvFilePolicy,
}

impl Config {
    /// Resolve the tool directory.
    ///
    /// `CSP_CHECKER_HOME` wins; otherwise the directory this crate was built
    /// from, which holds the Dockerfile.
    pub fn resolve_base_dir() -> PathBuf {
        std::env::var_os(HOME_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
    }

    /// Resolve the tool directory and load its configuration.
    ///
    /// Independent of the current directory.
    pub fn from_environment() -> Result<Self> {
        Self::load(&Self::resolve_base_dir())
    }

    /// Load configuration from `<base_dir>/csp-checker.env` and the environment.
    ///
    /// The file's values only feed this struct; nothing is exported to the
    /// process environment, so the runtime's children never see them.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let mut env_vars = HashMap::new();

        let config_path = base_dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            let entries = dotenvy::from_path_iter(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            for entry in entries {
                let (key, value) = entry
                    .with_context(|| format!("Invalid line in {}", config_path.display()))?;
                env_vars.insert(key, value);
            }
        }

        // Environment variables override the settings file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        let default_tag = match env_vars.get(TAG_VAR) {
            Some(tag) => ImageTag::new(tag.as_str())
                .with_context(|| format!("{} is set but empty", TAG_VAR))?,
            None => ImageTag::new(DEFAULT_TAG)?,
        };

        let runtime = env_vars
            .get(RUNTIME_VAR)
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());

        let env_file_policy = if env_vars.get(ENV_FALLBACK_VAR).is_some_and(|v| is_truthy(v)) {
            EnvFilePolicy::Fallback
        } else {
            EnvFilePolicy::Ignore
        };

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            default_tag,
            runtime,
            env_file_policy,
        })
    }

    /// Path of the Dockerfile in the build context.
    pub fn dockerfile(&self) -> PathBuf {
        self.base_dir.join("Dockerfile")
    }

    /// Path of the env file used by the fallback.
    pub fn env_file(&self) -> PathBuf {
        self.base_dir.join(ENV_FILE_NAME)
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  settings file: {}", self.base_dir.join(CONFIG_FILE_NAME).display());
        println!("  {}: {}", HOME_VAR, self.base_dir.display());
        println!("  {}: {}", TAG_VAR, self.default_tag);
        println!("  {}: {}", RUNTIME_VAR, self.runtime);
        println!(
            "  {}: {}",
            ENV_FALLBACK_VAR,
            match self.env_file_policy {
                EnvFilePolicy::Fallback => "enabled",
                EnvFilePolicy::Ignore => "disabled",
            }
        );
        if self.dockerfile().exists() {
            println!("  Dockerfile: FOUND");
        } else {
            println!("  Dockerfile: NOT FOUND (`csp-checker build` will fail)");
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
