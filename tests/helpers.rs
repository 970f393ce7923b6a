//! Shared test utilities for csp-checker tests.

use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::Result;
use csp_checker::config::Config;
use csp_checker::runtime::{ContainerRuntime, ImageStatus};
use csp_checker::{EnvFilePolicy, ImageTag};
use tempfile::TempDir;

/// One call made against the fake runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Inspect(String),
    Build { context: PathBuf, tag: String },
    Run { argv: Vec<String>, cwd: PathBuf },
}

/// Container runtime that records calls and returns scripted results.
pub struct RecordingRuntime {
    pub image: ImageStatus,
    pub build_code: i32,
    pub run_code: i32,
    pub calls: RefCell<Vec<Call>>,
}

impl RecordingRuntime {
    pub fn new(image: ImageStatus) -> Self {
        Self {
            image,
            build_code: 0,
            run_code: 0,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn run_calls(&self) -> Vec<(Vec<String>, PathBuf)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Run { argv, cwd } => Some((argv, cwd)),
                _ => None,
            })
            .collect()
    }

    pub fn build_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Build { .. }))
            .count()
    }
}

fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

impl ContainerRuntime for RecordingRuntime {
    fn inspect_image(&self, tag: &ImageTag) -> Result<ImageStatus> {
        self.calls.borrow_mut().push(Call::Inspect(tag.to_string()));
        Ok(self.image.clone())
    }

    fn build_image(&self, context_dir: &Path, tag: &ImageTag) -> Result<ExitStatus> {
        self.calls.borrow_mut().push(Call::Build {
            context: context_dir.to_path_buf(),
            tag: tag.to_string(),
        });
        Ok(exit_status(self.build_code))
    }

    fn run(&self, argv: &[String], cwd: &Path) -> Result<ExitStatus> {
        self.calls.borrow_mut().push(Call::Run {
            argv: argv.to_vec(),
            cwd: cwd.to_path_buf(),
        });
        Ok(exit_status(self.run_code))
    }
}

/// Tool directory in a temp dir with a Dockerfile.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    pub base_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        std::fs::write(base_dir.join("Dockerfile"), "FROM node:20-slim\n")
            .expect("Failed to write Dockerfile");

        Self {
            _temp_dir: temp_dir,
            base_dir,
        }
    }

    pub fn with_env_file(self) -> Self {
        std::fs::write(self.base_dir.join(".env"), "TARGETS=example.org\n")
            .expect("Failed to write .env");
        self
    }

    pub fn config(&self) -> Config {
        Config {
            base_dir: self.base_dir.clone(),
            default_tag: ImageTag::default(),
            runtime: "docker".to_string(),
            env_file_policy: EnvFilePolicy::Ignore,
        }
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
