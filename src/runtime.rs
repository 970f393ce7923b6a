//! The container runtime as seen by the wrapper.
//!
//! Provisioning and the start command only talk to a [`ContainerRuntime`],
//! so tests can substitute a recording fake for the real `docker` CLI.

use anyhow::Result;
use std::path::Path;
use std::process::ExitStatus;

use crate::image::ImageTag;
use crate::process::Cmd;

/// What `image inspect` told us about a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Present,
    /// The runtime reported that no such image exists.
    Absent,
    /// Inspection failed for some other reason (daemon down, permissions).
    Unknown { detail: String },
}

impl ImageStatus {
    /// Classify a failed `docker image inspect` from its stderr.
    pub fn from_inspect_failure(stderr: &str) -> Self {
        let lowered = stderr.to_ascii_lowercase();
        if lowered.contains("no such image") || lowered.contains("no such object") {
            Self::Absent
        } else {
            Self::Unknown {
                detail: stderr.trim().to_string(),
            }
        }
    }
}

pub trait ContainerRuntime {
    /// Check whether `tag` exists locally.
    fn inspect_image(&self, tag: &ImageTag) -> Result<ImageStatus>;

    /// Build `tag` from the build definition in `context_dir`.
    fn build_image(&self, context_dir: &Path, tag: &ImageTag) -> Result<ExitStatus>;

    /// Execute a full command line in `cwd` with inherited stdio.
    fn run(&self, argv: &[String], cwd: &Path) -> Result<ExitStatus>;
}

/// [`ContainerRuntime`] backed by the `docker` command line (or anything
/// CLI-compatible with it, such as `podman`).
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ContainerRuntime for DockerCli {
    fn inspect_image(&self, tag: &ImageTag) -> Result<ImageStatus> {
        let result = Cmd::new(&self.program)
            .args(["image", "inspect"])
            .arg(tag)
            .allow_fail()
            .run()?;

        if result.success() {
            Ok(ImageStatus::Present)
        } else {
            Ok(ImageStatus::from_inspect_failure(&result.stderr))
        }
    }

    fn build_image(&self, context_dir: &Path, tag: &ImageTag) -> Result<ExitStatus> {
        Cmd::new(&self.program)
            .args(["build", "-t"])
            .arg(tag)
            .arg(".")
            .dir(context_dir)
            .allow_fail()
            .run_interactive()
    }

    fn run(&self, argv: &[String], cwd: &Path) -> Result<ExitStatus> {
        Cmd::from_argv(argv)?.dir(cwd).allow_fail().run_interactive()
    }
}
