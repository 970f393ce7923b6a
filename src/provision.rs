//! Image provisioning: make sure the checker image exists before running it.

use anyhow::Result;
use std::path::Path;

use crate::error::CheckerError;
use crate::image::ImageTag;
use crate::runtime::{ContainerRuntime, ImageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    AlreadyPresent,
    Built,
}

/// Ensure `tag` exists locally, building it from `context_dir` if not.
///
/// An inspection that fails for reasons other than a missing image is logged
/// and then handled like a missing image: the build either fixes it or
/// reports the real problem.
pub fn ensure(
    runtime: &dyn ContainerRuntime,
    context_dir: &Path,
    tag: &ImageTag,
) -> Result<ProvisionOutcome> {
    match runtime.inspect_image(tag)? {
        ImageStatus::Present => {
            tracing::debug!("image {} present", tag);
            return Ok(ProvisionOutcome::AlreadyPresent);
        }
        ImageStatus::Absent => {
            tracing::info!("Image {} not found, building...", tag);
        }
        ImageStatus::Unknown { detail } => {
            tracing::warn!("Could not inspect image {}: {}", tag, detail);
            tracing::info!("Building {} anyway...", tag);
        }
    }

    build(runtime, context_dir, tag)?;
    Ok(ProvisionOutcome::Built)
}

/// Build `tag` from `context_dir` unconditionally.
pub fn build(runtime: &dyn ContainerRuntime, context_dir: &Path, tag: &ImageTag) -> Result<()> {
    let status = runtime.build_image(context_dir, tag)?;
    if !status.success() {
        return Err(CheckerError::provision(tag.as_str(), status).into());
    }
    tracing::info!("Built image {}", tag);
    Ok(())
}
