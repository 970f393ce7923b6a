//! Build command - builds the checker image.

use anyhow::Result;

use crate::config::Config;
use crate::image::ImageTag;
use crate::provision;
use crate::runtime::ContainerRuntime;

/// Execute the build command.
///
/// Always builds, even if the image already exists.
pub fn cmd_build(runtime: &dyn ContainerRuntime, config: &Config, tag: &ImageTag) -> Result<()> {
    tracing::info!("Building {} from {}", tag, config.base_dir.display());
    provision::build(runtime, &config.base_dir, tag)
}
