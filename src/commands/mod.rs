//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Build the checker image
//! - `start` - Provision the image and run the checker
//! - `preflight` - Run preflight checks
//! - `show` - Display information

mod build;
mod preflight;
pub mod show;
pub mod start;

pub use build::cmd_build;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
pub use start::cmd_start;
