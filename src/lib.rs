//! csp-checker library exports.
//!
//! The binary is a thin clap layer over these modules; integration tests
//! drive the commands through a fake [`runtime::ContainerRuntime`].

pub mod commands;
pub mod config;
pub mod error;
pub mod image;
pub mod invocation;
pub mod logging;
pub mod preflight;
pub mod process;
pub mod provision;
pub mod runtime;

pub use error::CheckerError;
pub use image::ImageTag;
pub use invocation::{compose, EnvFilePolicy, InvocationRequest};
