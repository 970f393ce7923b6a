//! Errors whose exit status the wrapper must reproduce.

use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    /// `docker build` exited non-zero.
    #[error("building image '{tag}' failed (exit code {})", display_code(.code))]
    Provision { tag: String, code: Option<i32> },

    /// `docker run` exited non-zero.
    #[error("checker container failed (exit code {})", display_code(.code))]
    Invocation { code: Option<i32> },

    #[error("image tag must not be empty")]
    EmptyTag,
}

impl CheckerError {
    pub fn provision(tag: &str, status: ExitStatus) -> Self {
        Self::Provision {
            tag: tag.to_string(),
            code: status.code(),
        }
    }

    pub fn invocation(status: ExitStatus) -> Self {
        Self::Invocation {
            code: status.code(),
        }
    }

    /// Exit code the wrapper should terminate with.
    ///
    /// Mirrors the child's code; a child killed by a signal has none, so 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Provision { code, .. } | Self::Invocation { code } => {
                code.and_then(|c| u8::try_from(c).ok())
                    .filter(|c| *c != 0)
                    .unwrap_or(1)
            }
            Self::EmptyTag => 2,
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}
