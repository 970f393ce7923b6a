//! Image tag handling.

use std::fmt;
use std::str::FromStr;

use crate::error::CheckerError;

/// Tag used when neither `--tag` nor `CSP_CHECKER_TAG` is given.
pub const DEFAULT_TAG: &str = "csp-checker:latest";

/// Name of a buildable container image, rejected when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag(pub(crate) String);

impl ImageTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, CheckerError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(CheckerError::EmptyTag);
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ImageTag {
    fn default() -> Self {
        Self(DEFAULT_TAG.to_string())
    }
}

impl FromStr for ImageTag {
    type Err = CheckerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
