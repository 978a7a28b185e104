//! Release context shared by every script of one CLI invocation
//!
//! `nautus release [major|minor|patch]` picks a release type once, before any
//! script runs. The resulting [`ReleaseContext`] is a plain `Copy` value that
//! the host hands to each script invocation (top-level and nested alike); it is
//! never mutated afterwards.
//!
//! # Version policy
//!
//! Scripts decide what a release type means for them. The policy used by the
//! `bump` step (and available to any script through [`ReleaseContext::bump`]):
//!
//! - **major**: bump major, zero minor and patch (`1.2.3` → `2.0.0`)
//! - **minor**: bump minor, zero patch (`1.2.3` → `1.3.0`)
//! - **patch**: bump patch (`1.2.3` → `1.2.4`)

pub mod manifest;

pub use manifest::bump_manifest;

use crate::core::error::{NautusError, NautusResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Release type selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
  Major,
  #[default]
  Minor,
  Patch,
}

impl ReleaseType {
  pub fn as_str(self) -> &'static str {
    match self {
      ReleaseType::Major => "major",
      ReleaseType::Minor => "minor",
      ReleaseType::Patch => "patch",
    }
  }
}

impl fmt::Display for ReleaseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ReleaseType {
  type Err = NautusError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "major" => Ok(ReleaseType::Major),
      "minor" => Ok(ReleaseType::Minor),
      "patch" => Ok(ReleaseType::Patch),
      other => Err(NautusError::with_help(
        format!("Unknown release type '{}'", other),
        "Use one of: major, minor, patch",
      )),
    }
  }
}

/// Read-only release state for one CLI invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseContext {
  release_type: ReleaseType,
}

impl ReleaseContext {
  pub fn new(release_type: ReleaseType) -> Self {
    Self { release_type }
  }

  pub fn release_type(&self) -> ReleaseType {
    self.release_type
  }

  /// Apply the release type to a semver version string
  pub fn bump(&self, current: &str) -> NautusResult<String> {
    let version: semver::Version = current
      .trim()
      .parse()
      .map_err(|e| NautusError::message(format!("Invalid semver version '{}': {}", current, e)))?;

    Ok(self.bump_version(&version).to_string())
  }

  /// Apply the release type to a parsed version
  ///
  /// Pre-release and build metadata are dropped: the result is always a
  /// plain release version.
  pub fn bump_version(&self, current: &semver::Version) -> semver::Version {
    let mut version = semver::Version::new(current.major, current.minor, current.patch);

    match self.release_type {
      ReleaseType::Major => {
        version.major += 1;
        version.minor = 0;
        version.patch = 0;
      }
      ReleaseType::Minor => {
        version.minor += 1;
        version.patch = 0;
      }
      ReleaseType::Patch => {
        version.patch += 1;
      }
    }

    version
  }
}
