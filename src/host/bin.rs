//! Locally installed binary resolution
//!
//! Package managers drop executables into per-project directories such as
//! `node_modules/.bin`. Monorepos often hoist them to a parent directory, so the
//! search walks up from the project root and checks every configured directory
//! at each level, nearest first.

use crate::core::error::{NautusResult, ScriptError};
use std::path::{Path, PathBuf};

#[cfg(windows)]
const EXTENSIONS: &[&str] = &["", ".cmd", ".exe", ".bat", ".ps1"];
#[cfg(not(windows))]
const EXTENSIONS: &[&str] = &[""];

/// Finds executables provided by locally installed packages
#[derive(Debug, Clone)]
pub struct LocalBinResolver {
  root: PathBuf,
  dirs: Vec<PathBuf>,
}

impl LocalBinResolver {
  pub fn new(root: &Path, dirs: &[PathBuf]) -> Self {
    Self {
      root: root.to_path_buf(),
      dirs: dirs.to_vec(),
    }
  }

  /// All directories searched, in lookup order
  pub fn search_dirs(&self) -> Vec<PathBuf> {
    let mut searched = Vec::new();
    for ancestor in self.root.ancestors() {
      for dir in &self.dirs {
        let candidate = ancestor.join(dir);
        if !searched.contains(&candidate) {
          searched.push(candidate);
        }
      }
    }
    searched
  }

  /// Resolve a binary name to an executable path
  pub fn resolve(&self, command: &str) -> NautusResult<PathBuf> {
    let searched = self.search_dirs();

    // A bare name only; paths go through `spawn`
    if !command.is_empty() && !command.contains(&['/', '\\'][..]) {
      for dir in &searched {
        for ext in EXTENSIONS {
          let candidate = dir.join(format!("{}{}", command, ext));
          if is_executable(&candidate) {
            return Ok(candidate);
          }
        }
      }
    }

    Err(
      ScriptError::BinaryNotFound {
        command: command.to_string(),
        searched,
      }
      .into(),
    )
  }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;
  std::fs::metadata(path)
    .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
    .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
