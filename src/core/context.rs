//! Project context - build once in main, pass everywhere
//!
//! ```text
//! main.rs:
//!   ProjectContext::build(dir, release_type) -> &ProjectContext
//!   |
//!   v
//! commands/lifecycle.rs, list.rs:
//!   fn run_*(ctx: &ProjectContext, ..)
//! ```

use crate::core::config::NautusConfig;
use crate::core::error::{ConfigError, NautusResult, ResultExt};
use crate::release::{ReleaseContext, ReleaseType};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs to know about the project
#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Project root directory (absolute path)
  pub root: PathBuf,

  /// nautus.toml, or defaults when the project has none
  pub config: Arc<NautusConfig>,

  /// Release type for this invocation; fixed before any script runs
  pub release: ReleaseContext,
}

impl ProjectContext {
  /// Build the context for the project at `dir`
  pub fn build(dir: &Path, release_type: ReleaseType) -> NautusResult<Self> {
    if !dir.is_dir() {
      return Err(ConfigError::ProjectNotFound { path: dir.to_path_buf() }.into());
    }
    let root = dir
      .canonicalize()
      .with_context(|| format!("Failed to resolve {}", dir.display()))?;
    let config = Arc::new(NautusConfig::load(&root)?);

    Ok(Self {
      root,
      config,
      release: ReleaseContext::new(release_type),
    })
  }

  /// Absolute script directory
  pub fn scripts_dir(&self) -> PathBuf {
    self.root.join(&self.config.scripts.dir)
  }
}
