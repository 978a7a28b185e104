//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway project directory with a script folder
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create an empty project with `nautus/scripts`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::create_dir_all(path.join("nautus").join("scripts"))?;
    Ok(Self { _root: root, path })
  }

  /// Write `nautus/scripts/@<name>.toml`
  pub fn script(&self, name: &str, body: &str) -> Result<&Self> {
    let path = self.path.join("nautus").join("scripts").join(format!("@{}.toml", name));
    std::fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(self)
  }

  /// Write a file relative to the project root, creating parent directories
  pub fn write(&self, path: &str, content: &str) -> Result<PathBuf> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&full, content)?;
    Ok(full)
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Run nautus inside the project
  pub fn run(&self, args: &[&str]) -> Result<Output> {
    run_nautus(&self.path, args)
  }
}

/// Run the nautus binary; the exit status is left to the caller
pub fn run_nautus(cwd: &Path, args: &[&str]) -> Result<Output> {
  let nautus_bin = env!("CARGO_BIN_EXE_nautus");

  Command::new(nautus_bin)
    .current_dir(cwd)
    .args(args)
    .env("NO_COLOR", "1")
    .env_remove("NAUTUS_LOG")
    .output()
    .context("Failed to run nautus")
}

/// Exit code of a finished nautus run
pub fn code(output: &Output) -> i32 {
  output.status.code().unwrap_or(-1)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Make a file executable (unix only)
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  let mut perms = std::fs::metadata(path)?.permissions();
  perms.set_mode(0o755);
  std::fs::set_permissions(path, perms)?;
  Ok(())
}
