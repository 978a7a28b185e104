//! Child process execution for the `cmd`, `spawn` and `bin` capabilities
//!
//! Nothing in here returns an error: a program that cannot be launched is
//! reported with exit code 127 and a child killed by a signal with -1. Scripts
//! decide what a non-zero code means.

use crate::core::error::ExitCode;
use crate::release::ReleaseType;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Exit code plus captured standard output of a shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  pub code: i32,
  pub stdout: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == 0
  }
}

/// Operating system family as seen by scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Windows,
  Linux,
  Mac,
  Unknown,
}

impl Os {
  /// Classify the platform this binary was built for
  pub fn detect() -> Self {
    Self::from_target(std::env::consts::OS)
  }

  fn from_target(target: &str) -> Self {
    match target {
      "windows" => Os::Windows,
      "linux" => Os::Linux,
      "macos" => Os::Mac,
      _ => Os::Unknown,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Os::Windows => "windows",
      Os::Linux => "linux",
      Os::Mac => "mac",
      Os::Unknown => "unknown",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Environment every child process of a script receives
#[derive(Debug, Clone)]
pub struct ChildEnv {
  pub script: String,
  pub release_type: ReleaseType,
  pub root: PathBuf,
}

impl ChildEnv {
  fn apply(&self, cmd: &mut Command) {
    cmd
      .env("NAUTUS_SCRIPT", &self.script)
      .env("NAUTUS_RELEASE_TYPE", self.release_type.as_str())
      .env("NAUTUS_ROOT", &self.root);
  }
}

/// Launches child processes in the project root
#[derive(Debug, Clone)]
pub struct ProcessRunner {
  root: PathBuf,
  shell_program: String,
  shell_args: Vec<String>,
}

impl ProcessRunner {
  pub fn new(root: &Path, shell: (String, Vec<String>)) -> Self {
    let (shell_program, shell_args) = shell;
    Self {
      root: root.to_path_buf(),
      shell_program,
      shell_args,
    }
  }

  /// Run a command line through the shell and capture its stdout
  pub fn shell(&self, command: &str, env: &ChildEnv) -> CommandOutput {
    let mut cmd = Command::new(&self.shell_program);
    cmd
      .current_dir(&self.root)
      .args(&self.shell_args)
      .arg(command)
      .stdin(Stdio::inherit())
      .stderr(Stdio::inherit());
    env.apply(&mut cmd);

    debug!(shell = %self.shell_program, command, "running shell command");

    match cmd.output() {
      Ok(output) => CommandOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      },
      Err(e) => {
        warn!(shell = %self.shell_program, error = %e, "failed to launch shell");
        CommandOutput {
          code: ExitCode::NotLaunched.as_i32(),
          stdout: String::new(),
        }
      }
    }
  }

  /// Run a program directly and wait for it, streaming output unless silent
  pub fn spawn<S: AsRef<OsStr>>(&self, program: S, args: &[&str], silent: bool, env: &ChildEnv) -> i32 {
    let program = program.as_ref();
    let mut cmd = Command::new(program);
    cmd.current_dir(&self.root).args(args);
    if silent {
      cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }
    env.apply(&mut cmd);

    debug!(program = %program.to_string_lossy(), ?args, silent, "spawning process");

    match cmd.status() {
      Ok(status) => {
        let code = status.code().unwrap_or(-1);
        debug!(program = %program.to_string_lossy(), code, "process exited");
        code
      }
      Err(e) => {
        warn!(program = %program.to_string_lossy(), error = %e, "failed to launch process");
        ExitCode::NotLaunched.as_i32()
      }
    }
  }
}
