//! The capability set handed to every script invocation
//!
//! The members are fixed and ordered. [`CAPABILITIES`] lists them in that
//! order and [`Capabilities`] declares its methods in the same order:
//!
//! | # | member    | purpose                                            |
//! |---|-----------|----------------------------------------------------|
//! | 1 | `cmd`     | run a shell command, capture stdout                |
//! | 2 | `os`      | classify the platform                              |
//! | 3 | `info`    | print an info message                              |
//! | 4 | `warn`    | print a warning                                    |
//! | 5 | `error`   | print an error and halt with exit code 1           |
//! | 6 | `exit`    | halt with an exit code                             |
//! | 7 | `script`  | run another script and wait for it                 |
//! | 8 | `spawn`   | run a program, return its exit code                |
//! | 9 | `modules` | utility handles (fs, fse, path, style, http)       |
//! |10 | `bin`     | run a locally installed binary                     |
//!
//! `error` and `exit` return a [`Halt`] instead of exiting; scripts return it
//! (`return Err(caps.exit(2))`) so nothing after the call runs.

use super::halt::{Halt, ScriptResult};
use super::modules::Modules;
use super::process::{ChildEnv, CommandOutput, Os};
use super::ScriptHost;
use crate::ui::console;
use tracing::debug;

/// Capability names in their fixed order
pub const CAPABILITIES: [&str; 10] = [
  "cmd", "os", "info", "warn", "error", "exit", "script", "spawn", "modules", "bin",
];

/// Host functions available to a script
pub trait Capabilities {
  /// Run `command` in the platform shell and wait; never fails
  fn cmd(&mut self, command: &str) -> CommandOutput;

  /// Current operating system
  fn os(&self) -> Os;

  fn info(&mut self, what: &str);

  fn warn(&mut self, what: &str);

  /// Print an error; the returned halt ends the invocation with code 1
  fn error(&mut self, what: &str) -> Halt;

  /// The returned halt ends the invocation with `code`
  fn exit(&mut self, code: i32) -> Halt;

  /// Run another script to completion before returning
  fn script(&mut self, name: &str) -> ScriptResult;

  /// Run a program and return its exit code; never fails
  fn spawn(&mut self, command: &str, args: &[&str], silent: bool) -> i32;

  fn modules(&self) -> &Modules;

  /// Run a locally installed binary; fails if none matches `command`
  fn bin(&mut self, command: &str, args: &[&str], silent: bool) -> ScriptResult<i32>;
}

/// Capability set bound to one script invocation
pub struct HostCapabilities<'h> {
  host: &'h mut ScriptHost,
  env: ChildEnv,
}

impl<'h> HostCapabilities<'h> {
  pub(crate) fn new(host: &'h mut ScriptHost, script: &str) -> Self {
    let env = ChildEnv {
      script: script.to_string(),
      release_type: host.release().release_type(),
      root: host.root().to_path_buf(),
    };
    Self { host, env }
  }

  /// Name of the script this capability set belongs to
  pub fn script_name(&self) -> &str {
    &self.env.script
  }
}

impl Capabilities for HostCapabilities<'_> {
  fn cmd(&mut self, command: &str) -> CommandOutput {
    self.host.runner.shell(command, &self.env)
  }

  fn os(&self) -> Os {
    Os::detect()
  }

  fn info(&mut self, what: &str) {
    console::info(what);
  }

  fn warn(&mut self, what: &str) {
    console::warn(what);
  }

  fn error(&mut self, what: &str) -> Halt {
    console::error(what);
    debug!(script = self.script_name(), "script called error");
    Halt::Error
  }

  fn exit(&mut self, code: i32) -> Halt {
    debug!(script = self.script_name(), code, "script called exit");
    Halt::Exit(code)
  }

  fn script(&mut self, name: &str) -> ScriptResult {
    self.host.invoke(name)
  }

  fn spawn(&mut self, command: &str, args: &[&str], silent: bool) -> i32 {
    self.host.runner.spawn(command, args, silent, &self.env)
  }

  fn modules(&self) -> &Modules {
    &self.host.modules
  }

  fn bin(&mut self, command: &str, args: &[&str], silent: bool) -> ScriptResult<i32> {
    let path = self.host.bins.resolve(command)?;
    debug!(command, path = %path.display(), "resolved local binary");
    Ok(self.host.runner.spawn(&path, args, silent, &self.env))
  }
}
