//! File scripts: `@<Name>.toml` step lists
//!
//! # Format
//!
//! ```toml
//! description = "Publish to npm"
//!
//! [[steps]]
//! info = "Cutting a {release_type} release"
//!
//! [[steps]]
//! bump = "package.json"
//!
//! [[steps]]
//! spawn = "npm"
//! args = ["publish"]
//! ```
//!
//! Each step carries exactly one action key:
//!
//! | key      | capability | value                                  |
//! |----------|------------|----------------------------------------|
//! | `cmd`    | `cmd`      | shell command line                     |
//! | `spawn`  | `spawn`    | program, with `args` / `silent`        |
//! | `bin`    | `bin`      | local binary, with `args` / `silent`   |
//! | `script` | `script`   | script name                            |
//! | `info`   | `info`     | message                                |
//! | `warn`   | `warn`     | message                                |
//! | `error`  | `error`    | message (halts with 1)                 |
//! | `exit`   | `exit`     | exit code (halts)                      |
//! | `bump`   | -          | manifest path, bumped per release type |
//!
//! Modifiers: `os` limits a step to one platform, `echo` prints the captured
//! stdout of a `cmd`, and `on_failure` (`exit`, `error`, `ignore`) decides what a
//! non-zero exit code from `cmd` / `spawn` / `bin` does. The default is `exit`,
//! which halts with the child's own code.
//!
//! Strings may reference `{release_type}`, `{os}`, `{root}` and `{script}`.

use crate::core::error::{NautusResult, ScriptError};
use crate::host::{Capabilities, Os, ScriptResult};
use crate::release::{ReleaseContext, bump_manifest};
use crate::script::Script;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a non-zero exit code from a step does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnFailure {
  /// Halt with the child's exit code
  #[default]
  Exit,
  /// Print an error and halt with 1
  Error,
  /// Warn and continue with the next step
  Ignore,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptFile {
  #[serde(default)]
  description: Option<String>,
  #[serde(default)]
  steps: Vec<StepDef>,
}

/// Raw step as written in TOML; validated into [`Step`]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepDef {
  cmd: Option<String>,
  spawn: Option<String>,
  bin: Option<String>,
  script: Option<String>,
  info: Option<String>,
  warn: Option<String>,
  error: Option<String>,
  exit: Option<i32>,
  bump: Option<String>,

  #[serde(default)]
  args: Option<Vec<String>>,
  #[serde(default)]
  silent: Option<bool>,
  #[serde(default)]
  echo: Option<bool>,
  #[serde(default)]
  os: Option<Os>,
  #[serde(default)]
  on_failure: Option<OnFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
  Cmd { command: String, echo: bool },
  Spawn { program: String, args: Vec<String>, silent: bool },
  Bin { command: String, args: Vec<String>, silent: bool },
  Script(String),
  Info(String),
  Warn(String),
  Error(String),
  Exit(i32),
  Bump(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
  action: Action,
  os: Option<Os>,
  on_failure: OnFailure,
}

impl StepDef {
  fn into_step(self) -> Result<Step, String> {
    let present: Vec<&str> = [
      ("cmd", self.cmd.is_some()),
      ("spawn", self.spawn.is_some()),
      ("bin", self.bin.is_some()),
      ("script", self.script.is_some()),
      ("info", self.info.is_some()),
      ("warn", self.warn.is_some()),
      ("error", self.error.is_some()),
      ("exit", self.exit.is_some()),
      ("bump", self.bump.is_some()),
    ]
    .into_iter()
    .filter_map(|(key, set)| set.then_some(key))
    .collect();

    match present.as_slice() {
      [] => return Err("no action (expected one of cmd, spawn, bin, script, info, warn, error, exit, bump)".to_string()),
      [_] => {}
      many => return Err(format!("more than one action: {}", many.join(", "))),
    }
    let key = present[0];

    if let Some(code) = self.exit
      && !(0..=255).contains(&code)
    {
      return Err(format!("exit code {} is outside 0..=255", code));
    }

    let takes_args = matches!(key, "spawn" | "bin");
    if !takes_args && (self.args.is_some() || self.silent.is_some()) {
      return Err(format!("`args` and `silent` only apply to spawn and bin, not {}", key));
    }
    if key != "cmd" && self.echo.is_some() {
      return Err(format!("`echo` only applies to cmd, not {}", key));
    }
    if !matches!(key, "cmd" | "spawn" | "bin") && self.on_failure.is_some() {
      return Err(format!("`on_failure` only applies to cmd, spawn and bin, not {}", key));
    }

    let args = self.args.unwrap_or_default();
    let silent = self.silent.unwrap_or(false);

    let action = match key {
      "cmd" => Action::Cmd {
        command: self.cmd.unwrap_or_default(),
        echo: self.echo.unwrap_or(false),
      },
      "spawn" => Action::Spawn {
        program: self.spawn.unwrap_or_default(),
        args,
        silent,
      },
      "bin" => Action::Bin {
        command: self.bin.unwrap_or_default(),
        args,
        silent,
      },
      "script" => Action::Script(self.script.unwrap_or_default()),
      "info" => Action::Info(self.info.unwrap_or_default()),
      "warn" => Action::Warn(self.warn.unwrap_or_default()),
      "error" => Action::Error(self.error.unwrap_or_default()),
      "exit" => Action::Exit(self.exit.unwrap_or_default()),
      _ => Action::Bump(self.bump.unwrap_or_default()),
    };

    Ok(Step {
      action,
      os: self.os,
      on_failure: self.on_failure.unwrap_or_default(),
    })
  }
}

/// A script defined by an `@<Name>.toml` file
#[derive(Debug, Clone)]
pub struct FileScript {
  name: String,
  path: PathBuf,
  description: Option<String>,
  steps: Vec<Step>,
}

impl FileScript {
  /// Load and validate a definition file
  pub fn load(name: &str, path: &Path) -> NautusResult<Self> {
    let content = std::fs::read_to_string(path)?;
    Self::parse(name, path, &content)
  }

  fn parse(name: &str, path: &Path, content: &str) -> NautusResult<Self> {
    let definition = |reason: String| ScriptError::Definition {
      path: path.to_path_buf(),
      reason,
    };

    let file: ScriptFile = toml_edit::de::from_str(content).map_err(|e| definition(e.to_string()))?;

    let mut steps = Vec::with_capacity(file.steps.len());
    for (idx, def) in file.steps.into_iter().enumerate() {
      let step = def
        .into_step()
        .map_err(|reason| definition(format!("step {}: {}", idx + 1, reason)))?;
      steps.push(step);
    }

    Ok(Self {
      name: name.to_string(),
      path: path.to_path_buf(),
      description: file.description,
      steps,
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

/// Placeholder values for step strings
struct Vars {
  release_type: String,
  os: String,
  root: String,
  script: String,
}

impl Vars {
  fn lookup(&self, key: &str) -> Option<&str> {
    match key {
      "release_type" => Some(&self.release_type),
      "os" => Some(&self.os),
      "root" => Some(&self.root),
      "script" => Some(&self.script),
      _ => None,
    }
  }

  /// Substitute placeholders in one pass; inserted values are not rescanned
  fn expand(&self, input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('{') {
      out.push_str(&rest[..start]);
      let tail = &rest[start..];
      let replaced = tail
        .find('}')
        .and_then(|end| self.lookup(&tail[1..end]).map(|value| (end, value)));
      match replaced {
        Some((end, value)) => {
          out.push_str(value);
          rest = &tail[end + 1..];
        }
        None => {
          out.push('{');
          rest = &tail[1..];
        }
      }
    }

    out.push_str(rest);
    out
  }

  fn expand_all(&self, args: &[String]) -> Vec<String> {
    args.iter().map(|a| self.expand(a)).collect()
  }
}

/// Apply the step's failure policy to a child exit code
fn check_exit(caps: &mut dyn Capabilities, label: &str, code: i32, policy: OnFailure) -> ScriptResult {
  if code == 0 {
    return Ok(());
  }
  match policy {
    OnFailure::Exit => Err(caps.exit(code)),
    OnFailure::Error => Err(caps.error(&format!("`{}` failed with exit code {}", label, code))),
    OnFailure::Ignore => {
      caps.warn(&format!("`{}` exited with code {}, continuing", label, code));
      Ok(())
    }
  }
}

fn command_label(program: &str, args: &[String]) -> String {
  if args.is_empty() {
    program.to_string()
  } else {
    format!("{} {}", program, args.join(" "))
  }
}

impl Script for FileScript {
  fn run(&self, caps: &mut dyn Capabilities, release: &ReleaseContext) -> ScriptResult {
    let os = caps.os();
    let vars = Vars {
      release_type: release.release_type().to_string(),
      os: os.to_string(),
      root: caps.modules().path.root().display().to_string(),
      script: self.name.clone(),
    };

    for step in &self.steps {
      if step.os.is_some_and(|wanted| wanted != os) {
        continue;
      }

      match &step.action {
        Action::Cmd { command, echo } => {
          let command = vars.expand(command);
          let output = caps.cmd(&command);
          if *echo && !output.stdout.trim().is_empty() {
            caps.info(output.stdout.trim_end());
          }
          check_exit(caps, &command, output.code, step.on_failure)?;
        }
        Action::Spawn { program, args, silent } => {
          let program = vars.expand(program);
          let args = vars.expand_all(args);
          let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
          let code = caps.spawn(&program, &arg_refs, *silent);
          check_exit(caps, &command_label(&program, &args), code, step.on_failure)?;
        }
        Action::Bin { command, args, silent } => {
          let command = vars.expand(command);
          let args = vars.expand_all(args);
          let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
          let code = caps.bin(&command, &arg_refs, *silent)?;
          check_exit(caps, &command_label(&command, &args), code, step.on_failure)?;
        }
        Action::Script(name) => caps.script(&vars.expand(name))?,
        Action::Info(message) => caps.info(&vars.expand(message)),
        Action::Warn(message) => caps.warn(&vars.expand(message)),
        Action::Error(message) => return Err(caps.error(&vars.expand(message))),
        Action::Exit(code) => return Err(caps.exit(*code)),
        Action::Bump(manifest) => {
          let path = caps.modules().path.resolve(vars.expand(manifest));
          match bump_manifest(&path, release) {
            Ok(change) => caps.info(&format!(
              "Bumped {} from {} to {} ({})",
              manifest,
              change.previous,
              change.next,
              release.release_type()
            )),
            Err(e) => return Err(caps.error(&e.to_string())),
          }
        }
      }
    }

    Ok(())
  }

  fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }
}
